//! routeshift transform - Next.js App Router to TanStack Router rewrites
//!
//! This crate holds the rules that rewrite one parsed route module. Each
//! concern is a [`TransformPass`]; [`pipeline`] selects the passes for a
//! kind of route file and [`transform`] runs them in order.
//!
//! # Passes
//!
//! - **Directives**: drops `"use client"` and prepends the router import
//! - **Default export**: binds the default-exported component to a name
//! - **Imports**: removes or redirects framework imports
//! - **Navigation hooks**: maps `next/navigation` hooks to router hooks
//! - **Page elements**: `Link` and `Image` attribute rewrites
//! - **Layout shell**: `<Outlet />`, `<HeadContent />` and `<Scripts />`
//! - **API handlers**: un-exports request handlers
//! - **Route registration**: `export const Route = ...`
//! - **Font elimination**: purges font instances used only for `className`
//!
//! # Usage
//!
//! ```ignore
//! use routeshift_transform::{transform, TransformKind, TransformOptions};
//!
//! let options = TransformOptions::new(TransformKind::Page, "/about", "page");
//! let result = transform(&mut parsed.module, options);
//! for warning in result.warnings {
//!     eprintln!("{}: {}", warning.code, warning.message);
//! }
//! ```

pub mod analysis;
pub mod builders;
pub mod eval;
pub mod matchers;
pub mod passes;
pub mod symbols;

pub use passes::{
    ApiHandlers, FontElimination, LayoutShell, LayoutVariant, NavigationHooks,
    NormalizeDefaultExport, PageElements, PassContext, PassResult, PrependRouterImport,
    RegisterRoute, RewriteImports, StripUseClient, TransformKind, TransformOptions,
    TransformPass, TransformWarning,
};

use std::collections::BTreeSet;

use swc_core::ecma::ast::Module;
use tracing::debug;

/// Result of running a pipeline over one module
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    /// Whether any pass modified the module
    pub modified: bool,
    /// All warnings from all passes
    pub warnings: Vec<TransformWarning>,
    /// Name the route component was registered under
    pub component_name: Option<String>,
    pub metadata_found: bool,
    /// npm packages the rewritten code imports from
    pub required_packages: BTreeSet<String>,
}

/// The ordered passes for a kind of route file
pub fn pipeline(options: &TransformOptions) -> Vec<Box<dyn TransformPass>> {
    let mut passes: Vec<Box<dyn TransformPass>> =
        vec![Box::new(StripUseClient), Box::new(PrependRouterImport)];

    match options.kind {
        TransformKind::Api => {
            passes.push(Box::new(RewriteImports));
            passes.push(Box::new(ApiHandlers));
            passes.push(Box::new(RegisterRoute));
        }
        kind => {
            passes.push(Box::new(NormalizeDefaultExport));
            passes.push(Box::new(RewriteImports));
            passes.push(Box::new(NavigationHooks));
            passes.push(Box::new(PageElements));
            if kind.is_layout() {
                passes.push(Box::new(LayoutShell));
            }
            passes.push(Box::new(RegisterRoute));
            if options.font_aware() {
                passes.push(Box::new(FontElimination));
            }
        }
    }

    passes
}

/// Run the pipeline for `options.kind` over `module`
pub fn transform(module: &mut Module, options: TransformOptions) -> TransformResult {
    let mut result = TransformResult::default();
    let passes = pipeline(&options);
    let mut ctx = PassContext::new(options);

    for pass in passes {
        let pass_result = pass.run(module, &mut ctx);
        debug!(
            pass = pass.name(),
            modified = pass_result.modified,
            warnings = pass_result.warnings.len(),
            "pass finished"
        );
        result.modified |= pass_result.modified;
        result.warnings.extend(pass_result.warnings);
    }

    result.component_name = Some(ctx.component_name());
    result.metadata_found = ctx.metadata_found;
    result.required_packages = ctx.required_packages;
    result
}
