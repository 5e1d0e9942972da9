//! Transform passes
//!
//! Each pass handles one migration concern and mutates the module in place.
//! Passes never share state through captured variables: everything a later
//! pass needs from an earlier one is written to the [`PassContext`].

mod api;
mod default_export;
mod directives;
mod fonts;
mod imports;
mod jsx;
mod layout_shell;
mod navigation;
mod registration;

pub use api::ApiHandlers;
pub use default_export::{derive_component_name, NormalizeDefaultExport};
pub use directives::{PrependRouterImport, StripUseClient};
pub use fonts::FontElimination;
pub use imports::RewriteImports;
pub use jsx::PageElements;
pub use layout_shell::LayoutShell;
pub use navigation::NavigationHooks;
pub use registration::RegisterRoute;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use swc_core::ecma::ast::Module;

use crate::builders::StylesheetLink;
use crate::symbols::RouteFactory;

/// Which file a pipeline is transforming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Page,
    RootLayout,
    Layout,
    Loading,
    Error,
    Api,
}

impl TransformKind {
    /// Pages and layouts, which render JSX with links and images
    pub fn is_page_like(self) -> bool {
        matches!(
            self,
            TransformKind::Page
                | TransformKind::RootLayout
                | TransformKind::Layout
                | TransformKind::Loading
                | TransformKind::Error
        )
    }

    pub fn is_layout(self) -> bool {
        matches!(self, TransformKind::RootLayout | TransformKind::Layout)
    }
}

/// Flavour of the root layout transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Purges unused font instances; stylesheets are imported with `?url`
    #[default]
    FontAware,
    /// Leaves fonts alone; stylesheets are imported without a suffix
    Plain,
}

/// Settings for one file's transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub kind: TransformKind,
    /// Route path passed to `createFileRoute`, e.g. `/blog/$slug`
    pub route_path: String,
    /// Base name of the file without extension, used to name anonymous components
    pub file_stem: String,
    pub layout_variant: LayoutVariant,
    /// Replace `next/image` with `@unpic/react` instead of dropping the import
    pub rewrite_image_imports: bool,
}

impl TransformOptions {
    pub fn new(kind: TransformKind, route_path: impl Into<String>, file_stem: impl Into<String>) -> Self {
        TransformOptions {
            kind,
            route_path: route_path.into(),
            file_stem: file_stem.into(),
            layout_variant: LayoutVariant::default(),
            rewrite_image_imports: true,
        }
    }

    /// Root layouts register with `createRootRoute`, everything else by path
    pub fn route_factory(&self) -> RouteFactory {
        match self.kind {
            TransformKind::RootLayout => RouteFactory::Root,
            _ => RouteFactory::File {
                path: self.route_path.clone(),
            },
        }
    }

    pub fn font_aware(&self) -> bool {
        self.kind == TransformKind::RootLayout && self.layout_variant == LayoutVariant::FontAware
    }
}

/// State passed from pass to pass for one file
#[derive(Debug, Clone)]
pub struct PassContext {
    pub options: TransformOptions,
    /// Name the default-exported component is bound to
    pub component_name: Option<String>,
    pub metadata_found: bool,
    pub stylesheet_links: Vec<StylesheetLink>,
    /// Exported request handlers of an API route, in source order
    pub handlers: Vec<String>,
    /// npm packages the rewritten imports depend on
    pub required_packages: BTreeSet<String>,
}

impl PassContext {
    pub fn new(options: TransformOptions) -> Self {
        PassContext {
            options,
            component_name: None,
            metadata_found: false,
            stylesheet_links: Vec::new(),
            handlers: Vec::new(),
            required_packages: BTreeSet::new(),
        }
    }

    /// The component name, falling back to the one derived from the file
    pub fn component_name(&self) -> String {
        self.component_name
            .clone()
            .unwrap_or_else(|| derive_component_name(&self.options))
    }
}

/// Result of a single pass
#[derive(Debug, Clone, Default)]
pub struct PassResult {
    /// Whether the pass modified the module
    pub modified: bool,
    /// Warnings generated by this pass
    pub warnings: Vec<TransformWarning>,
}

/// A warning generated during transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformWarning {
    /// Warning code (e.g., "W-SHELL-001")
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
}

impl TransformWarning {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        TransformWarning {
            code,
            message: message.into(),
        }
    }
}

/// Trait for transform passes
pub trait TransformPass {
    /// Name of the pass for debugging
    fn name(&self) -> &'static str;

    /// Run the pass on a module
    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult;
}

/// Splice `items` into `body` at `index`
pub(crate) fn insert_all<T>(body: &mut Vec<T>, index: usize, items: impl IntoIterator<Item = T>) {
    let tail = body.split_off(index.min(body.len()));
    body.extend(items);
    body.extend(tail);
}
