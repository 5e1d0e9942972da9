//! Default export normalization
//!
//! `export default function Name() {}` becomes a plain function declaration
//! and `export default () => ...` is bound to a named constant. The chosen
//! name is written to the context before any route registration is built.
//! Route components render synchronously, so `async` is dropped when the body
//! never awaits; either way the data fetching is reported for a loader.

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_type, Visit, VisitWith};
use tracing::debug;

use crate::builders::{const_item, ident};
use crate::matchers::{default_export_shape, DefaultExportShape};
use crate::passes::{PassContext, PassResult, TransformKind, TransformOptions, TransformPass, TransformWarning};

pub struct NormalizeDefaultExport;

impl TransformPass for NormalizeDefaultExport {
    fn name(&self) -> &'static str {
        "normalize-default-export"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        let Some((index, shape)) = module
            .body
            .iter()
            .enumerate()
            .find_map(|(index, item)| default_export_shape(item).map(|shape| (index, shape)))
        else {
            let name = derive_component_name(&ctx.options);
            return PassResult {
                modified: false,
                warnings: vec![TransformWarning::new(
                    "W-EXPORT-001",
                    format!("no default export component found, registering '{}'", name),
                )],
            };
        };

        if let DefaultExportShape::Reference(name) = shape {
            ctx.component_name = Some(name.to_string());
            return PassResult::default();
        }

        let derived = derive_component_name(&ctx.options);
        let mut warnings = vec![];
        let item = module.body.remove(index);
        let (name, replacement) = match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
                decl: DefaultDecl::Fn(FnExpr { ident: name, mut function }),
                ..
            })) => {
                let name = name.unwrap_or_else(|| ident(&derived));
                if function.is_async {
                    let awaits = function.body.as_ref().is_some_and(contains_await);
                    warnings.push(async_component(&mut function.is_async, awaits, &name.sym));
                }
                let decl = ModuleItem::Stmt(Stmt::Decl(Decl::Fn(FnDecl {
                    ident: name.clone(),
                    declare: false,
                    function,
                })));
                (name.sym.to_string(), decl)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(ExportDefaultExpr {
                mut expr,
                ..
            })) => {
                if let Expr::Arrow(arrow) = &mut *expr {
                    if arrow.is_async {
                        let awaits = contains_await(&*arrow.body);
                        warnings.push(async_component(&mut arrow.is_async, awaits, &derived));
                    }
                }
                (derived.clone(), const_item(&derived, expr))
            }
            other => {
                module.body.insert(index, other);
                return PassResult::default();
            }
        };
        module.body.insert(index, replacement);

        debug!(component = %name, "normalized default export");
        ctx.component_name = Some(name);

        PassResult {
            modified: true,
            warnings,
        }
    }
}

/// Drop `async` unless the body awaits, and report the data fetching
fn async_component(is_async: &mut bool, awaits: bool, name: &str) -> TransformWarning {
    if awaits {
        return TransformWarning::new(
            "W-EXPORT-002",
            format!(
                "async component '{}' awaits while rendering, move its data fetching into a loader",
                name
            ),
        );
    }

    *is_async = false;
    TransformWarning::new(
        "W-EXPORT-002",
        format!(
            "async component '{}' made synchronous, move any data fetching into a loader",
            name
        ),
    )
}

fn contains_await<N: VisitWith<AwaitFinder>>(node: &N) -> bool {
    let mut finder = AwaitFinder::default();
    node.visit_with(&mut finder);
    finder.found
}

/// Looks for `await` without entering nested functions
#[derive(Default)]
struct AwaitFinder {
    found: bool,
}

impl Visit for AwaitFinder {
    noop_visit_type!();

    fn visit_await_expr(&mut self, _: &AwaitExpr) {
        self.found = true;
    }

    fn visit_for_of_stmt(&mut self, stmt: &ForOfStmt) {
        self.found |= stmt.is_await;
        stmt.visit_children_with(self);
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}
}

/// Name for a component whose default export has no name of its own
///
/// The root layout is always `RootLayout`; `page` files use `Component`;
/// `error` files use `ErrorBoundary` so the global `Error` is not shadowed.
/// Anything else is the PascalCase form of the file stem.
pub fn derive_component_name(options: &TransformOptions) -> String {
    if options.kind == TransformKind::RootLayout {
        return "RootLayout".to_string();
    }

    match options.file_stem.as_str() {
        "page" | "" => "Component".to_string(),
        "error" => "ErrorBoundary".to_string(),
        stem => {
            let mut name = pascal_case(stem);
            if name.is_empty() {
                return "Component".to_string();
            }
            if name.starts_with(|c: char| c.is_ascii_digit()) {
                name.insert(0, '_');
            }
            name
        }
    }
}

/// `about` → `About`, `blog-post` → `BlogPost`
fn pascal_case(stem: &str) -> String {
    stem.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
