//! API route handlers
//!
//! Exported request handlers (`export async function GET`) become plain
//! declarations; their names are recorded so the route registration can
//! reference them from `server.handlers`.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;
use tracing::debug;

use crate::matchers::{declarator_name, is_http_method};
use crate::passes::{PassContext, PassResult, TransformPass, TransformWarning};

pub struct ApiHandlers;

impl TransformPass for ApiHandlers {
    fn name(&self) -> &'static str {
        "api-handlers"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        for item in module.body.iter_mut() {
            let ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) = item else {
                continue;
            };

            let names = handler_names(&export.decl);
            if names.is_empty() {
                continue;
            }

            let decl = std::mem::replace(
                &mut export.decl,
                Decl::Var(Box::new(VarDecl {
                    span: DUMMY_SP,
                    ctxt: SyntaxContext::empty(),
                    kind: VarDeclKind::Const,
                    declare: false,
                    decls: vec![],
                })),
            );
            *item = ModuleItem::Stmt(Stmt::Decl(decl));
            ctx.handlers.extend(names);
        }

        let mut warnings = Vec::new();
        if ctx.handlers.is_empty() {
            warnings.push(TransformWarning::new(
                "W-API-001",
                "no exported request handlers found, registering an empty handler set",
            ));
        } else {
            debug!(handlers = ?ctx.handlers, "collected api handlers");
        }

        PassResult {
            modified: !ctx.handlers.is_empty(),
            warnings,
        }
    }
}

/// Handler names declared by an exported declaration
///
/// A variable declaration only counts when every declarator is a handler, so
/// nothing that was exported for other reasons loses its export.
fn handler_names(decl: &Decl) -> Vec<String> {
    match decl {
        Decl::Fn(fn_decl) if is_http_method(&fn_decl.ident.sym) => {
            vec![fn_decl.ident.sym.to_string()]
        }
        Decl::Var(var) => {
            let names: Vec<String> = var
                .decls
                .iter()
                .filter_map(declarator_name)
                .filter(|name| is_http_method(name))
                .map(str::to_string)
                .collect();
            if names.len() == var.decls.len() {
                names
            } else {
                vec![]
            }
        }
        _ => vec![],
    }
}
