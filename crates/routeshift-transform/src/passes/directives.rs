//! Directive and prologue passes

use swc_core::ecma::ast::Module;
use tracing::debug;

use crate::builders::router_import;
use crate::matchers::{is_use_client, prologue_len};
use crate::passes::{PassContext, PassResult, TransformPass};

/// Removes `"use client"` from the directive prologue
pub struct StripUseClient;

impl TransformPass for StripUseClient {
    fn name(&self) -> &'static str {
        "strip-use-client"
    }

    fn run(&self, module: &mut Module, _ctx: &mut PassContext) -> PassResult {
        let prologue = prologue_len(module);
        let before = module.body.len();

        let mut index = 0;
        module.body.retain(|item| {
            let in_prologue = index < prologue;
            index += 1;
            !(in_prologue && is_use_client(item))
        });

        let removed = before - module.body.len();
        if removed > 0 {
            debug!(removed, "removed use client directives");
        }

        PassResult {
            modified: removed > 0,
            warnings: vec![],
        }
    }
}

/// Inserts the router-primitive import ahead of everything but directives
pub struct PrependRouterImport;

impl TransformPass for PrependRouterImport {
    fn name(&self) -> &'static str {
        "prepend-router-import"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        let factory = ctx.options.route_factory();
        let index = prologue_len(module);
        module.body.insert(index, router_import(&factory));

        PassResult {
            modified: true,
            warnings: vec![],
        }
    }
}
