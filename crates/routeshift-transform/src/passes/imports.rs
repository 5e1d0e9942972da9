//! Import rewriting
//!
//! Drops imports of modules that have no counterpart, points `next/link` and
//! `next/image` at their replacements and binds side-effect stylesheet
//! imports. Only the root layout's stylesheets are linked from the head.

use swc_core::ecma::ast::*;
use tracing::debug;

use crate::builders::{default_import, named_import, StylesheetLink};
use crate::matchers::{
    import_source, is_legacy_import, is_stylesheet_import, IMAGE_MODULE, LINK_MODULE,
};
use crate::passes::{PassContext, PassResult, TransformKind, TransformPass};
use crate::symbols::{RouterSymbol, IMAGE_PACKAGE, ROUTER_PACKAGE};

pub struct RewriteImports;

enum Rewrite {
    Keep(ImportDecl),
    Remove,
    Replace(ModuleItem),
}

impl TransformPass for RewriteImports {
    fn name(&self) -> &'static str {
        "rewrite-imports"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        let mut modified = false;
        let body = std::mem::take(&mut module.body);

        for item in body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                module.body.push(item);
                continue;
            };

            match rewrite_import(import, ctx) {
                Rewrite::Keep(import) => {
                    module.body.push(ModuleItem::ModuleDecl(ModuleDecl::Import(import)));
                }
                Rewrite::Remove => modified = true,
                Rewrite::Replace(replacement) => {
                    module.body.push(replacement);
                    modified = true;
                }
            }
        }

        PassResult {
            modified,
            warnings: vec![],
        }
    }
}

fn rewrite_import(import: ImportDecl, ctx: &mut PassContext) -> Rewrite {
    let src = import_source(&import).to_string();
    let page_like = ctx.options.kind.is_page_like();

    if src == IMAGE_MODULE && page_like && ctx.options.rewrite_image_imports {
        return match default_local(&import) {
            Some(local) => {
                debug!(local = %local, "rewriting next/image import");
                ctx.required_packages.insert(IMAGE_PACKAGE.to_string());
                Rewrite::Replace(named_import(&[("Image", local.as_str())], IMAGE_PACKAGE))
            }
            None => Rewrite::Remove,
        };
    }

    if is_legacy_import(&src) {
        debug!(src = %src, "removing import");
        return Rewrite::Remove;
    }

    if src == LINK_MODULE && page_like {
        if let Some(local) = default_local(&import) {
            return Rewrite::Replace(named_import(
                &[(RouterSymbol::Link.as_str(), local.as_str())],
                ROUTER_PACKAGE,
            ));
        }
    }

    if is_stylesheet_import(&src) && import.specifiers.is_empty() && page_like {
        let link = StylesheetLink::from_source(&src);
        if ctx.options.kind != TransformKind::RootLayout {
            debug!(src = %src, binding = %link.binding, "binding page stylesheet");
            return Rewrite::Replace(default_import(&link.binding, &src));
        }

        let url = if ctx.options.font_aware() {
            format!("{}?url", src)
        } else {
            src.clone()
        };
        let replacement = default_import(&link.binding, &url);
        ctx.stylesheet_links.push(link);
        return Rewrite::Replace(replacement);
    }

    Rewrite::Keep(import)
}

/// Local name of the default specifier
fn default_local(import: &ImportDecl) -> Option<String> {
    import.specifiers.iter().find_map(|specifier| match specifier {
        ImportSpecifier::Default(default) => Some(default.local.sym.to_string()),
        _ => None,
    })
}
