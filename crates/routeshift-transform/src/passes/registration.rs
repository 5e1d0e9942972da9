//! Route registration
//!
//! Builds `export const Route = ...` from what earlier passes recorded in the
//! context. A `metadata` export is replaced by the registration; without one
//! the registration is inserted right after the leading imports. A component
//! bound by a `const` further down is moved above it so the registration
//! never reads an uninitialized binding.

use swc_core::ecma::ast::*;
use tracing::debug;

use crate::builders::{meta_tags_from_object, root_meta_defaults, HeadOptions, MetaTag, RouteRegistration};
use crate::matchers::{declarator_name, leading_import_count, metadata_export, unwrap_type_wrappers};
use crate::passes::{PassContext, PassResult, TransformKind, TransformPass};
use crate::symbols::ComponentSlot;

pub struct RegisterRoute;

impl TransformPass for RegisterRoute {
    fn name(&self) -> &'static str {
        "register-route"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        let kind = ctx.options.kind;
        let has_head = matches!(
            kind,
            TransformKind::Page | TransformKind::Layout | TransformKind::RootLayout
        );

        let metadata = if has_head { take_metadata(module) } else { None };
        ctx.metadata_found = metadata.is_some();

        let (index, tags) = match metadata {
            Some((index, tags)) => (index, tags),
            None => (leading_import_count(module), Vec::new()),
        };

        let index = if kind == TransformKind::Api {
            index
        } else {
            place_component(module, index, &ctx.component_name())
        };

        let registration = build_registration(ctx, has_head.then_some(tags));
        debug!(
            kind = ?kind,
            index,
            metadata = ctx.metadata_found,
            "inserting route registration"
        );
        module.body.insert(index, registration.to_item());

        PassResult {
            modified: true,
            warnings: vec![],
        }
    }
}

fn build_registration(ctx: &PassContext, metadata: Option<Vec<MetaTag>>) -> RouteRegistration {
    let kind = ctx.options.kind;

    let head = metadata.map(|tags| {
        if kind == TransformKind::RootLayout {
            let mut meta = root_meta_defaults();
            meta.extend(tags);
            HeadOptions {
                meta,
                links: Some(ctx.stylesheet_links.clone()),
            }
        } else {
            HeadOptions {
                meta: tags,
                links: None,
            }
        }
    });

    let slot = match kind {
        TransformKind::Page | TransformKind::Layout | TransformKind::RootLayout => {
            Some(ComponentSlot::Component)
        }
        TransformKind::Loading => Some(ComponentSlot::PendingComponent),
        TransformKind::Error => Some(ComponentSlot::ErrorComponent),
        TransformKind::Api => None,
    };

    RouteRegistration {
        factory: ctx.options.route_factory(),
        head,
        component: slot.map(|slot| (slot, ctx.component_name())),
        handlers: (kind == TransformKind::Api).then(|| ctx.handlers.clone()),
    }
}

/// Where the registration goes once the component binding is initialized
///
/// A variable-bound component below `index` whose initializer is a function
/// or arrow is moved up to `index`. Any other initializer could depend on
/// code between the two, so the registration follows the declaration instead.
fn place_component(module: &mut Module, index: usize, name: &str) -> usize {
    let Some((position, lazy)) = module
        .body
        .iter()
        .enumerate()
        .skip(index)
        .find_map(|(position, item)| {
            component_binding(item, name).map(|init| {
                let lazy = matches!(unwrap_type_wrappers(init), Expr::Arrow(_) | Expr::Fn(_));
                (position, lazy)
            })
        })
    else {
        return index;
    };

    if lazy {
        let item = module.body.remove(position);
        module.body.insert(index, item);
        debug!(component = name, from = position, to = index, "moved component above registration");
        index + 1
    } else {
        position + 1
    }
}

/// Initializer of a top-level declaration binding only `name`
fn component_binding<'a>(item: &'a ModuleItem, name: &str) -> Option<&'a Expr> {
    let var = match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => var,
        _ => return None,
    };
    match var.decls.as_slice() {
        [decl] if declarator_name(decl) == Some(name) => decl.init.as_deref(),
        _ => None,
    }
}

/// Remove the `metadata` export, returning where it was and its meta tags
///
/// Other declarators sharing the declaration stay exported where they were.
fn take_metadata(module: &mut Module) -> Option<(usize, Vec<MetaTag>)> {
    let (index, decl_index, tags) = module.body.iter().enumerate().find_map(|(index, item)| {
        metadata_export(item).map(|(decl_index, object)| (index, decl_index, meta_tags_from_object(object)))
    })?;

    let keep_rest = match &mut module.body[index] {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => {
            var.decls.remove(decl_index);
            !var.decls.is_empty()
        }
        _ => false,
    };
    if !keep_rest {
        module.body.remove(index);
    }

    Some((index, tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::StylesheetLink;
    use crate::passes::test_support::{options, run_pass};

    #[test]
    fn test_metadata_replaced_in_place() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        ctx.component_name = Some("Home".to_string());
        let (out, result) = run_pass(
            &RegisterRoute,
            r#"import { a } from "a";
const x = 1;
export const metadata = { title: "Home", description: "Welcome", keywords: "k" };
function Home() { return null; }
"#,
            &mut ctx,
        );
        assert!(result.modified);
        assert!(ctx.metadata_found);
        assert!(!out.contains("metadata"));

        let route = out.find("export const Route = createFileRoute(\"/\")").unwrap();
        assert!(out.find("const x = 1").unwrap() < route);
        assert!(route < out.find("function Home").unwrap());

        let title = out.find("title: \"Home\"").unwrap();
        let description = out.find("name: \"description\"").unwrap();
        let keywords = out.find("name: \"keywords\"").unwrap();
        assert!(title < description && description < keywords);
        assert!(out.contains("content: \"Welcome\""));
        assert!(out.contains("component: Home"));
    }

    #[test]
    fn test_default_registration_after_imports() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &RegisterRoute,
            "import { a } from \"a\";\nimport b from \"b\";\nconst c = a + b;\n",
            &mut ctx,
        );
        assert!(!ctx.metadata_found);
        let route = out.find("export const Route").unwrap();
        assert!(out.find("import b").unwrap() < route);
        assert!(route < out.find("const c").unwrap());
        assert!(out.contains("meta: []"));
        assert!(out.contains("component: Component"));
    }

    #[test]
    fn test_registration_after_directive_and_imports() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &RegisterRoute,
            "\"use strict\";\nimport a from \"a\";\nfunction P() { return null; }\n",
            &mut ctx,
        );
        assert!(out.starts_with("\"use strict\""));
        let route = out.find("export const Route").unwrap();
        assert!(out.find("import a").unwrap() < route);
        assert!(route < out.find("function P").unwrap());
    }

    #[test]
    fn test_arrow_component_moved_above_registration() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &RegisterRoute,
            "import a from \"a\";\nconst x = a;\nconst Component = () => <main />;\n",
            &mut ctx,
        );
        let component = out.find("const Component").unwrap();
        let route = out.find("export const Route").unwrap();
        assert!(out.find("import a").unwrap() < component);
        assert!(component < route);
        assert!(route < out.find("const x").unwrap());
    }

    #[test]
    fn test_registration_follows_eager_component() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &RegisterRoute,
            "import { memo } from \"react\";\nfunction Inner() { return null; }\nconst Component = memo(Inner);\n",
            &mut ctx,
        );
        let component = out.find("const Component = memo(Inner)").unwrap();
        assert!(component < out.find("export const Route").unwrap());
        assert!(out.find("function Inner").unwrap() < component);
    }

    #[test]
    fn test_registration_at_top_without_imports() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(&RegisterRoute, "const c = 1;\n", &mut ctx);
        assert!(out.starts_with("export const Route"));
    }

    #[test]
    fn test_root_layout_defaults_and_links() {
        let mut ctx = PassContext::new(options(TransformKind::RootLayout));
        ctx.stylesheet_links = vec![StylesheetLink::from_source("./globals.css")];
        let (out, _) = run_pass(
            &RegisterRoute,
            "export const metadata = { title: \"App\" };\nfunction RootLayout() { return null; }\n",
            &mut ctx,
        );
        assert!(out.contains("createRootRoute({"));
        let charset = out.find("charSet: \"utf-8\"").unwrap();
        let viewport = out.find("name: \"viewport\"").unwrap();
        let title = out.find("title: \"App\"").unwrap();
        assert!(charset < viewport && viewport < title);
        assert!(out.contains("href: globalscss"));
        assert!(out.contains("rel: \"stylesheet\""));
        assert!(out.contains("component: RootLayout"));
    }

    #[test]
    fn test_metadata_sibling_declarators_kept() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &RegisterRoute,
            "export const metadata = { title: \"T\" }, revalidate = 60;\n",
            &mut ctx,
        );
        assert!(ctx.metadata_found);
        assert!(out.contains("export const revalidate = 60"));
        assert!(out.find("export const Route").unwrap() < out.find("revalidate").unwrap());
    }

    #[test]
    fn test_non_literal_metadata_left_alone() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(&RegisterRoute, "export const metadata = build();\n", &mut ctx);
        assert!(!ctx.metadata_found);
        assert!(out.contains("export const metadata = build()"));
        assert!(out.contains("export const Route"));
    }

    #[test]
    fn test_loading_and_error_slots() {
        let mut ctx = PassContext::new(options(TransformKind::Loading));
        let (out, _) = run_pass(&RegisterRoute, "function Loading() { return null; }\n", &mut ctx);
        assert!(out.contains("pendingComponent: Loading"));
        assert!(!out.contains("head"));

        let mut ctx = PassContext::new(options(TransformKind::Error));
        let (out, _) = run_pass(&RegisterRoute, "function ErrorBoundary() { return null; }\n", &mut ctx);
        assert!(out.contains("errorComponent: ErrorBoundary"));
        assert!(out.contains("createFileRoute(\"/dashboard\")"));
    }

    #[test]
    fn test_api_handlers() {
        let mut ctx = PassContext::new(options(TransformKind::Api));
        ctx.handlers = vec!["GET".to_string(), "POST".to_string()];
        let (out, _) = run_pass(&RegisterRoute, "async function GET() {}\n", &mut ctx);
        assert!(out.contains("createFileRoute(\"/api/users\")"));
        assert!(out.contains("handlers:"));
        assert!(!out.contains("component"));
    }
}
