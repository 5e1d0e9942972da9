//! Navigation hook mapping
//!
//! `next/navigation` hooks are imported from the router package under their
//! router names, and their call sites follow.

use std::collections::HashMap;

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_mut_type, VisitMut, VisitMutWith};
use tracing::debug;

use crate::builders::{ident, str_lit};
use crate::matchers::NAVIGATION_MODULE;
use crate::passes::{PassContext, PassResult, TransformPass, TransformWarning};
use crate::symbols::{RouterSymbol, ROUTER_PACKAGE};

/// Hooks with a differently named router equivalent
const HOOK_MAPPINGS: [(&str, RouterSymbol); 3] = [
    ("useRouter", RouterSymbol::UseNavigate),
    ("usePathname", RouterSymbol::UseLocation),
    ("useSearchParams", RouterSymbol::UseSearch),
];

/// Exports the router package provides under the same name
const SAME_NAME: [&str; 3] = ["useParams", "redirect", "notFound"];

pub struct NavigationHooks;

#[derive(Debug, Clone)]
struct HookRename {
    to: String,
    /// `usePathname()` becomes `useLocation().pathname`
    select_pathname: bool,
}

impl TransformPass for NavigationHooks {
    fn name(&self) -> &'static str {
        "navigation-hooks"
    }

    fn run(&self, module: &mut Module, _ctx: &mut PassContext) -> PassResult {
        let mut renames = HashMap::new();
        let mut warnings = Vec::new();
        let mut modified = false;
        let mut navigate_mapped = false;

        for item in module.body.iter_mut() {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            if &*import.src.value != NAVIGATION_MODULE {
                continue;
            }

            if import.type_only || !import.specifiers.iter().all(is_mappable) {
                warnings.push(TransformWarning::new(
                    "W-NAV-001",
                    "next/navigation import has exports without a router equivalent, left unchanged",
                ));
                continue;
            }

            for specifier in import.specifiers.iter_mut() {
                if let ImportSpecifier::Named(named) = specifier {
                    if map_specifier(named, &mut renames) == Some(RouterSymbol::UseNavigate) {
                        navigate_mapped = true;
                    }
                }
            }
            import.src = Box::new(str_lit(ROUTER_PACKAGE));
            modified = true;
        }

        if navigate_mapped {
            warnings.push(TransformWarning::new(
                "W-NAV-002",
                "useRouter() now returns a navigate function; router method calls need review",
            ));
        }

        if !renames.is_empty() {
            debug!(hooks = renames.len(), "rewriting navigation hook calls");
            module.visit_mut_with(&mut HookCallRewriter { renames: &renames });
        }

        PassResult { modified, warnings }
    }
}

fn imported_name(named: &ImportNamedSpecifier) -> &str {
    match &named.imported {
        Some(ModuleExportName::Ident(ident)) => &*ident.sym,
        Some(ModuleExportName::Str(s)) => &*s.value,
        None => &*named.local.sym,
    }
}

fn is_mappable(specifier: &ImportSpecifier) -> bool {
    match specifier {
        ImportSpecifier::Named(named) => {
            let name = imported_name(named);
            !named.is_type_only
                && (SAME_NAME.contains(&name) || HOOK_MAPPINGS.iter().any(|(from, _)| *from == name))
        }
        _ => false,
    }
}

/// Point the specifier at the router export, recording how call sites change
///
/// Unaliased specifiers are renamed outright; aliased ones keep their local
/// name and only the imported name changes.
fn map_specifier(
    named: &mut ImportNamedSpecifier,
    renames: &mut HashMap<String, HookRename>,
) -> Option<RouterSymbol> {
    let imported = imported_name(named).to_string();
    let (_, symbol) = HOOK_MAPPINGS.iter().find(|(from, _)| *from == imported)?;

    let local = named.local.sym.to_string();
    let select_pathname = *symbol == RouterSymbol::UseLocation;

    if named.imported.is_some() && local != imported {
        named.imported = Some(ModuleExportName::Ident(ident(symbol.as_str())));
        renames.insert(
            local.clone(),
            HookRename {
                to: local,
                select_pathname,
            },
        );
    } else {
        named.imported = None;
        named.local.sym = symbol.as_str().into();
        renames.insert(
            local,
            HookRename {
                to: symbol.as_str().to_string(),
                select_pathname,
            },
        );
    }
    Some(*symbol)
}

struct HookCallRewriter<'a> {
    renames: &'a HashMap<String, HookRename>,
}

impl HookCallRewriter<'_> {
    fn call_rename(&self, expr: &Expr) -> Option<HookRename> {
        let Expr::Call(CallExpr {
            callee: Callee::Expr(callee),
            ..
        }) = expr
        else {
            return None;
        };
        match &**callee {
            Expr::Ident(ident) => self.renames.get(&*ident.sym).cloned(),
            _ => None,
        }
    }
}

impl VisitMut for HookCallRewriter<'_> {
    noop_visit_mut_type!();

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Some(rename) = self.call_rename(expr) {
            if let Expr::Call(call) = expr {
                call.args.visit_mut_with(self);
                if let Callee::Expr(callee) = &mut call.callee {
                    if let Expr::Ident(ident) = &mut **callee {
                        ident.sym = rename.to.as_str().into();
                    }
                }
            }

            if rename.select_pathname {
                let call = std::mem::replace(expr, Expr::Invalid(Invalid { span: DUMMY_SP }));
                *expr = Expr::Member(MemberExpr {
                    span: DUMMY_SP,
                    obj: Box::new(call),
                    prop: MemberProp::Ident(IdentName::new("pathname".into(), DUMMY_SP)),
                });
            }
            return;
        }

        if let Expr::Ident(ident) = expr {
            if let Some(rename) = self.renames.get(&*ident.sym) {
                ident.sym = rename.to.as_str().into();
            }
            return;
        }

        expr.visit_mut_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_support::{options, run_pass};
    use crate::passes::TransformKind;

    #[test]
    fn test_hooks_are_renamed() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, result) = run_pass(
            &NavigationHooks,
            r#"import { useRouter, usePathname, useSearchParams } from "next/navigation";
export default function Nav() {
    const router = useRouter();
    const pathname = usePathname();
    const search = useSearchParams();
    return null;
}
"#,
            &mut ctx,
        );
        assert!(result.modified);
        assert!(out.contains("\"@tanstack/react-router\""));
        assert!(out.contains("useNavigate, useLocation, useSearch"));
        assert!(out.contains("const router = useNavigate()"));
        assert!(out.contains("const pathname = useLocation().pathname"));
        assert!(out.contains("const search = useSearch()"));
        assert!(result.warnings.iter().any(|w| w.code == "W-NAV-002"));
    }

    #[test]
    fn test_same_name_exports_move_package() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, result) = run_pass(
            &NavigationHooks,
            "import { notFound, useParams } from \"next/navigation\";\n",
            &mut ctx,
        );
        assert!(result.modified);
        assert!(result.warnings.is_empty());
        assert!(out.contains("notFound, useParams"));
        assert!(!out.contains("next/navigation"));
    }

    #[test]
    fn test_aliased_hook_keeps_local_name() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, _) = run_pass(
            &NavigationHooks,
            "import { usePathname as usePath } from \"next/navigation\";\nconst p = usePath();\n",
            &mut ctx,
        );
        assert!(out.contains("useLocation as usePath"));
        assert!(out.contains("const p = usePath().pathname"));
    }

    #[test]
    fn test_unknown_exports_leave_import_alone() {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        let (out, result) = run_pass(
            &NavigationHooks,
            "import { useSelectedLayoutSegment, useRouter } from \"next/navigation\";\nconst r = useRouter();\n",
            &mut ctx,
        );
        assert!(!result.modified);
        assert_eq!(result.warnings[0].code, "W-NAV-001");
        assert!(out.contains("next/navigation"));
        assert!(out.contains("const r = useRouter()"));
    }
}
