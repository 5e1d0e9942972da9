//! Font instance elimination
//!
//! Root layouts often create font instances (`const inter = Inter({...})`)
//! only to put `inter.className` on an element. Fonts are loaded through
//! stylesheets after migration, so such instances are removed together with
//! their `className` references and, once nothing calls it any more, the
//! font factory import.
//!
//! The pass runs in three phases over a complete reference analysis, so no
//! removal decision depends on what an earlier removal already touched:
//!
//! 1. instances referenced only inside `className={...}` are removed
//! 2. those references are replaced with `""` and the attribute is folded
//! 3. factory specifiers left without references are dropped

use std::collections::{HashMap, HashSet};

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_mut_type, VisitMut, VisitMutWith};
use tracing::debug;

use crate::analysis::{analyze_references, ReferenceCount};
use crate::builders::{str_expr, str_lit};
use crate::eval::{collapse_whitespace, evaluate};
use crate::matchers::{as_import, declarator_name, import_source, is_font_factory_import, jsx_attr_name, member_root};
use crate::passes::{PassContext, PassResult, TransformPass};

pub struct FontElimination;

impl TransformPass for FontElimination {
    fn name(&self) -> &'static str {
        "font-elimination"
    }

    fn run(&self, module: &mut Module, _ctx: &mut PassContext) -> PassResult {
        let factories = font_factories(module);
        if factories.is_empty() {
            return PassResult::default();
        }

        let instances = font_instances(module, &factories);
        let candidates: HashSet<String> = instances.keys().cloned().collect();
        let analysis = analyze_references(module, &candidates);
        let removed: HashSet<String> = candidates
            .into_iter()
            .filter(|name| analysis.is_class_name_only(name))
            .collect();

        remove_instances(module, &removed);

        let mut cleanup = ClassNameCleanup {
            removed: &removed,
            simplified: 0,
            dropped: 0,
        };
        if !removed.is_empty() {
            module.visit_mut_with(&mut cleanup);
        }

        // Only factories whose instances were removed are candidates, and
        // only while nothing else still refers to them.
        let marked: HashSet<String> = instances
            .iter()
            .filter(|(instance, _)| removed.contains(*instance))
            .map(|(_, factory)| factory.clone())
            .collect();
        let remaining = analyze_references(module, &marked);
        let unused: HashSet<String> = marked
            .into_iter()
            .filter(|factory| remaining.count(factory) == ReferenceCount::default())
            .collect();
        let imports_dropped = remove_factory_specifiers(module, &unused);

        debug!(
            instances = removed.len(),
            attributes_simplified = cleanup.simplified,
            attributes_dropped = cleanup.dropped,
            imports_dropped,
            "eliminated font instances"
        );

        PassResult {
            modified: !removed.is_empty(),
            warnings: vec![],
        }
    }
}

/// Local names imported from font modules
fn font_factories(module: &Module) -> HashSet<String> {
    module
        .body
        .iter()
        .filter_map(as_import)
        .filter(|import| is_font_factory_import(import_source(import)))
        .flat_map(|import| import.specifiers.iter().map(specifier_local))
        .collect()
}

fn specifier_local(specifier: &ImportSpecifier) -> String {
    match specifier {
        ImportSpecifier::Named(named) => named.local.sym.to_string(),
        ImportSpecifier::Default(default) => default.local.sym.to_string(),
        ImportSpecifier::Namespace(namespace) => namespace.local.sym.to_string(),
    }
}

/// Top-level `const x = Factory(...)` declarators: instance name → factory
///
/// Exported declarations are never candidates.
fn font_instances(module: &Module, factories: &HashSet<String>) -> HashMap<String, String> {
    let mut instances = HashMap::new();
    for item in &module.body {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            continue;
        };
        for decl in &var.decls {
            let (Some(name), Some(factory)) = (declarator_name(decl), factory_call(decl, factories))
            else {
                continue;
            };
            instances.insert(name.to_string(), factory.to_string());
        }
    }
    instances
}

fn factory_call<'a>(decl: &'a VarDeclarator, factories: &HashSet<String>) -> Option<&'a str> {
    let Expr::Call(CallExpr {
        callee: Callee::Expr(callee),
        ..
    }) = decl.init.as_deref()?
    else {
        return None;
    };
    match &**callee {
        Expr::Ident(ident) if factories.contains(&*ident.sym) => Some(&*ident.sym),
        _ => None,
    }
}

/// Drop removed declarators, and declarations left without any
fn remove_instances(module: &mut Module, removed: &HashSet<String>) {
    if removed.is_empty() {
        return;
    }
    module.body.retain_mut(|item| {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            return true;
        };
        let before = var.decls.len();
        var.decls
            .retain(|decl| !declarator_name(decl).is_some_and(|name| removed.contains(name)));
        before == var.decls.len() || !var.decls.is_empty()
    });
}

/// Drop the given specifiers from font imports; returns how many imports went away
fn remove_factory_specifiers(module: &mut Module, unused: &HashSet<String>) -> usize {
    if unused.is_empty() {
        return 0;
    }
    let before = module.body.len();
    module.body.retain_mut(|item| {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            return true;
        };
        if !is_font_factory_import(import_source(import)) {
            return true;
        }
        import
            .specifiers
            .retain(|specifier| !unused.contains(&specifier_local(specifier)));
        !import.specifiers.is_empty()
    });
    before - module.body.len()
}

struct ClassNameCleanup<'a> {
    removed: &'a HashSet<String>,
    simplified: usize,
    dropped: usize,
}

enum Cleanup {
    Untouched,
    Simplified,
    Dropped,
}

impl ClassNameCleanup<'_> {
    fn clean(&self, attr: &mut JSXAttr) -> Cleanup {
        if jsx_attr_name(attr) != Some("className") {
            return Cleanup::Untouched;
        }
        let Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        })) = &mut attr.value
        else {
            return Cleanup::Untouched;
        };

        let mut replacer = FontReferenceReplacer {
            removed: self.removed,
            replaced: 0,
        };
        expr.visit_mut_with(&mut replacer);
        if replacer.replaced == 0 {
            return Cleanup::Untouched;
        }

        let evaluation = evaluate(expr);
        if !evaluation.is_constant {
            return Cleanup::Simplified;
        }

        let value = collapse_whitespace(&evaluation.value);
        if value.is_empty() {
            return Cleanup::Dropped;
        }
        attr.value = Some(JSXAttrValue::Lit(Lit::Str(str_lit(&value))));
        Cleanup::Simplified
    }
}

impl VisitMut for ClassNameCleanup<'_> {
    noop_visit_mut_type!();

    fn visit_mut_jsx_opening_element(&mut self, element: &mut JSXOpeningElement) {
        element.visit_mut_children_with(self);

        let mut simplified = 0;
        let mut dropped = 0;
        element.attrs.retain_mut(|attr| {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                return true;
            };
            match self.clean(attr) {
                Cleanup::Untouched => true,
                Cleanup::Simplified => {
                    simplified += 1;
                    true
                }
                Cleanup::Dropped => {
                    dropped += 1;
                    false
                }
            }
        });
        self.simplified += simplified;
        self.dropped += dropped;
    }
}

/// Replaces removed instances, with any member chain hanging off them, by `""`
struct FontReferenceReplacer<'a> {
    removed: &'a HashSet<String>,
    replaced: usize,
}

impl VisitMut for FontReferenceReplacer<'_> {
    noop_visit_mut_type!();

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if matches!(expr, Expr::Ident(_) | Expr::Member(_)) {
            if let Some(root) = member_root(expr) {
                if self.removed.contains(&*root.sym) {
                    *expr = *str_expr("");
                    self.replaced += 1;
                    return;
                }
            }
        }
        expr.visit_mut_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_support::{options, run_pass};
    use crate::passes::TransformKind;

    fn eliminate(source: &str) -> (String, PassResult) {
        let mut ctx = PassContext::new(options(TransformKind::RootLayout));
        run_pass(&FontElimination, source, &mut ctx)
    }

    #[test]
    fn test_class_name_only_font_removed() {
        let (out, result) = eliminate(
            r#"import { Inter } from "next/font/google";
const inter = Inter({ subsets: ["latin"] });
function RootLayout() {
    return <html><body className={inter.className}>hi</body></html>;
}
"#,
        );
        assert!(result.modified);
        assert!(!out.contains("Inter"));
        assert!(!out.contains("inter"));
        assert!(!out.contains("next/font"));
        assert!(!out.contains("className"));
        assert!(out.contains("<body>hi</body>"));
    }

    #[test]
    fn test_template_class_name_folded() {
        let (out, _) = eliminate(
            r#"import { Inter } from "next/font/google";
const inter = Inter({ subsets: ["latin"] });
const a = <body className={`${inter.className}   flex  `}>x</body>;
"#,
        );
        assert!(out.contains("<body className=\"flex\">"), "{}", out);
        assert!(!out.contains("next/font"));
    }

    #[test]
    fn test_deep_member_reference() {
        let (out, _) = eliminate(
            r#"import { Roboto_Mono } from "next/font/google";
const mono = Roboto_Mono({});
const a = <div className={mono.style.fontFamily + " p-2"} />;
"#,
        );
        assert!(out.contains("className=\"p-2\""));
        assert!(!out.contains("Roboto_Mono"));
    }

    #[test]
    fn test_font_used_elsewhere_is_kept() {
        let (out, result) = eliminate(
            r#"import { Inter } from "next/font/google";
const inter = Inter({ subsets: ["latin"] });
const family = inter.style.fontFamily;
const a = <body className={inter.className}>x</body>;
"#,
        );
        assert!(!result.modified);
        assert!(out.contains("const inter = Inter("));
        assert!(out.contains("className={inter.className}"));
        assert!(out.contains("next/font/google"));
    }

    #[test]
    fn test_shared_import_keeps_retained_factory() {
        let (out, _) = eliminate(
            r#"import { Inter, Lora } from "next/font/google";
const inter = Inter({});
const lora = Lora({});
export const serif = lora.variable;
const a = <body className={`${inter.variable} ${lora.variable}`}>x</body>;
"#,
        );
        assert!(!out.contains("Inter"));
        assert!(out.contains("import { Lora } from \"next/font/google\""));
        assert!(out.contains("const lora = Lora({})"));
        assert!(out.contains("${lora.variable}"));
    }

    #[test]
    fn test_non_constant_class_name_partially_simplified() {
        let (out, _) = eliminate(
            r#"import { Inter } from "next/font/google";
const inter = Inter({});
const a = <body className={cn(inter.className, "flex")}>x</body>;
"#,
        );
        assert!(out.contains("className={cn(\"\", \"flex\")}"), "{}", out);
        assert!(!out.contains("next/font"));
    }

    #[test]
    fn test_shared_declaration_keeps_other_declarators() {
        let (out, _) = eliminate(
            r#"import localFont from "next/font/local";
const brand = localFont({ src: "./brand.woff2" }), size = 4;
const a = <h1 className={brand.className}>x</h1>;
"#,
        );
        assert!(out.contains("const size = 4"));
        assert!(!out.contains("localFont"));
    }

    #[test]
    fn test_no_font_imports_is_noop() {
        let (_, result) = eliminate("const a = <div className={x.y} />;\n");
        assert!(!result.modified);
    }
}
