//! Reference analysis for candidate bindings
//!
//! Counts how often each candidate name is referenced, split into references
//! that sit inside a `className={...}` JSX attribute and references anywhere
//! else. A binding whose every reference is inside `className` can be
//! removed once those references are rewritten.

use std::collections::{HashMap, HashSet};

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_type, Visit, VisitWith};

use crate::matchers::{declarator_name, jsx_attr_name};

/// References to one name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCount {
    /// Inside a `className` expression container
    pub class_name: usize,
    /// Anywhere else, including shadowing bindings and exports
    pub other: usize,
}

/// Result of reference analysis on a module
#[derive(Debug, Clone, Default)]
pub struct ReferenceAnalysis {
    pub counts: HashMap<String, ReferenceCount>,
}

impl ReferenceAnalysis {
    pub fn count(&self, name: &str) -> ReferenceCount {
        self.counts.get(name).copied().unwrap_or_default()
    }

    /// Every reference to `name` is inside a `className` attribute
    pub fn is_class_name_only(&self, name: &str) -> bool {
        self.count(name).other == 0
    }
}

/// Analyze references to `names` across the module
///
/// The binding declarations of top-level declarators named in `names` are
/// not references; any other binding of such a name counts as one.
pub fn analyze_references(module: &Module, names: &HashSet<String>) -> ReferenceAnalysis {
    let mut collector = ReferenceCollector {
        names,
        in_class_name: false,
        analysis: ReferenceAnalysis::default(),
    };

    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => {
                for decl in &var.decls {
                    if declarator_name(decl).is_some_and(|name| names.contains(name)) {
                        decl.init.visit_with(&mut collector);
                    } else {
                        decl.visit_with(&mut collector);
                    }
                }
            }
            _ => item.visit_with(&mut collector),
        }
    }

    collector.analysis
}

struct ReferenceCollector<'a> {
    names: &'a HashSet<String>,
    in_class_name: bool,
    analysis: ReferenceAnalysis,
}

impl ReferenceCollector<'_> {
    fn record(&mut self, name: &str) {
        if !self.names.contains(name) {
            return;
        }
        let count = self.analysis.counts.entry(name.to_string()).or_default();
        if self.in_class_name {
            count.class_name += 1;
        } else {
            count.other += 1;
        }
    }

    fn record_other(&mut self, name: &str) {
        let outer = std::mem::replace(&mut self.in_class_name, false);
        self.record(name);
        self.in_class_name = outer;
    }
}

impl Visit for ReferenceCollector<'_> {
    noop_visit_type!();

    fn visit_jsx_attr(&mut self, attr: &JSXAttr) {
        let is_class_name = jsx_attr_name(attr) == Some("className")
            && matches!(attr.value, Some(JSXAttrValue::JSXExprContainer(_)));

        let outer = std::mem::replace(&mut self.in_class_name, is_class_name);
        attr.visit_children_with(self);
        self.in_class_name = outer;
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Ident(ident) = expr {
            self.record(&ident.sym);
            return;
        }
        expr.visit_children_with(self);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        // `{ inter }` cannot be rewritten to a string in place
        if let Prop::Shorthand(ident) = prop {
            self.record_other(&ident.sym);
            return;
        }
        prop.visit_children_with(self);
    }

    fn visit_binding_ident(&mut self, binding: &BindingIdent) {
        self.record_other(&binding.id.sym);
    }

    fn visit_jsx_element_name(&mut self, name: &JSXElementName) {
        match name {
            JSXElementName::Ident(ident) => self.record_other(&ident.sym),
            JSXElementName::JSXMemberExpr(member) => self.visit_jsx_member_expr(member),
            JSXElementName::JSXNamespacedName(_) => {}
        }
    }

    fn visit_jsx_member_expr(&mut self, member: &JSXMemberExpr) {
        match &member.obj {
            JSXObject::Ident(ident) => self.record_other(&ident.sym),
            JSXObject::JSXMemberExpr(inner) => self.visit_jsx_member_expr(inner),
        }
    }

    fn visit_export_named_specifier(&mut self, specifier: &ExportNamedSpecifier) {
        if let ModuleExportName::Ident(ident) = &specifier.orig {
            self.record_other(&ident.sym);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeshift_syntax::{parse, Dialect};

    fn analyze(source: &str, names: &[&str]) -> ReferenceAnalysis {
        let module = parse(source, Dialect::Tsx).unwrap().module;
        let names: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
        analyze_references(&module, &names)
    }

    #[test]
    fn test_class_name_member_reference() {
        let analysis = analyze(
            r#"
            const inter = Inter({ subsets: ["latin"] });
            export default function L() {
                return <body className={inter.className}>x</body>;
            }
            "#,
            &["inter"],
        );
        assert_eq!(
            analysis.count("inter"),
            ReferenceCount {
                class_name: 1,
                other: 0
            }
        );
        assert!(analysis.is_class_name_only("inter"));
    }

    #[test]
    fn test_deep_member_and_template() {
        let analysis = analyze(
            r#"
            const mono = Mono({});
            const a = <div className={`${mono.style.fontFamily} p-2`} />;
            "#,
            &["mono"],
        );
        assert_eq!(analysis.count("mono").class_name, 1);
        assert!(analysis.is_class_name_only("mono"));
    }

    #[test]
    fn test_reference_outside_class_name_disqualifies() {
        let analysis = analyze(
            r#"
            const inter = Inter({});
            const family = inter.style.fontFamily;
            const a = <div className={inter.className} />;
            "#,
            &["inter"],
        );
        assert_eq!(analysis.count("inter").other, 1);
        assert!(!analysis.is_class_name_only("inter"));
    }

    #[test]
    fn test_other_attribute_disqualifies() {
        let analysis = analyze(
            r#"
            const inter = Inter({});
            const a = <div style={inter.style} className={inter.className} />;
            "#,
            &["inter"],
        );
        assert_eq!(analysis.count("inter").other, 1);
        assert_eq!(analysis.count("inter").class_name, 1);
    }

    #[test]
    fn test_shorthand_and_export_disqualify() {
        let analysis = analyze(
            r#"
            const inter = Inter({});
            const fonts = { inter };
            "#,
            &["inter"],
        );
        assert!(!analysis.is_class_name_only("inter"));

        let analysis = analyze(
            r#"
            const inter = Inter({});
            export { inter };
            "#,
            &["inter"],
        );
        assert!(!analysis.is_class_name_only("inter"));
    }

    #[test]
    fn test_unreferenced_name_is_removable() {
        let analysis = analyze("const inter = Inter({});", &["inter"]);
        assert_eq!(analysis.count("inter"), ReferenceCount::default());
        assert!(analysis.is_class_name_only("inter"));
    }

    #[test]
    fn test_non_candidates_are_ignored() {
        let analysis = analyze("const a = b + c;", &["inter"]);
        assert!(analysis.counts.is_empty());
    }
}
