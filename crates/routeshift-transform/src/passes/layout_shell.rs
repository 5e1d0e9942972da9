//! Layout component rewriting
//!
//! Standalone `{children}` becomes `<Outlet />` and the component loses its
//! parameters. In the root layout the document shell also gains
//! `<head><HeadContent /></head>` and `<Scripts />`.

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_mut_type, noop_visit_type, Visit, VisitMut, VisitMutWith, VisitWith};
use tracing::debug;

use crate::builders::{head_element, jsx_text, router_element};
use crate::matchers::{declarator_name, is_children_placeholder, is_element_named, jsx_tag};
use crate::passes::{insert_all, PassContext, PassResult, TransformKind, TransformPass, TransformWarning};
use crate::symbols::RouterSymbol;

pub struct LayoutShell;

impl TransformPass for LayoutShell {
    fn name(&self) -> &'static str {
        "layout-shell"
    }

    fn run(&self, module: &mut Module, ctx: &mut PassContext) -> PassResult {
        let name = ctx.component_name();
        let Some(mut component) = find_component_mut(module, &name) else {
            return PassResult {
                modified: false,
                warnings: vec![TransformWarning::new(
                    "W-SHELL-002",
                    format!("layout component '{}' not found, JSX left unchanged", name),
                )],
            };
        };

        let insert_shell = ctx.options.kind == TransformKind::RootLayout;
        let params_removed = component.clear_params();
        let mut shell = ShellRewriter {
            insert_shell,
            ..Default::default()
        };
        component.visit_body_mut(&mut shell);

        debug!(
            component = %name,
            outlets = shell.outlets,
            heads = shell.heads,
            scripts = shell.scripts,
            "rewrote layout shell"
        );

        let mut warnings = Vec::new();
        if insert_shell && shell.heads == 0 {
            warnings.push(TransformWarning::new(
                "W-SHELL-001",
                "no <html> element with a <body> child, <HeadContent /> not inserted",
            ));
        }
        if insert_shell && shell.scripts == 0 {
            warnings.push(TransformWarning::new(
                "W-SHELL-003",
                "no {children} or <Outlet /> directly inside <body>, <Scripts /> not inserted",
            ));
        }
        if params_removed && component.references_children() {
            warnings.push(TransformWarning::new(
                "W-SHELL-004",
                format!("'{}' still refers to children after its parameters were removed", name),
            ));
        }

        PassResult {
            modified: params_removed || shell.outlets + shell.heads + shell.scripts > 0,
            warnings,
        }
    }
}

/// The function implementing a component, however it was declared
enum ComponentMut<'a> {
    Function(&'a mut Function),
    Arrow(&'a mut ArrowExpr),
}

impl ComponentMut<'_> {
    /// Remove all parameters, reporting whether there were any
    fn clear_params(&mut self) -> bool {
        let had_params = match self {
            ComponentMut::Function(function) => !function.params.is_empty(),
            ComponentMut::Arrow(arrow) => !arrow.params.is_empty(),
        };
        match self {
            ComponentMut::Function(function) => function.params.clear(),
            ComponentMut::Arrow(arrow) => arrow.params.clear(),
        }
        had_params
    }

    fn visit_body_mut(&mut self, visitor: &mut impl VisitMut) {
        match self {
            ComponentMut::Function(function) => function.body.visit_mut_with(visitor),
            ComponentMut::Arrow(arrow) => arrow.body.visit_mut_with(visitor),
        }
    }

    fn references_children(&self) -> bool {
        let mut finder = ChildrenFinder::default();
        match self {
            ComponentMut::Function(function) => function.body.visit_with(&mut finder),
            ComponentMut::Arrow(arrow) => arrow.body.visit_with(&mut finder),
        }
        finder.found
    }
}

fn find_component_mut<'a>(module: &'a mut Module, name: &str) -> Option<ComponentMut<'a>> {
    module.body.iter_mut().find_map(|item| {
        let decl = match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. })) => decl,
            _ => return None,
        };

        match decl {
            Decl::Fn(fn_decl) if &*fn_decl.ident.sym == name => {
                Some(ComponentMut::Function(&mut fn_decl.function))
            }
            Decl::Var(var) => var
                .decls
                .iter_mut()
                .find(|decl| declarator_name(decl) == Some(name))
                .and_then(|decl| match decl.init.as_deref_mut()? {
                    Expr::Arrow(arrow) => Some(ComponentMut::Arrow(arrow)),
                    Expr::Fn(FnExpr { function, .. }) => Some(ComponentMut::Function(function)),
                    Expr::Paren(ParenExpr { expr, .. }) => match &mut **expr {
                        Expr::Arrow(arrow) => Some(ComponentMut::Arrow(arrow)),
                        _ => None,
                    },
                    _ => None,
                }),
            _ => None,
        }
    })
}

#[derive(Default)]
struct ShellRewriter {
    insert_shell: bool,
    heads: usize,
    scripts: usize,
    outlets: usize,
}

impl ShellRewriter {
    fn insert_head(&mut self, html: &mut JSXElement) {
        if let Some(head) = html.children.iter_mut().find_map(|child| match child {
            JSXElementChild::JSXElement(element) if jsx_tag(&element.opening.name) == Some("head") => {
                Some(element)
            }
            _ => None,
        }) {
            head.children.insert(0, router_element(RouterSymbol::HeadContent));
            if head.opening.self_closing {
                head.opening.self_closing = false;
                head.closing = Some(JSXClosingElement {
                    span: head.opening.span,
                    name: head.opening.name.clone(),
                });
            }
            self.heads += 1;
            return;
        }

        if let Some(body) = html
            .children
            .iter()
            .position(|child| is_element_named(child, "body"))
        {
            insert_all(&mut html.children, body, [jsx_text("\n"), head_element()]);
            self.heads += 1;
        }
    }

    fn insert_scripts(&mut self, body: &mut JSXElement) {
        if let Some(last) = body
            .children
            .iter()
            .rposition(|child| is_children_placeholder(child) || is_element_named(child, "Outlet"))
        {
            insert_all(
                &mut body.children,
                last + 1,
                [jsx_text("\n"), router_element(RouterSymbol::Scripts)],
            );
            self.scripts += 1;
        }
    }
}

impl VisitMut for ShellRewriter {
    noop_visit_mut_type!();

    fn visit_mut_jsx_element(&mut self, element: &mut JSXElement) {
        if self.insert_shell {
            match jsx_tag(&element.opening.name) {
                Some("html") => self.insert_head(element),
                Some("body") => self.insert_scripts(element),
                _ => {}
            }
        }
        element.visit_mut_children_with(self);
    }

    fn visit_mut_jsx_element_child(&mut self, child: &mut JSXElementChild) {
        if is_children_placeholder(child) {
            *child = router_element(RouterSymbol::Outlet);
            self.outlets += 1;
            return;
        }
        child.visit_mut_children_with(self);
    }
}

#[derive(Default)]
struct ChildrenFinder {
    found: bool,
}

impl Visit for ChildrenFinder {
    noop_visit_type!();

    fn visit_ident(&mut self, ident: &Ident) {
        if &*ident.sym == "children" {
            self.found = true;
        }
    }

    fn visit_member_prop(&mut self, prop: &MemberProp) {
        // `props.children` is a property, not the binding
        if let MemberProp::Computed(computed) = prop {
            computed.visit_with(self);
        }
    }
}
