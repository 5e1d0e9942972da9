//! Pattern matchers
//!
//! Pure predicates over swc nodes. Nothing in here mutates the tree.

use swc_core::ecma::ast::*;

use crate::symbols::HTTP_METHODS;

/// Imports removed outright
pub const LEGACY_MODULES: [&str; 3] = ["next", "next/script", "next/image"];

pub const LINK_MODULE: &str = "next/link";
pub const IMAGE_MODULE: &str = "next/image";
pub const NAVIGATION_MODULE: &str = "next/navigation";
pub const FONT_MODULE_PREFIX: &str = "next/font";

pub fn is_legacy_import(src: &str) -> bool {
    LEGACY_MODULES.contains(&src)
}

pub fn is_font_factory_import(src: &str) -> bool {
    src.starts_with(FONT_MODULE_PREFIX)
}

pub fn is_stylesheet_import(src: &str) -> bool {
    src.ends_with(".css")
}

/// The import declaration of a module item, if it is one
pub fn as_import(item: &ModuleItem) -> Option<&ImportDecl> {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import),
        _ => None,
    }
}

pub fn import_source(import: &ImportDecl) -> &str {
    &*import.src.value
}

/// Number of string-literal statements at the very top of the module
pub fn prologue_len(module: &Module) -> usize {
    module
        .body
        .iter()
        .take_while(|item| directive_value(item).is_some())
        .count()
}

/// Index just past the directive prologue and the imports that follow it
pub fn leading_import_count(module: &Module) -> usize {
    let prologue = prologue_len(module);
    prologue
        + module.body[prologue..]
            .iter()
            .take_while(|item| as_import(item).is_some())
            .count()
}

/// The value of a string-literal expression statement
pub fn directive_value(item: &ModuleItem) -> Option<&str> {
    match item {
        ModuleItem::Stmt(Stmt::Expr(ExprStmt { expr, .. })) => match &**expr {
            Expr::Lit(Lit::Str(s)) => Some(&*s.value),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_use_client(item: &ModuleItem) -> bool {
    directive_value(item) == Some("use client")
}

/// Strip `as`, `satisfies`, `as const` and parentheses around an expression
pub fn unwrap_type_wrappers(mut expr: &Expr) -> &Expr {
    loop {
        expr = match expr {
            Expr::Paren(ParenExpr { expr, .. })
            | Expr::TsAs(TsAsExpr { expr, .. })
            | Expr::TsSatisfies(TsSatisfiesExpr { expr, .. })
            | Expr::TsConstAssertion(TsConstAssertion { expr, .. }) => &**expr,
            _ => return expr,
        };
    }
}

/// A declarator binding a plain identifier, returning that name
pub fn declarator_name(decl: &VarDeclarator) -> Option<&str> {
    match &decl.name {
        Pat::Ident(binding) => Some(&*binding.id.sym),
        _ => None,
    }
}

/// `export const|let metadata = { ... }`
///
/// Returns the index of the `metadata` declarator within the declaration and
/// the object literal it is initialized with.
pub fn metadata_export(item: &ModuleItem) -> Option<(usize, &ObjectLit)> {
    let ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
        decl: Decl::Var(var),
        ..
    })) = item
    else {
        return None;
    };

    if var.kind == VarDeclKind::Var {
        return None;
    }

    var.decls.iter().enumerate().find_map(|(index, decl)| {
        if declarator_name(decl) != Some("metadata") {
            return None;
        }
        match unwrap_type_wrappers(decl.init.as_deref()?) {
            Expr::Object(object) => Some((index, object)),
            _ => None,
        }
    })
}

/// Shape of a recognized default export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultExportShape<'a> {
    /// `export default function Name() {}` or its anonymous form
    Function(Option<&'a str>),
    /// `export default () => ...`
    Arrow,
    /// `export default Name;`
    Reference(&'a str),
}

pub fn default_export_shape(item: &ModuleItem) -> Option<DefaultExportShape<'_>> {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
            decl: DefaultDecl::Fn(FnExpr { ident, .. }),
            ..
        })) => Some(DefaultExportShape::Function(
            ident.as_ref().map(|ident| &*ident.sym),
        )),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(ExportDefaultExpr {
            expr, ..
        })) => match unwrap_type_wrappers(expr) {
            Expr::Arrow(_) => Some(DefaultExportShape::Arrow),
            Expr::Ident(ident) => Some(DefaultExportShape::Reference(&*ident.sym)),
            _ => None,
        },
        _ => None,
    }
}

/// JSX components with dedicated rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownComponent {
    Image,
    Link,
}

/// Plain identifier name of a JSX element (`div`, `Link`), not member names
pub fn jsx_tag(name: &JSXElementName) -> Option<&str> {
    match name {
        JSXElementName::Ident(ident) => Some(&*ident.sym),
        _ => None,
    }
}

pub fn known_component(element: &JSXElement) -> Option<KnownComponent> {
    match jsx_tag(&element.opening.name)? {
        "Image" => Some(KnownComponent::Image),
        "Link" => Some(KnownComponent::Link),
        _ => None,
    }
}

pub fn jsx_attr_name(attr: &JSXAttr) -> Option<&str> {
    match &attr.name {
        JSXAttrName::Ident(name) => Some(&*name.sym),
        _ => None,
    }
}

/// `{children}` as a child of a JSX element
pub fn is_children_placeholder(child: &JSXElementChild) -> bool {
    match child {
        JSXElementChild::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        }) => matches!(&**expr, Expr::Ident(ident) if &*ident.sym == "children"),
        _ => false,
    }
}

pub fn is_element_named(child: &JSXElementChild, tag: &str) -> bool {
    match child {
        JSXElementChild::JSXElement(element) => jsx_tag(&element.opening.name) == Some(tag),
        _ => false,
    }
}

/// The identifier at the root of a member chain: `inter` in `inter.style.x`
pub fn member_root(expr: &Expr) -> Option<&Ident> {
    match expr {
        Expr::Ident(ident) => Some(ident),
        Expr::Member(MemberExpr { obj, .. }) => member_root(obj),
        _ => None,
    }
}

pub fn is_http_method(name: &str) -> bool {
    HTTP_METHODS.contains(&name)
}
