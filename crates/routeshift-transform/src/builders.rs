//! Node builders
//!
//! Constructors for the syntax the passes insert. Every builder returns a
//! fresh, well-formed subtree with dummy spans.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;

use crate::symbols::{ComponentSlot, RouteFactory, RouterSymbol, ROUTE_BINDING, ROUTER_PACKAGE};

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn ident_expr(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(ident(name)))
}

pub fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

pub fn str_expr(value: &str) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Str(str_lit(value))))
}

/// `key: value`
pub fn key_value(key: &str, value: Box<Expr>) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key: PropName::Ident(IdentName::new(key.into(), DUMMY_SP)),
        value,
    })))
}

pub fn object(props: Vec<PropOrSpread>) -> Box<Expr> {
    Box::new(Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props,
    }))
}

pub fn array(elems: Vec<Box<Expr>>) -> Box<Expr> {
    Box::new(Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: elems
            .into_iter()
            .map(|expr| Some(ExprOrSpread { spread: None, expr }))
            .collect(),
    }))
}

pub fn call(callee: Box<Expr>, args: Vec<Box<Expr>>) -> Box<Expr> {
    Box::new(Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(callee),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect(),
        type_args: None,
    }))
}

/// `() => (<body>)`
///
/// Object bodies are parenthesized so they are not read back as a block.
pub fn thunk(body: Box<Expr>) -> Box<Expr> {
    let body = match *body {
        Expr::Object(_) => Box::new(Expr::Paren(ParenExpr {
            span: DUMMY_SP,
            expr: body,
        })),
        _ => body,
    };
    Box::new(Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![],
        body: Box::new(BlockStmtOrExpr::Expr(body)),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    }))
}

/// `import { a, b as c } from "<src>"` from `(imported, local)` pairs
pub fn named_import(names: &[(&str, &str)], src: &str) -> ModuleItem {
    let specifiers = names
        .iter()
        .map(|(imported, local)| {
            ImportSpecifier::Named(ImportNamedSpecifier {
                span: DUMMY_SP,
                local: ident(local),
                imported: (imported != local).then(|| ModuleExportName::Ident(ident(imported))),
                is_type_only: false,
            })
        })
        .collect();
    import(specifiers, src)
}

/// `import <local> from "<src>"`
pub fn default_import(local: &str, src: &str) -> ModuleItem {
    import(
        vec![ImportSpecifier::Default(ImportDefaultSpecifier {
            span: DUMMY_SP,
            local: ident(local),
        })],
        src,
    )
}

fn import(specifiers: Vec<ImportSpecifier>, src: &str) -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers,
        src: Box::new(str_lit(src)),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }))
}

/// The router-primitive import every transformed file starts with
pub fn router_import(factory: &RouteFactory) -> ModuleItem {
    let symbols = factory.imported_symbols();
    let names: Vec<(&str, &str)> = symbols
        .iter()
        .map(|symbol| (symbol.as_str(), symbol.as_str()))
        .collect();
    named_import(&names, ROUTER_PACKAGE)
}

/// One entry of the `meta` array in a route's head
#[derive(Debug, Clone, PartialEq)]
pub enum MetaTag {
    /// `{ title: <value> }`
    Title(Box<Expr>),
    /// `{ name: "<name>", content: <value> }`
    Named { name: String, content: Box<Expr> },
    /// `{ charSet: "<value>" }`
    CharSet(String),
}

impl MetaTag {
    /// Map a metadata key and its value to a meta tag
    pub fn from_metadata(key: &str, value: Box<Expr>) -> MetaTag {
        match key {
            "title" => MetaTag::Title(value),
            _ => MetaTag::Named {
                name: key.to_string(),
                content: value,
            },
        }
    }

    pub fn to_expr(&self) -> Box<Expr> {
        match self {
            MetaTag::Title(value) => object(vec![key_value("title", value.clone())]),
            MetaTag::Named { name, content } => object(vec![
                key_value("name", str_expr(name)),
                key_value("content", content.clone()),
            ]),
            MetaTag::CharSet(value) => object(vec![key_value("charSet", str_expr(value))]),
        }
    }
}

/// Meta tags every root layout starts with
pub fn root_meta_defaults() -> Vec<MetaTag> {
    vec![
        MetaTag::CharSet("utf-8".to_string()),
        MetaTag::Named {
            name: "viewport".to_string(),
            content: str_expr("width=device-width, initial-scale=1"),
        },
    ]
}

/// Convert a `metadata` object literal into meta tags, in property order
///
/// Keys that are neither identifiers nor strings (computed, numeric) and
/// spread elements are skipped. Shorthand properties use the identifier as
/// the value.
pub fn meta_tags_from_object(object: &ObjectLit) -> Vec<MetaTag> {
    object
        .props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(KeyValueProp { key, value }) => {
                    let key = match key {
                        PropName::Ident(name) => name.sym.to_string(),
                        PropName::Str(s) => s.value.to_string(),
                        _ => return None,
                    };
                    Some(MetaTag::from_metadata(&key, value.clone()))
                }
                Prop::Shorthand(id) => Some(MetaTag::from_metadata(
                    &id.sym,
                    Box::new(Expr::Ident(id.clone())),
                )),
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        })
        .collect()
}

/// A stylesheet linked from the root route's head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetLink {
    /// Import binding holding the stylesheet URL
    pub binding: String,
}

impl StylesheetLink {
    /// Derive the binding from an import source: `./globals.css` → `globalscss`
    pub fn from_source(src: &str) -> StylesheetLink {
        let trimmed = src.strip_prefix("./").unwrap_or(src);
        let trimmed = trimmed.strip_suffix(".css").unwrap_or(trimmed);
        let mut binding: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        binding.push_str("css");
        if binding.starts_with(|c: char| c.is_ascii_digit()) {
            binding.insert(0, '_');
        }
        StylesheetLink { binding }
    }

    pub fn to_expr(&self) -> Box<Expr> {
        object(vec![
            key_value("href", ident_expr(&self.binding)),
            key_value("rel", str_expr("stylesheet")),
        ])
    }
}

/// Contents of the `head` option
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadOptions {
    pub meta: Vec<MetaTag>,
    /// `None` omits the `links` key entirely
    pub links: Option<Vec<StylesheetLink>>,
}

impl HeadOptions {
    /// `() => ({ meta: [...], links: [...] })`
    pub fn to_expr(&self) -> Box<Expr> {
        let mut props = vec![key_value(
            "meta",
            array(self.meta.iter().map(MetaTag::to_expr).collect()),
        )];
        if let Some(links) = &self.links {
            props.push(key_value(
                "links",
                array(links.iter().map(StylesheetLink::to_expr).collect()),
            ));
        }
        thunk(object(props))
    }
}

/// Everything needed to build `export const Route = ...`
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRegistration {
    pub factory: RouteFactory,
    pub head: Option<HeadOptions>,
    pub component: Option<(ComponentSlot, String)>,
    /// Names of server handler functions, for API routes
    pub handlers: Option<Vec<String>>,
}

impl RouteRegistration {
    pub fn options(&self) -> Box<Expr> {
        let mut props = Vec::new();
        if let Some(head) = &self.head {
            props.push(key_value("head", head.to_expr()));
        }
        if let Some((slot, name)) = &self.component {
            props.push(key_value(slot.key(), ident_expr(name)));
        }
        if let Some(handlers) = &self.handlers {
            let handlers = handlers
                .iter()
                .map(|name| PropOrSpread::Prop(Box::new(Prop::Shorthand(ident(name)))))
                .collect();
            props.push(key_value(
                "server",
                object(vec![key_value("handlers", object(handlers))]),
            ));
        }
        object(props)
    }

    /// The route creation call expression
    pub fn to_expr(&self) -> Box<Expr> {
        let factory = ident_expr(self.factory.symbol().as_str());
        match &self.factory {
            RouteFactory::File { path } => call(call(factory, vec![str_expr(path)]), vec![self.options()]),
            RouteFactory::Root => call(factory, vec![self.options()]),
        }
    }

    /// `export const Route = ...;`
    pub fn to_item(&self) -> ModuleItem {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            span: DUMMY_SP,
            decl: Decl::Var(Box::new(const_decl(ROUTE_BINDING, self.to_expr()))),
        }))
    }
}

/// `const <name> = <init>`
pub fn const_decl(name: &str, init: Box<Expr>) -> VarDecl {
    VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent::from(ident(name))),
            init: Some(init),
            definite: false,
        }],
    }
}

pub fn const_item(name: &str, init: Box<Expr>) -> ModuleItem {
    ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(const_decl(name, init)))))
}

pub fn jsx_name(name: &str) -> JSXElementName {
    JSXElementName::Ident(ident(name))
}

/// `<Name />`
pub fn jsx_self_closing(name: &str) -> JSXElement {
    JSXElement {
        span: DUMMY_SP,
        opening: JSXOpeningElement {
            name: jsx_name(name),
            span: DUMMY_SP,
            attrs: vec![],
            self_closing: true,
            type_args: None,
        },
        children: vec![],
        closing: None,
    }
}

/// `<name>{children}</name>`
pub fn jsx_element(name: &str, children: Vec<JSXElementChild>) -> JSXElement {
    JSXElement {
        span: DUMMY_SP,
        opening: JSXOpeningElement {
            name: jsx_name(name),
            span: DUMMY_SP,
            attrs: vec![],
            self_closing: false,
            type_args: None,
        },
        children,
        closing: Some(JSXClosingElement {
            span: DUMMY_SP,
            name: jsx_name(name),
        }),
    }
}

pub fn jsx_child(element: JSXElement) -> JSXElementChild {
    JSXElementChild::JSXElement(Box::new(element))
}

pub fn jsx_text(text: &str) -> JSXElementChild {
    JSXElementChild::JSXText(JSXText {
        span: DUMMY_SP,
        value: text.into(),
        raw: text.into(),
    })
}

pub fn router_element(symbol: RouterSymbol) -> JSXElementChild {
    jsx_child(jsx_self_closing(symbol.as_str()))
}

/// `<head><HeadContent /></head>`
pub fn head_element() -> JSXElementChild {
    jsx_child(jsx_element(
        "head",
        vec![router_element(RouterSymbol::HeadContent)],
    ))
}

/// `name="value"`
pub fn string_attr(name: &str, value: &str) -> JSXAttrOrSpread {
    JSXAttrOrSpread::JSXAttr(JSXAttr {
        span: DUMMY_SP,
        name: JSXAttrName::Ident(IdentName::new(name.into(), DUMMY_SP)),
        value: Some(JSXAttrValue::Lit(Lit::Str(str_lit(value)))),
    })
}
