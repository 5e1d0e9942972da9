//! `Link` and `Image` element rewrites

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{noop_visit_mut_type, VisitMut, VisitMutWith};
use tracing::debug;

use crate::builders::string_attr;
use crate::matchers::{jsx_attr_name, known_component, KnownComponent};
use crate::passes::{PassContext, PassResult, TransformPass};

/// `<Link href>` → `<Link to>`; `<Image priority>` → `<Image loading="lazy" />`
pub struct PageElements;

impl TransformPass for PageElements {
    fn name(&self) -> &'static str {
        "page-elements"
    }

    fn run(&self, module: &mut Module, _ctx: &mut PassContext) -> PassResult {
        let mut rewriter = ElementRewriter::default();
        module.visit_mut_with(&mut rewriter);

        if rewriter.links + rewriter.images > 0 {
            debug!(links = rewriter.links, images = rewriter.images, "rewrote page elements");
        }

        PassResult {
            modified: rewriter.links + rewriter.images > 0,
            warnings: vec![],
        }
    }
}

#[derive(Default)]
struct ElementRewriter {
    links: usize,
    images: usize,
}

impl VisitMut for ElementRewriter {
    noop_visit_mut_type!();

    fn visit_mut_jsx_element(&mut self, element: &mut JSXElement) {
        element.visit_mut_children_with(self);

        match known_component(element) {
            Some(KnownComponent::Link) => {
                for attr in element.opening.attrs.iter_mut() {
                    if let JSXAttrOrSpread::JSXAttr(attr) = attr {
                        if jsx_attr_name(attr) == Some("href") {
                            attr.name = JSXAttrName::Ident(IdentName::new("to".into(), DUMMY_SP));
                            self.links += 1;
                        }
                    }
                }
            }
            Some(KnownComponent::Image) => {
                let mut changed = false;
                for attr in element.opening.attrs.iter_mut() {
                    let is_priority = matches!(
                        &*attr,
                        JSXAttrOrSpread::JSXAttr(inner) if jsx_attr_name(inner) == Some("priority")
                    );
                    if is_priority {
                        *attr = string_attr("loading", "lazy");
                        changed = true;
                    }
                }

                if !element.opening.self_closing || !element.children.is_empty() {
                    element.opening.self_closing = true;
                    element.children.clear();
                    element.closing = None;
                    changed = true;
                }

                if changed {
                    self.images += 1;
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_support::{options, run_pass};
    use crate::passes::TransformKind;

    fn rewrite(source: &str) -> (String, PassResult) {
        let mut ctx = PassContext::new(options(TransformKind::Page));
        run_pass(&PageElements, source, &mut ctx)
    }

    #[test]
    fn test_link_href_becomes_to() {
        let (out, result) = rewrite("const a = <Link href=\"/about\" className=\"x\">About</Link>;\n");
        assert!(result.modified);
        assert!(out.contains("<Link to=\"/about\" className=\"x\">About</Link>"));
    }

    #[test]
    fn test_nested_links_rewritten() {
        let (out, _) = rewrite(
            "const a = <nav><Link href={\"/\"}>Home</Link><div><Link href=\"/b\">B</Link></div></nav>;\n",
        );
        assert!(!out.contains("href"));
        assert_eq!(out.matches("to=").count(), 2);
    }

    #[test]
    fn test_image_priority_becomes_lazy() {
        let (out, result) = rewrite("const a = <Image src=\"/a.png\" priority alt=\"a\" />;\n");
        assert!(result.modified);
        assert!(out.contains("src=\"/a.png\" loading=\"lazy\" alt=\"a\""));
    }

    #[test]
    fn test_image_priority_with_value() {
        let (out, _) = rewrite("const a = <Image src=\"/a.png\" priority={true} />;\n");
        assert!(out.contains("loading=\"lazy\""));
        assert!(!out.contains("priority"));
    }

    #[test]
    fn test_image_forced_self_closing() {
        let (out, result) = rewrite("const a = <Image src=\"/a.png\">caption</Image>;\n");
        assert!(result.modified);
        assert!(!out.contains("caption"));
        assert!(!out.contains("</Image>"));
    }

    #[test]
    fn test_other_elements_untouched() {
        let (out, result) = rewrite("const a = <a href=\"/x\"><img src=\"/y\" /></a>;\n");
        assert!(!result.modified);
        assert!(out.contains("href=\"/x\""));
    }
}
