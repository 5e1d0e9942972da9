use routeshift::syntax::{parse, Dialect};
use swc_core::ecma::ast::{ModuleDecl, ModuleItem};

/// Assert the printed output parses again
pub fn assert_reparses(code: &str) {
    if let Err(e) = parse(code, Dialect::Tsx) {
        panic!("Output does not parse: {}\n{}", e, code);
    }
}

/// Import sources of the re-parsed output, in order
pub fn import_sources(code: &str) -> Vec<String> {
    let parsed = parse(code, Dialect::Tsx).expect("Expected output to parse");
    parsed
        .module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import.src.value.to_string()),
            _ => None,
        })
        .collect()
}

/// Assert no import of a module without a TanStack counterpart survived
pub fn assert_no_legacy_imports(code: &str) {
    for src in import_sources(code) {
        assert!(
            !matches!(src.as_str(), "next" | "next/script" | "next/image" | "next/link")
                && !src.starts_with("next/font"),
            "Unexpected legacy import {:?} in:\n{}",
            src,
            code
        );
    }
    assert!(!code.contains("use client"), "\"use client\" left in:\n{}", code);
}

/// Assert `needles` occur in `code` in the given order
pub fn assert_in_order(code: &str, needles: &[&str]) {
    let mut last = 0;
    for needle in needles {
        match code[last..].find(needle) {
            Some(offset) => last += offset + needle.len(),
            None => panic!("Expected {:?} after offset {} in:\n{}", needle, last, code),
        }
    }
}
