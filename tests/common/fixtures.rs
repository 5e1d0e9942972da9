use std::fs;
use std::path::{Path, PathBuf};

use routeshift::syntax::Dialect;
use routeshift::transform::{TransformKind, TransformOptions, TransformResult};
use walkdir::WalkDir;

/// Directory of a fixture under tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a file from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Copy a fixture project into a fresh temporary directory
pub fn copy_fixture_project(name: &str) -> tempfile::TempDir {
    let source = fixture_path(name);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("Failed to walk fixture");
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = dir.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }

    dir
}

/// Run the full pipeline over `source` and print the result
pub fn transform_tsx(source: &str, options: TransformOptions) -> (String, TransformResult) {
    let output = routeshift::cli::transform_source(source, Dialect::Tsx, options)
        .unwrap_or_else(|e| panic!("transform failed: {}", e));
    (output.code, output.result)
}

pub fn page(stem: &str, route: &str) -> TransformOptions {
    TransformOptions::new(TransformKind::Page, route, stem)
}

pub fn root_layout() -> TransformOptions {
    TransformOptions::new(TransformKind::RootLayout, "/", "layout")
}
