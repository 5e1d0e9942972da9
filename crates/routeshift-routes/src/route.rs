//! Route file classification and target path conventions

use std::fmt;
use std::path::{Path, PathBuf};

use routeshift_syntax::Dialect;
use serde::{Deserialize, Serialize};

use crate::segment::{segments, SegmentKind};

/// Extensions a route file may carry
pub const ROUTE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Kind of a route file, decided by its base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    Page,
    Layout,
    Loading,
    Error,
    NotFound,
    Api,
}

impl RouteKind {
    /// Classify a file stem (`page`, `layout`, `route`, ...)
    pub fn from_stem(stem: &str) -> Option<RouteKind> {
        match stem {
            "page" => Some(RouteKind::Page),
            "layout" => Some(RouteKind::Layout),
            "loading" => Some(RouteKind::Loading),
            "error" => Some(RouteKind::Error),
            "not-found" => Some(RouteKind::NotFound),
            "route" => Some(RouteKind::Api),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Page => "page",
            RouteKind::Layout => "layout",
            RouteKind::Loading => "loading",
            RouteKind::Error => "error",
            RouteKind::NotFound => "not-found",
            RouteKind::Api => "api",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the transform and write-back steps need to know about one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFile {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub kind: RouteKind,
    /// File extension without the dot
    pub extension: String,
    /// Directory of the file relative to the app directory, `/`-separated
    pub relative_dir: String,
    pub is_typescript: bool,
    pub is_dynamic: bool,
    pub is_catch_all: bool,
}

impl RouteFile {
    /// The file sits directly in the app directory
    pub fn is_root(&self) -> bool {
        self.relative_dir.is_empty()
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::from_extension(&self.extension)
    }

    /// File name of the original, e.g. `page.tsx`
    pub fn file_name(&self) -> &str {
        self.original_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Route path string used in `createFileRoute`, e.g. `/blog/$slug`
    pub fn route_path(&self) -> String {
        route_path(&self.relative_dir)
    }

    /// Sibling path the original is moved to when backups are kept
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.original_path.as_os_str().to_owned();
        name.push(".backup");
        PathBuf::from(name)
    }
}

/// Analyze a file inside `app_dir`; `None` when it is not a route file
pub fn analyze_route_file(path: &Path, app_dir: &Path) -> Option<RouteFile> {
    let file_name = path.file_name()?.to_str()?;
    let (stem, extension) = file_name.rsplit_once('.')?;
    if !ROUTE_EXTENSIONS.contains(&extension) {
        return None;
    }
    let kind = RouteKind::from_stem(stem)?;

    let relative = path.strip_prefix(app_dir).ok()?;
    let relative_dir = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    let kinds: Vec<SegmentKind> = segments(&relative_dir).map(SegmentKind::parse).collect();
    let is_dynamic = kinds.iter().any(|k| k.is_dynamic());
    let is_catch_all = kinds.iter().any(|k| k.is_catch_all());

    Some(RouteFile {
        original_path: path.to_path_buf(),
        target_path: target_path(app_dir, &relative_dir, kind, extension),
        kind,
        extension: extension.to_string(),
        relative_dir,
        is_typescript: extension == "ts" || extension == "tsx",
        is_dynamic,
        is_catch_all,
    })
}

/// Route path for a relative directory: `""` → `/`, `blog/[slug]` → `/blog/$slug`
pub fn route_path(relative_dir: &str) -> String {
    let converted: Vec<String> = segments(relative_dir)
        .map(|segment| SegmentKind::parse(segment).render())
        .collect();
    format!("/{}", converted.join("/"))
}

/// Where the transformed file is written
///
/// - `page` at the root → `index.<ext>`
/// - nested `page` → flattened dotted name (`blog/[slug]` → `blog.$slug.<ext>`)
/// - `layout` at the root → `__root.<ext>`
/// - anything else keeps its directory and becomes `_<kind>.<ext>`
pub fn target_path(app_dir: &Path, relative_dir: &str, kind: RouteKind, extension: &str) -> PathBuf {
    let converted: Vec<String> = segments(relative_dir)
        .map(|segment| SegmentKind::parse(segment).render())
        .collect();

    match kind {
        RouteKind::Page if converted.is_empty() => app_dir.join(format!("index.{}", extension)),
        RouteKind::Page => app_dir.join(format!("{}.{}", converted.join("."), extension)),
        RouteKind::Layout if converted.is_empty() => {
            app_dir.join(format!("__root.{}", extension))
        }
        _ => {
            let mut dir = app_dir.to_path_buf();
            for segment in &converted {
                dir.push(segment);
            }
            dir.join(format!("_{}.{}", kind.as_str(), extension))
        }
    }
}
