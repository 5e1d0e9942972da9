//! Route file discovery under the app directory

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::route::{analyze_route_file, RouteFile};

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no app directory found under {0} (looked for app/ and src/app/)")]
    MissingAppDir(PathBuf),

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Location of the app directory inside a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDir {
    pub path: PathBuf,
    /// The app directory lives under `src/`
    pub uses_src: bool,
}

/// Find `src/app` (preferred) or `app` under the project root
pub fn find_app_dir(project_root: &Path) -> Result<AppDir> {
    let src_app = project_root.join("src").join("app");
    if src_app.is_dir() {
        return Ok(AppDir {
            path: src_app,
            uses_src: true,
        });
    }

    let app = project_root.join("app");
    if app.is_dir() {
        return Ok(AppDir {
            path: app,
            uses_src: false,
        });
    }

    Err(DiscoveryError::MissingAppDir(project_root.to_path_buf()))
}

/// Recursively discover every route file below `app_dir`
///
/// Directories starting with `_` or `.` are private in the source
/// convention and are not descended into, nor is `node_modules`.
/// Results are in file-name order so runs are reproducible.
pub fn discover_route_files(app_dir: &Path) -> Result<Vec<RouteFile>> {
    let mut routes = Vec::new();

    let walker = WalkDir::new(app_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_private_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            path: app_dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(route) = analyze_route_file(entry.path(), app_dir) {
            routes.push(route);
        }
    }

    Ok(routes)
}

fn is_private_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('_') || name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}
