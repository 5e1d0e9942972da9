//! Migration of a whole app directory
//!
//! Every route file is read, transformed and written on its own. A failure
//! is recorded for that file and the batch moves on; nothing is written for
//! a file unless its whole transform succeeded.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use routeshift_routes::{discover_route_files, find_app_dir, RouteFile, RouteKind};
use routeshift_syntax::{parse, Dialect, SyntaxError};
use routeshift_transform::{transform, TransformKind, TransformOptions, TransformResult, TransformWarning};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::deps::{declared_packages, DependencyPlan, PackageManager};
use crate::error::{MigrateError, Result};

/// Printed source plus what the pipeline reported
#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    pub result: TransformResult,
}

#[derive(Debug)]
pub enum FileOutcome {
    Migrated {
        target: PathBuf,
        warnings: Vec<TransformWarning>,
        required_packages: BTreeSet<String>,
    },
    Skipped {
        reason: String,
    },
    Failed(MigrateError),
}

#[derive(Debug)]
pub struct FileReport {
    pub route: RouteFile,
    pub outcome: FileOutcome,
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub files: Vec<FileReport>,
    pub dependencies: DependencyPlan,
    /// Set when the package manager was run and failed
    pub dependency_error: Option<MigrateError>,
}

impl MigrationReport {
    pub fn migrated(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Migrated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|file| predicate(&file.outcome)).count()
    }

    /// Union of the packages required by migrated files
    pub fn required_packages(&self) -> BTreeSet<String> {
        self.files
            .iter()
            .filter_map(|file| match &file.outcome {
                FileOutcome::Migrated {
                    required_packages, ..
                } => Some(required_packages.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

/// Pipeline for a route file; `None` for kinds that are not migrated
pub fn transform_kind(route: &RouteFile) -> Option<TransformKind> {
    match route.kind {
        RouteKind::Page => Some(TransformKind::Page),
        RouteKind::Layout if route.is_root() => Some(TransformKind::RootLayout),
        RouteKind::Layout => Some(TransformKind::Layout),
        RouteKind::Loading => Some(TransformKind::Loading),
        RouteKind::Error => Some(TransformKind::Error),
        RouteKind::Api => Some(TransformKind::Api),
        RouteKind::NotFound => None,
    }
}

pub fn transform_options(route: &RouteFile, kind: TransformKind, config: &Config) -> TransformOptions {
    let file_name = route.file_name();
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);

    let mut options = TransformOptions::new(kind, route.route_path(), stem);
    options.layout_variant = config.layout_variant;
    options.rewrite_image_imports = config.rewrite_image_imports;
    options
}

/// Parse, transform and print one source text
pub fn transform_source(
    text: &str,
    dialect: Dialect,
    options: TransformOptions,
) -> std::result::Result<TransformOutput, SyntaxError> {
    let mut parsed = parse(text, dialect)?;
    let result = transform(&mut parsed.module, options);
    let code = parsed.print()?;
    Ok(TransformOutput { code, result })
}

/// Migrate every route file under the project's app directory
pub fn migrate(project_root: &Path, config: &Config) -> Result<MigrationReport> {
    let app = find_app_dir(project_root)?;
    let routes = discover_route_files(&app.path)?;
    info!(
        app_dir = %app.path.display(),
        routes = routes.len(),
        dry_run = config.dry_run,
        "discovered route files"
    );

    let mut report = MigrationReport::default();
    for route in routes {
        let outcome = match migrate_file(&route, config) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(file = %route.original_path.display(), error = %err, "migration failed");
                FileOutcome::Failed(err)
            }
        };
        report.files.push(FileReport { route, outcome });
    }

    report.dependencies = DependencyPlan::new(
        &declared_packages(project_root)?,
        &report.required_packages(),
    );
    if config.install_packages && !config.dry_run && report.migrated() > 0 && !report.dependencies.is_empty() {
        let manager = PackageManager::detect(project_root);
        if let Err(err) = report.dependencies.apply(manager, project_root) {
            error!(manager = %manager, error = %err, "dependency update failed");
            report.dependency_error = Some(err);
        }
    }

    Ok(report)
}

/// Transform one file and, unless dry-running, write it to its target
pub fn migrate_file(route: &RouteFile, config: &Config) -> Result<FileOutcome> {
    let Some(kind) = transform_kind(route) else {
        warn!(file = %route.original_path.display(), kind = %route.kind, "unsupported route kind");
        return Ok(FileOutcome::Skipped {
            reason: format!("{} routes are not supported", route.kind),
        });
    };

    if route.target_path.exists() {
        warn!(target = %route.target_path.display(), "target exists, skipping");
        return Ok(FileOutcome::Skipped {
            reason: format!("{} already exists", route.target_path.display()),
        });
    }

    let path = &route.original_path;
    let text = fs::read_to_string(path).map_err(|source| MigrateError::Read {
        path: path.clone(),
        source,
    })?;

    let options = transform_options(route, kind, config);
    debug!(file = %path.display(), kind = ?kind, route = %options.route_path, "transforming");
    let output = transform_source(&text, route.dialect(), options).map_err(|err| match err {
        SyntaxError::Parse { .. } => MigrateError::Parse {
            path: path.clone(),
            text: text.clone(),
            error: err,
        },
        other => MigrateError::Print {
            path: path.clone(),
            error: other,
        },
    })?;

    for warning in &output.result.warnings {
        warn!(file = %path.display(), code = warning.code, "{}", warning.message);
    }

    if !config.dry_run {
        write_atomic(&route.target_path, &output.code)?;
        retire_original(route, config.keep_backups)?;
    }
    info!(file = %path.display(), target = %route.target_path.display(), "migrated");

    Ok(FileOutcome::Migrated {
        target: route.target_path.clone(),
        warnings: output.result.warnings,
        required_packages: output.result.required_packages,
    })
}

/// Write through a temporary sibling renamed over `path`
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source: io::Error| MigrateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir).map_err(write_error)?;
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Move the original aside, or delete it when no backup is kept
fn retire_original(route: &RouteFile, keep_backup: bool) -> Result<()> {
    let path = &route.original_path;
    let result = if keep_backup {
        fs::rename(path, route.backup_path())
    } else {
        fs::remove_file(path)
    };
    result.map_err(|source| MigrateError::Write {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routeshift_routes::analyze_route_file;

    fn config() -> Config {
        Config {
            install_packages: false,
            ..Config::default()
        }
    }

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn route(app: &Path, relative: &str) -> RouteFile {
        analyze_route_file(&app.join(relative), app).unwrap()
    }

    #[test]
    fn test_transform_kinds() {
        let app = PathBuf::from("/p/app");
        assert_eq!(transform_kind(&route(&app, "layout.tsx")), Some(TransformKind::RootLayout));
        assert_eq!(transform_kind(&route(&app, "shop/layout.tsx")), Some(TransformKind::Layout));
        assert_eq!(transform_kind(&route(&app, "api/x/route.ts")), Some(TransformKind::Api));
        assert_eq!(transform_kind(&route(&app, "not-found.tsx")), None);
    }

    #[test]
    fn test_options_from_route() {
        let app = PathBuf::from("/p/app");
        let mut config = config();
        config.rewrite_image_imports = false;
        let options = transform_options(&route(&app, "blog/[slug]/page.tsx"), TransformKind::Page, &config);
        assert_eq!(options.route_path, "/blog/$slug");
        assert_eq!(options.file_stem, "page");
        assert!(!options.rewrite_image_imports);
    }

    #[test]
    fn test_migrate_file_writes_target_and_backup() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let original = write(&app, "page.tsx", "export default function Home() { return <main />; }\n");

        let outcome = migrate_file(&route(&app, "page.tsx"), &config()).unwrap();
        assert!(matches!(outcome, FileOutcome::Migrated { .. }));

        let written = fs::read_to_string(app.join("index.tsx")).unwrap();
        assert!(written.contains("createFileRoute(\"/\")"));
        assert!(written.contains("component: Home"));
        assert!(!original.exists());
        assert!(app.join("page.tsx.backup").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        write(&app, "about/page.tsx", "export default () => <p />;\n");

        let mut config = config();
        config.dry_run = true;
        let outcome = migrate_file(&route(&app, "about/page.tsx"), &config).unwrap();

        assert!(matches!(outcome, FileOutcome::Migrated { .. }));
        assert!(app.join("about/page.tsx").exists());
        assert!(!app.join("about.tsx").exists());
    }

    #[test]
    fn test_parse_error_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        write(&app, "page.tsx", "export default function ( {\n");

        let err = migrate_file(&route(&app, "page.tsx"), &config()).unwrap_err();
        assert!(matches!(err, MigrateError::Parse { .. }));
        assert!(app.join("page.tsx").exists());
        assert!(!app.join("index.tsx").exists());
    }

    #[test]
    fn test_existing_target_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        write(&app, "page.tsx", "export default function Home() { return null; }\n");
        write(&app, "index.tsx", "// already migrated\n");

        let outcome = migrate_file(&route(&app, "page.tsx"), &config()).unwrap();
        assert!(matches!(outcome, FileOutcome::Skipped { .. }));
        assert_eq!(fs::read_to_string(app.join("index.tsx")).unwrap(), "// already migrated\n");
    }

    #[test]
    fn test_migrate_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        write(&app, "page.tsx", "export default function Home() { return null; }\n");
        write(&app, "broken/page.tsx", "export default function (\n");
        write(&app, "not-found.tsx", "export default function NotFound() { return null; }\n");

        let mut config = config();
        config.keep_backups = false;
        let report = migrate(dir.path(), &config).unwrap();

        assert_eq!(report.migrated(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(app.join("index.tsx").exists());
        assert!(!app.join("page.tsx").exists());
        assert!(!app.join("page.tsx.backup").exists());
        assert!(app.join("broken/page.tsx").exists());
    }

    #[test]
    fn test_required_packages_collected() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        write(
            &app,
            "page.tsx",
            "import Image from \"next/image\";\nexport default function Home() { return <Image src=\"/a.png\" />; }\n",
        );

        let report = migrate(dir.path(), &config()).unwrap();
        assert!(report.required_packages().contains("@unpic/react"));
        assert!(report.dependencies.add.contains("@unpic/react"));
        assert!(report.dependency_error.is_none());
    }
}
