//! Package manager invocation
//!
//! The package manager is picked from the lock file in the project root.
//! Only two operations are ever run: adding and removing packages.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tracing::info;

use crate::error::{MigrateError, Result};

/// Packages every migrated project depends on
pub const BASE_PACKAGES: [&str; 2] = ["@tanstack/react-router", "@tanstack/react-start"];

/// Packages that have no use after migration
pub const OBSOLETE_PACKAGES: [&str; 1] = ["next"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

impl PackageManager {
    /// `pnpm-lock.yaml` → pnpm, `yarn.lock` → yarn, anything else → npm
    pub fn detect(project_root: &Path) -> PackageManager {
        if project_root.join("pnpm-lock.yaml").is_file() {
            PackageManager::Pnpm
        } else if project_root.join("yarn.lock").is_file() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Sub-command for an operation
    pub fn verb(self, operation: Operation) -> &'static str {
        match (self, operation) {
            (PackageManager::Npm, Operation::Add) => "install",
            (PackageManager::Npm, Operation::Remove) => "uninstall",
            (_, Operation::Add) => "add",
            (_, Operation::Remove) => "remove",
        }
    }

    pub fn run(self, operation: Operation, packages: &BTreeSet<String>, cwd: &Path) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let verb = self.verb(operation);
        info!(program = self.program(), verb, packages = ?packages, "running package manager");
        let status = Command::new(self.program())
            .arg(verb)
            .args(packages)
            .current_dir(cwd)
            .status()
            .map_err(|source| MigrateError::Spawn {
                program: self.program().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(MigrateError::CommandFailed {
                program: self.program().to_string(),
                status,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Names listed in `dependencies` and `devDependencies` of `package.json`
pub fn declared_packages(project_root: &Path) -> Result<BTreeSet<String>> {
    let path = project_root.join("package.json");
    if !path.is_file() {
        return Ok(BTreeSet::new());
    }

    let text = fs::read_to_string(&path).map_err(|source| MigrateError::Read {
        path: path.clone(),
        source,
    })?;
    let manifest: Value =
        serde_json::from_str(&text).map_err(|source| MigrateError::Manifest { path, source })?;

    let mut declared = BTreeSet::new();
    for table in ["dependencies", "devDependencies"] {
        if let Some(Value::Object(entries)) = manifest.get(table) {
            declared.extend(entries.keys().cloned());
        }
    }
    Ok(declared)
}

/// Packages to add and remove so the migrated sources resolve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPlan {
    pub add: BTreeSet<String>,
    pub remove: BTreeSet<String>,
}

impl DependencyPlan {
    pub fn new(declared: &BTreeSet<String>, required: &BTreeSet<String>) -> Self {
        let add = BASE_PACKAGES
            .iter()
            .map(|name| name.to_string())
            .chain(required.iter().cloned())
            .filter(|name| !declared.contains(name))
            .collect();
        let remove = OBSOLETE_PACKAGES
            .iter()
            .map(|name| name.to_string())
            .filter(|name| declared.contains(name))
            .collect();
        DependencyPlan { add, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    pub fn apply(&self, manager: PackageManager, project_root: &Path) -> Result<()> {
        manager.run(Operation::Remove, &self.remove, project_root)?;
        manager.run(Operation::Add, &self.add, project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_detect_from_lock_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);

        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Yarn);

        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_verbs() {
        assert_eq!(PackageManager::Npm.verb(Operation::Add), "install");
        assert_eq!(PackageManager::Npm.verb(Operation::Remove), "uninstall");
        assert_eq!(PackageManager::Yarn.verb(Operation::Add), "add");
        assert_eq!(PackageManager::Pnpm.verb(Operation::Remove), "remove");
    }

    #[test]
    fn test_declared_packages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "dependencies": { "next": "15.0.0", "react": "19.0.0" }, "devDependencies": { "typescript": "5" } }"#,
        )
        .unwrap();
        assert_eq!(
            declared_packages(dir.path()).unwrap(),
            set(&["next", "react", "typescript"])
        );
    }

    #[test]
    fn test_missing_manifest_declares_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(declared_packages(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_plan_skips_declared_packages() {
        let declared = set(&["next", "@tanstack/react-router"]);
        let plan = DependencyPlan::new(&declared, &set(&["@unpic/react"]));
        assert_eq!(plan.add, set(&["@tanstack/react-start", "@unpic/react"]));
        assert_eq!(plan.remove, set(&["next"]));
    }

    #[test]
    fn test_run_with_nothing_to_do() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PackageManager::Npm
            .run(Operation::Add, &BTreeSet::new(), dir.path())
            .is_ok());
    }
}
