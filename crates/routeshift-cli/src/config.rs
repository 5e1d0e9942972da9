//! Project configuration
//!
//! Settings come from an optional `routeshift.json` in the project root and
//! are then overridden by command line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use routeshift_transform::LayoutVariant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILE: &str = "routeshift.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub layout_variant: LayoutVariant,
    /// Move originals to `<name>.backup` instead of deleting them
    pub keep_backups: bool,
    /// Replace `next/image` with `@unpic/react`
    pub rewrite_image_imports: bool,
    /// Run the package manager for missing and obsolete packages
    pub install_packages: bool,
    /// Transform and report without writing anything
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout_variant: LayoutVariant::FontAware,
            keep_backups: true,
            rewrite_image_imports: true,
            install_packages: true,
            dry_run: false,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub layout_variant: Option<LayoutVariant>,
    pub keep_backups: Option<bool>,
    pub rewrite_image_imports: Option<bool>,
    pub install_packages: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Load `routeshift.json` from `project_root`, or the defaults when absent
    pub fn load(project_root: &Path) -> Result<Config, ConfigError> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Config::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn apply(mut self, overrides: &Overrides) -> Config {
        if let Some(variant) = overrides.layout_variant {
            self.layout_variant = variant;
        }
        if let Some(keep) = overrides.keep_backups {
            self.keep_backups = keep;
        }
        if let Some(rewrite) = overrides.rewrite_image_imports {
            self.rewrite_image_imports = rewrite;
        }
        if let Some(install) = overrides.install_packages {
            self.install_packages = install;
        }
        if let Some(dry_run) = overrides.dry_run {
            self.dry_run = dry_run;
        }
        self
    }
}
