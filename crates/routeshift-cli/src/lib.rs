//! routeshift CLI - configuration, dispatch and write-back
//!
//! The binary in `main.rs` is a thin front-end over these modules so the
//! migration can also be driven from tests.

pub mod config;
pub mod deps;
pub mod error;
pub mod logging;
pub mod migrate;
pub mod report;

pub use config::{Config, ConfigError, Overrides, CONFIG_FILE};
pub use error::{MigrateError, Result};
pub use migrate::{migrate, migrate_file, transform_source, FileOutcome, MigrationReport, TransformOutput};
