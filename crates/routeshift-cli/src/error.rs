//! Migration error types

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use routeshift_routes::DiscoveryError;
use routeshift_syntax::SyntaxError;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, MigrateError>;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {error}")]
    Parse {
        path: PathBuf,
        /// Text that failed to parse, kept for the diagnostic snippet
        text: String,
        error: SyntaxError,
    },

    #[error("failed to print {path}: {error}")]
    Print { path: PathBuf, error: SyntaxError },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid package.json at {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },
}
