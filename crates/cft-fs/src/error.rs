//! Error types for cft-fs

use std::path::PathBuf;

/// Result type for cft-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cft-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error(
        "No docker-compose file set, either set CFT_COMPOSE environment variable or supply via flag"
    )]
    ComposeFileUnresolved,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
