//! Error types for cft-git

use std::path::PathBuf;

use crate::CheckoutStep;

/// Result type for cft-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cft-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Step '{step}' failed in {dir}: {message}")]
    Step {
        step: CheckoutStep,
        dir: PathBuf,
        message: String,
    },

    #[error("Failed to run git in {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn step(step: CheckoutStep, dir: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Step {
            step,
            dir: dir.into(),
            message: message.into(),
        }
    }
}
