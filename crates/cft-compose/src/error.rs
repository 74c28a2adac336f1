//! Error types for cft-compose

/// Result type for cft-compose operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cft-compose operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Service '{service}' not found in compose file")]
    ServiceNotFound { service: String },

    #[error("Block of service '{service}' no longer present in the working copy")]
    PatchTargetMissing { service: String },

    #[error("Invalid image pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub fn service_not_found(service: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            service: service.into(),
        }
    }
}
