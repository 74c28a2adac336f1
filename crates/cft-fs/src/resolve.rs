//! Compose file path resolution

use std::path::{Path, PathBuf};

use crate::{CftConfig, Error, Result};

/// File names probed in the working directory, in order.
pub const DEFAULT_COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yaml",
    "compose.yml",
];

/// Where the compose file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeFileSource {
    /// `--compose-file` flag or `CFT_COMPOSE`
    Explicit,
    /// `compose_file` in the user configuration
    Config,
    /// Found in the working directory
    WorkingDir,
}

/// A resolved compose file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeFile {
    pub path: PathBuf,
    pub source: ComposeFileSource,
}

impl ComposeFile {
    /// Directory relative paths inside the compose file are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Resolve the compose file: explicit path, then config, then the working
/// directory's default file names.
pub fn resolve_compose_file(
    explicit: Option<&Path>,
    config: &CftConfig,
    cwd: &Path,
) -> Result<ComposeFile> {
    let resolved = if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        ComposeFile {
            path: cwd.join(path),
            source: ComposeFileSource::Explicit,
        }
    } else if let Some(path) = &config.compose_file {
        ComposeFile {
            path: cwd.join(path),
            source: ComposeFileSource::Config,
        }
    } else {
        let path = DEFAULT_COMPOSE_FILES
            .iter()
            .map(|name| cwd.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or(Error::ComposeFileUnresolved)?;
        ComposeFile {
            path,
            source: ComposeFileSource::WorkingDir,
        }
    };

    tracing::debug!(path = %resolved.path.display(), source = ?resolved.source, "resolved compose file");
    Ok(resolved)
}
