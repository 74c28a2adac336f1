//! User configuration file (`~/.cft.toml`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result, io};

/// File name of the user configuration, looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".cft.toml";

/// Defaults that apply when the command line leaves a setting out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CftConfig {
    /// Compose file to use when neither flag nor `CFT_COMPOSE` is given.
    pub compose_file: Option<PathBuf>,
    /// Skip confirmation prompts.
    pub force: bool,
    /// Branch new local branches start from when the remote lacks one.
    pub base_branch: Option<String>,
}

impl CftConfig {
    /// `~/.cft.toml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration if the file exists, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Some(path) = CftConfig::default_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = CftConfig::load_or_default(Some(Path::new("/nonexistent/.cft.toml"))).unwrap();
        assert_eq!(config, CftConfig::default());
    }
}
