//! Settings shared by every command
//!
//! Merges global flags with the user configuration file. Flags win.

use std::path::Path;

use cft_fs::{CftConfig, ComposeFile, resolve_compose_file};
use cft_git::DEFAULT_BASE_BRANCH;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub compose_file: ComposeFile,
    /// Skip confirmation prompts
    pub force: bool,
    /// Base for branches the remote does not have
    pub base_branch: String,
}

impl Settings {
    pub fn new(
        compose_flag: Option<&Path>,
        force: bool,
        config: &CftConfig,
        cwd: &Path,
    ) -> Result<Self> {
        let compose_file = resolve_compose_file(compose_flag, config, cwd)?;
        Ok(Self {
            compose_file,
            force: force || config.force,
            base_branch: config
                .base_branch
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
        })
    }
}
