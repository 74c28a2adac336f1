//! The seam between the checkout sequence and git itself

use std::path::Path;
use std::process::Command;

use git2::Repository;

use crate::{Error, Result};

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when git was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, trimmed. Git reports progress on stderr.
    pub fn text(&self) -> String {
        let mut text = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }
}

/// Operations the checkout sequence needs from git
pub trait Git {
    /// Run `git <args>` inside `dir`.
    ///
    /// A non-zero exit is not an error here; callers decide what each code means.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;

    /// Whether the repository containing `dir` has a remote called `name`.
    fn has_remote(&self, dir: &Path, name: &str) -> Result<bool>;
}

/// The installed `git` binary, with `git2` for repository inspection
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl Git for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(dir = %dir.display(), ?args, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        Ok(GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn has_remote(&self, dir: &Path, name: &str) -> Result<bool> {
        let repo = Repository::discover(dir)?;
        let remotes = repo.remotes()?;
        Ok(remotes.iter().flatten().any(|remote| remote == name))
    }
}
