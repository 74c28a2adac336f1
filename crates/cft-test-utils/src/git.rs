//! Git repository fixtures for checkout tests.
//!
//! All helpers drive the `git` CLI and panic on failure.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` in `path` and return its trimmed stdout.
///
/// # Panics
/// Panics if git cannot be spawned or exits unsuccessfully.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a real git repository with an initial commit on `main`.
///
/// Configures `user.email`, `user.name`, and `commit.gpgsign = false` locally.
pub fn real_git_repo_with_commit(path: &Path) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    git(path, &["branch", "-M", "main"]);
}

/// Creates a bare repository at `remote`, registers it as `origin` of `path`
/// and pushes every local branch to it.
pub fn add_bare_origin(path: &Path, remote: &Path) {
    fs::create_dir_all(remote)
        .unwrap_or_else(|e| panic!("add_bare_origin: failed to create {}: {e}", remote.display()));
    git(remote, &["init", "--bare"]);

    let remote_url = remote.to_string_lossy();
    git(path, &["remote", "add", "origin", &remote_url]);
    git(path, &["push", "--all", "origin"]);
}

/// Name of the currently checked out branch.
pub fn current_branch(path: &Path) -> String {
    git(path, &["rev-parse", "--abbrev-ref", "HEAD"])
}
