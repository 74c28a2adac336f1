//! Branch checkout for a service's build directory
//!
//! The sequence is an explicit list of named steps. Every step either moves on
//! to the next one or finishes with a [`CheckoutOutcome`]; failures carry the
//! step they happened in.

use std::fmt;
use std::path::Path;

use crate::{Error, Git, GitOutput, Result};

/// Remote branches are looked up on.
pub const REMOTE: &str = "origin";

/// Branch new local branches start from when the remote has none.
pub const DEFAULT_BASE_BRANCH: &str = "develop";

/// `git ls-remote --exit-code` status for "no matching refs".
const LS_REMOTE_NO_MATCH: i32 = 2;

/// One step of the checkout sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    Stash,
    InspectRemote,
    Fetch,
    LookupRemoteBranch,
    CreateLocal,
    Checkout,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Stash => "stash",
            CheckoutStep::InspectRemote => "inspect remote",
            CheckoutStep::Fetch => "fetch",
            CheckoutStep::LookupRemoteBranch => "look up remote branch",
            CheckoutStep::CreateLocal => "create local branch",
            CheckoutStep::Checkout => "checkout",
        };
        f.write_str(name)
    }
}

/// What to check out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub branch: String,
    pub base: String,
    /// Only check out branches that exist on the remote
    pub remote_only: bool,
}

impl CheckoutRequest {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            base: DEFAULT_BASE_BRANCH.to_string(),
            remote_only: false,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn remote_only(mut self, remote_only: bool) -> Self {
        self.remote_only = remote_only;
        self
    }
}

/// Why a directory was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoRemote,
    BranchNotOnRemote,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRemote => write!(f, "no remote '{REMOTE}'"),
            SkipReason::BranchNotOnRemote => write!(f, "branch not on '{REMOTE}'"),
        }
    }
}

/// How the sequence ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Local branch tracks the remote branch of the same name
    TrackedRemote,
    /// Local branch created without a remote counterpart
    CreatedLocal { base: Option<String> },
    Skipped(SkipReason),
}

impl fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutOutcome::TrackedRemote => write!(f, "tracking {REMOTE}"),
            CheckoutOutcome::CreatedLocal { base: Some(base) } => {
                write!(f, "created locally from '{base}'")
            }
            CheckoutOutcome::CreatedLocal { base: None } => write!(f, "created locally"),
            CheckoutOutcome::Skipped(reason) => write!(f, "skipped, {reason}"),
        }
    }
}

/// Run git for `step` and require a zero exit.
fn run_step(
    git: &(impl Git + ?Sized),
    dir: &Path,
    step: CheckoutStep,
    args: &[&str],
    on_output: &mut dyn FnMut(CheckoutStep, &str),
) -> Result<GitOutput> {
    let output = git.run(dir, args).map_err(|e| Error::step(step, dir, e.to_string()))?;
    let text = output.text();
    if !text.is_empty() {
        on_output(step, &text);
    }
    if !output.success() {
        let message = match output.code {
            Some(code) => format!("`git {}` exited with status {code}", args.join(" ")),
            None => format!("`git {}` was terminated", args.join(" ")),
        };
        return Err(Error::step(step, dir, message));
    }
    Ok(output)
}

/// Switch the repository in `dir` to `request.branch`.
///
/// Local changes are stashed first. The branch tracks `origin/<branch>` when
/// the remote has it; otherwise it is created locally (from `request.base`
/// when a remote exists) unless `remote_only` is set, in which case the
/// directory is skipped. Git's own output goes to `on_output`.
pub fn checkout_branch(
    git: &(impl Git + ?Sized),
    dir: &Path,
    request: &CheckoutRequest,
    on_output: &mut dyn FnMut(CheckoutStep, &str),
) -> Result<CheckoutOutcome> {
    let branch = request.branch.as_str();
    tracing::debug!(dir = %dir.display(), branch, remote_only = request.remote_only, "checking out");

    run_step(git, dir, CheckoutStep::Stash, &["stash"], on_output)?;

    let has_remote = git
        .has_remote(dir, REMOTE)
        .map_err(|e| Error::step(CheckoutStep::InspectRemote, dir, e.to_string()))?;
    if !has_remote {
        if request.remote_only {
            tracing::warn!(dir = %dir.display(), "no remote '{REMOTE}', skipping");
            return Ok(CheckoutOutcome::Skipped(SkipReason::NoRemote));
        }
        run_step(
            git,
            dir,
            CheckoutStep::CreateLocal,
            &["checkout", "-B", branch],
            on_output,
        )?;
        return Ok(CheckoutOutcome::CreatedLocal { base: None });
    }

    run_step(git, dir, CheckoutStep::Fetch, &["fetch", "--all"], on_output)?;

    let step = CheckoutStep::LookupRemoteBranch;
    let lookup = git
        .run(dir, &["ls-remote", "--heads", "--exit-code", REMOTE, branch])
        .map_err(|e| Error::step(step, dir, e.to_string()))?;
    match lookup.code {
        Some(0) => {}
        Some(LS_REMOTE_NO_MATCH) => {
            if request.remote_only {
                tracing::warn!(dir = %dir.display(), branch, "branch not on '{REMOTE}', skipping");
                return Ok(CheckoutOutcome::Skipped(SkipReason::BranchNotOnRemote));
            }
            run_step(
                git,
                dir,
                CheckoutStep::CreateLocal,
                &["checkout", "-B", branch, &request.base],
                on_output,
            )?;
            return Ok(CheckoutOutcome::CreatedLocal {
                base: Some(request.base.clone()),
            });
        }
        _ => {
            let text = lookup.text();
            let message = if text.is_empty() {
                format!("`git ls-remote` exited with status {:?}", lookup.code)
            } else {
                text
            };
            return Err(Error::step(step, dir, message));
        }
    }

    let upstream = format!("{REMOTE}/{branch}");
    run_step(
        git,
        dir,
        CheckoutStep::Checkout,
        &["checkout", "-B", branch, "--track", &upstream],
        on_output,
    )?;
    Ok(CheckoutOutcome::TrackedRemote)
}
