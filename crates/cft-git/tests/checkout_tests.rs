//! Checkout sequence against a scripted git

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use cft_git::{
    CheckoutOutcome, CheckoutRequest, CheckoutStep, Error, Git, GitOutput, Result, SkipReason,
    checkout_branch,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Replays exit codes in order and records every invocation.
struct ScriptedGit {
    has_remote: bool,
    codes: RefCell<VecDeque<i32>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedGit {
    fn new(has_remote: bool, codes: &[i32]) -> Self {
        Self {
            has_remote,
            codes: RefCell::new(codes.iter().copied().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Git for ScriptedGit {
    fn run(&self, _dir: &Path, args: &[&str]) -> Result<GitOutput> {
        self.calls.borrow_mut().push(args.join(" "));
        let code = self.codes.borrow_mut().pop_front().unwrap_or(0);
        Ok(GitOutput {
            code: Some(code),
            stdout: format!("ran {}\n", args[0]),
            stderr: String::new(),
        })
    }

    fn has_remote(&self, _dir: &Path, _name: &str) -> Result<bool> {
        Ok(self.has_remote)
    }
}

fn run(git: &ScriptedGit, request: &CheckoutRequest) -> Result<CheckoutOutcome> {
    checkout_branch(git, Path::new("/srv/web"), request, &mut |_, _| {})
}

#[test]
fn test_tracks_existing_remote_branch() {
    let git = ScriptedGit::new(true, &[0, 0, 0, 0]);

    let outcome = run(&git, &CheckoutRequest::new("feature")).unwrap();

    assert_eq!(outcome, CheckoutOutcome::TrackedRemote);
    assert_eq!(
        git.calls(),
        vec![
            "stash",
            "fetch --all",
            "ls-remote --heads --exit-code origin feature",
            "checkout -B feature --track origin/feature",
        ]
    );
}

#[test]
fn test_creates_from_base_when_remote_lacks_branch() {
    let git = ScriptedGit::new(true, &[0, 0, 2, 0]);

    let outcome = run(&git, &CheckoutRequest::new("feature").with_base("main")).unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::CreatedLocal {
            base: Some("main".to_string())
        }
    );
    assert_eq!(git.calls().last().unwrap(), "checkout -B feature main");
}

#[test]
fn test_creates_plain_branch_without_remote() {
    let git = ScriptedGit::new(false, &[0, 0]);

    let outcome = run(&git, &CheckoutRequest::new("feature")).unwrap();

    assert_eq!(outcome, CheckoutOutcome::CreatedLocal { base: None });
    assert_eq!(git.calls(), vec!["stash", "checkout -B feature"]);
}

#[rstest]
#[case::no_remote(false, &[0], SkipReason::NoRemote, 1)]
#[case::branch_missing(true, &[0, 0, 2], SkipReason::BranchNotOnRemote, 3)]
fn test_remote_only_skips(
    #[case] has_remote: bool,
    #[case] codes: &[i32],
    #[case] reason: SkipReason,
    #[case] calls: usize,
) {
    let git = ScriptedGit::new(has_remote, codes);

    let outcome = run(&git, &CheckoutRequest::new("feature").remote_only(true)).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Skipped(reason));
    assert_eq!(git.calls().len(), calls);
}

#[rstest]
#[case::stash(&[1], CheckoutStep::Stash)]
#[case::fetch(&[0, 128], CheckoutStep::Fetch)]
#[case::lookup(&[0, 0, 128], CheckoutStep::LookupRemoteBranch)]
#[case::checkout(&[0, 0, 0, 1], CheckoutStep::Checkout)]
#[case::create(&[0, 0, 2, 1], CheckoutStep::CreateLocal)]
fn test_failure_names_its_step(#[case] codes: &[i32], #[case] expected: CheckoutStep) {
    let git = ScriptedGit::new(true, codes);

    let err = run(&git, &CheckoutRequest::new("feature")).unwrap_err();

    match err {
        Error::Step { step, .. } => assert_eq!(step, expected),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_failure_stops_the_sequence() {
    let git = ScriptedGit::new(true, &[0, 1]);

    let _ = run(&git, &CheckoutRequest::new("feature"));

    assert_eq!(git.calls(), vec!["stash", "fetch --all"]);
}

#[test]
fn test_output_is_forwarded_per_step() {
    let git = ScriptedGit::new(true, &[0, 0, 0, 0]);
    let mut seen = Vec::new();

    checkout_branch(
        &git,
        Path::new("/srv/web"),
        &CheckoutRequest::new("feature"),
        &mut |step, text| seen.push((step, text.to_string())),
    )
    .unwrap();

    assert_eq!(
        seen,
        vec![
            (CheckoutStep::Stash, "ran stash".to_string()),
            (CheckoutStep::Fetch, "ran fetch".to_string()),
            (CheckoutStep::Checkout, "ran checkout".to_string()),
        ]
    );
}

#[test]
fn test_git_output_text_joins_streams() {
    let output = GitOutput {
        code: Some(0),
        stdout: "Switched to branch 'x'\n".into(),
        stderr: "From origin\n".into(),
    };
    assert!(output.success());
    assert_eq!(output.text(), "Switched to branch 'x'\nFrom origin");
}
