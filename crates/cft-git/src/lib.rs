//! Git branch checkout for service build directories
//!
//! [`checkout_branch`] runs a fixed sequence of git steps in one directory.
//! Git is reached through the [`Git`] trait; [`SystemGit`] shells out to the
//! `git` binary and reads repository state with `git2`.

pub mod checkout;
pub mod error;
pub mod runner;

pub use checkout::{
    CheckoutOutcome, CheckoutRequest, CheckoutStep, DEFAULT_BASE_BRANCH, REMOTE, SkipReason,
    checkout_branch,
};
pub use error::{Error, Result};
pub use runner::{Git, GitOutput, SystemGit};
