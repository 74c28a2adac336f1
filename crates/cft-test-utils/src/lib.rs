//! Shared test utilities for the compose-file-tool workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`compose`]: compose document fixtures and builders
//! - [`git`]: git repository fixtures for checkout tests

pub mod compose;
pub mod git;
