//! Command implementations for cft-cli

pub mod completions;
pub mod git_co;
pub mod switch;
pub mod tag;

pub use completions::run_completions;
pub use git_co::run_git_co;
pub use switch::run_switch;
pub use tag::run_tag;

use std::path::Path;

use colored::Colorize;

use cft_compose::{ChangeKind, ChangeReport, ComposeDocument};
use cft_fs::io;

use crate::error::Result;

/// Load the compose file into a document.
pub(crate) fn load_document(path: &Path) -> Result<ComposeDocument> {
    Ok(ComposeDocument::new(io::read_text(path)?))
}

/// Write the document back unless nothing changed or this is a dry run.
///
/// Returns whether the file was written.
pub(crate) fn save_document(path: &Path, document: &ComposeDocument, dry_run: bool) -> Result<bool> {
    if dry_run || !document.is_modified() {
        return Ok(false);
    }
    io::write_text(path, document.source())?;
    Ok(true)
}

/// Print the changed lines of a report, diff style.
pub(crate) fn print_report(report: &ChangeReport) {
    if report.is_unchanged() {
        println!("{} Nothing to change.", "OK".green().bold());
        return;
    }

    println!("{}", "Changes:".bold());
    for change in report.edits() {
        let line = change.to_string();
        match change.kind {
            ChangeKind::Insert => println!("  {}", line.green()),
            ChangeKind::Delete => println!("  {}", line.red()),
            ChangeKind::Equal => println!("  {line}"),
        }
    }
    println!(
        "  {} insertion(s), {} deletion(s)",
        report.insertions().to_string().green(),
        report.deletions().to_string().red()
    );
}

/// Print the closing line after a report.
pub(crate) fn print_saved(path: &Path, written: bool, dry_run: bool) {
    if written {
        println!("{} Wrote {}", "OK".green().bold(), path.display().to_string().yellow());
    } else if dry_run {
        println!("{} Dry run, {} left untouched", "--".yellow(), path.display());
    }
}
