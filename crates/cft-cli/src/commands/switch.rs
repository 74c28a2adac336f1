//! Switch command implementation
//!
//! Toggles services between image mode and build mode.

use colored::Colorize;
use serde_json::json;

use super::{load_document, print_report, print_saved, save_document};
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Run the switch command.
///
/// Every service is toggled against the file as it was read; the file is
/// written once, after all services succeeded.
pub fn run_switch(settings: &Settings, services: &[String], dry_run: bool, json: bool) -> Result<()> {
    if services.is_empty() {
        return Err(CliError::user("No service given, nothing to switch"));
    }

    let path = &settings.compose_file.path;
    let mut document = load_document(path)?;
    let toggles = document.switch_services(services)?;
    let report = document.report();

    if json {
        let written = save_document(path, &document, dry_run)?;
        let output = json!({
            "file": path,
            "dry_run": dry_run,
            "written": written,
            "toggles": toggles,
            "changes": report.edits().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for toggle in &toggles {
        if toggle.edit.is_none() {
            println!(
                "{} {}: no image, build or volumes directives, unchanged",
                "--".yellow(),
                toggle.service.cyan()
            );
            continue;
        }
        println!(
            "{} {}: {} -> {}",
            "=>".blue().bold(),
            toggle.service.cyan(),
            toggle.from.to_string().yellow(),
            toggle.to.to_string().green()
        );
    }
    print_report(&report);
    let written = save_document(path, &document, dry_run)?;
    print_saved(path, written, dry_run);

    Ok(())
}
