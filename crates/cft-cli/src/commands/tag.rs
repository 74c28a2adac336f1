//! Tag command implementation

use colored::Colorize;
use serde_json::json;

use cft_compose::compile_patterns;

use super::{load_document, print_report, print_saved, save_document};
use crate::error::Result;
use crate::interactive;
use crate::settings::Settings;

/// Run the tag command.
///
/// Sets `tag` on every image matching one of `patterns`, or strips the tag
/// when none is given. Stripping every tag of every image needs confirmation.
pub fn run_tag(
    settings: &Settings,
    tag: Option<&str>,
    patterns: &[String],
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let tag = tag.filter(|t| !t.is_empty());
    if tag.is_none()
        && patterns.is_empty()
        && !settings.force
        && !interactive::confirm("Really remove all tags from all images?")?
    {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    let regexes = compile_patterns(patterns)?;
    let path = &settings.compose_file.path;
    let mut document = load_document(path)?;
    document.retag(&regexes, tag);
    let report = document.report();

    if json {
        let written = save_document(path, &document, dry_run)?;
        let output = json!({
            "file": path,
            "dry_run": dry_run,
            "written": written,
            "tag": tag,
            "patterns": patterns,
            "changes": report.edits().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match tag {
        Some(tag) => println!("{} Tagging images with {}", "=>".blue().bold(), tag.cyan()),
        None => println!("{} Removing image tags", "=>".blue().bold()),
    }
    print_report(&report);
    let written = save_document(path, &document, dry_run)?;
    print_saved(path, written, dry_run);

    Ok(())
}
