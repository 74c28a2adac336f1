//! git-co command implementation
//!
//! Checks out a branch in the build directory of each selected service.

use std::collections::HashSet;
use std::path::PathBuf;

use colored::Colorize;

use cft_compose::build_context;
use cft_git::{CheckoutOutcome, CheckoutRequest, SystemGit, checkout_branch};

use super::load_document;
use crate::error::{CliError, Result};
use crate::interactive;
use crate::settings::Settings;

/// Print git output indented below the service line.
fn print_git_output(text: &str) {
    for line in text.lines() {
        println!("    {line}");
    }
}

/// Run the git-co command.
pub fn run_git_co(
    settings: &Settings,
    branch: Option<&str>,
    remote_only: bool,
    base: Option<&str>,
    services: &[String],
) -> Result<()> {
    let branch = branch
        .filter(|b| !b.is_empty())
        .ok_or_else(|| CliError::user("No branch given, use -b <branch>"))?;

    let document = load_document(&settings.compose_file.path)?;

    let services = if services.is_empty() {
        if !settings.force
            && !interactive::confirm(&format!(
                "No services given, check out '{branch}' for all services?"
            ))?
        {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
        document.service_names()
    } else {
        services.to_vec()
    };

    let request = CheckoutRequest::new(branch)
        .with_base(base.unwrap_or(&settings.base_branch))
        .remote_only(remote_only);
    let base_dir = settings.compose_file.base_dir();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    for service in &services {
        let block = document.block(service)?;
        let Some(context) = build_context(&block.content) else {
            tracing::warn!(service = %service, "no build path");
            println!("{} {} has no build path, skipping", "--".yellow(), service.cyan());
            continue;
        };

        let dir = base_dir.join(&context);
        if !dir.is_dir() {
            tracing::warn!(service = %service, dir = %dir.display(), "build path is not a directory");
            println!(
                "{} {} build path {} is not a directory, skipping",
                "--".yellow(),
                service.cyan(),
                dir.display()
            );
            continue;
        }
        if !visited.insert(dir.clone()) {
            println!(
                "{} {} shares {} with an earlier service, skipping",
                "--".yellow(),
                service.cyan(),
                dir.display()
            );
            continue;
        }

        println!(
            "{} {} ({})",
            "=>".blue().bold(),
            service.cyan(),
            dir.display().to_string().yellow()
        );
        let outcome = checkout_branch(&SystemGit, &dir, &request, &mut |_, text| {
            print_git_output(text)
        })?;

        let status = match outcome {
            CheckoutOutcome::Skipped(_) => "--".yellow(),
            _ => "OK".green().bold(),
        };
        println!("{} {} {}", status, branch.cyan(), outcome);
    }

    Ok(())
}
