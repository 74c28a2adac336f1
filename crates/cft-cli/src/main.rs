//! Compose file tool CLI
//!
//! Switches docker-compose services between prebuilt images and local builds.

mod cli;
mod commands;
mod error;
mod interactive;
mod settings;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cft_fs::{CftConfig, ComposeFileSource};

use cli::{Cli, Commands};
use error::{CliError, Result};
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!(
            "{} Compose file tool",
            "cft".green().bold()
        );
        println!();
        println!("Run {} for available commands.", "cft --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        commands::run_completions(shell);
        return Ok(());
    }

    let config = CftConfig::load_or_default(CftConfig::default_path().as_deref())?;
    let cwd = std::env::current_dir()?;
    let settings = Settings::new(cli.compose_file.as_deref(), cli.force, &config, &cwd)?;
    if settings.compose_file.source == ComposeFileSource::WorkingDir {
        eprintln!(
            "{}",
            format!(
                "Neither -c flag nor CFT_COMPOSE given, using {}",
                settings.compose_file.path.display()
            )
            .yellow()
        );
    }

    execute_command(command, &settings)
}

fn execute_command(cmd: Commands, settings: &Settings) -> Result<()> {
    match cmd {
        Commands::Switch {
            services,
            dry_run,
            json,
        } => commands::run_switch(settings, &services, dry_run, json),
        Commands::Tag {
            tag,
            patterns,
            dry_run,
            json,
        } => commands::run_tag(settings, tag.as_deref(), &patterns, dry_run, json),
        Commands::GitCo {
            branch,
            remote_only,
            base,
            services,
        } => commands::run_git_co(
            settings,
            branch.as_deref(),
            remote_only,
            base.as_deref(),
            &services,
        ),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
