//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Compose file tool - switch docker-compose services between image and build
#[derive(Parser, Debug)]
#[command(name = "cft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// docker-compose file to edit
    #[arg(short, long, global = true, env = "CFT_COMPOSE", value_name = "FILE")]
    pub compose_file: Option<PathBuf>,

    /// Don't ask for confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Switch services between their image and their local build
    ///
    /// A service running an image gets its image commented out and its
    /// build and volumes directives enabled, and the other way round.
    ///
    /// Examples:
    ///   cft switch web               # Build web from source
    ///   cft switch web worker        # Toggle several services
    ///   cft switch web --dry-run     # Show the change only
    Switch {
        /// Services to switch
        services: Vec<String>,

        /// Show changes without writing the file
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Set or remove the tag of images
    ///
    /// Patterns are regular expressions matched against image names. Without
    /// a tag, matching images lose their tag.
    ///
    /// Examples:
    ///   cft tag -t v2 'myorg/.*'     # Retag all myorg images
    ///   cft tag -t latest            # Retag every image
    ///   cft tag postgres             # Strip the postgres tag
    Tag {
        /// Tag to set
        #[arg(short, long)]
        tag: Option<String>,

        /// Image name patterns (all images when omitted)
        patterns: Vec<String>,

        /// Show changes without writing the file
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check out a branch in the build directory of services
    ///
    /// Local changes are stashed. The branch tracks origin when it exists
    /// there and is created from the base branch otherwise.
    ///
    /// Examples:
    ///   cft git-co -b feature/login web api
    ///   cft git-co -b feature/login -r    # All services, remote branches only
    GitCo {
        /// Branch to check out
        #[arg(short, long)]
        branch: Option<String>,

        /// Only check out branches that exist on origin
        #[arg(short, long)]
        remote_only: bool,

        /// Base for branches origin does not have
        #[arg(long)]
        base: Option<String>,

        /// Services whose build directory to use (all when omitted)
        services: Vec<String>,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   cft completions bash > ~/.local/share/bash-completion/completions/cft
    ///   cft completions zsh > ~/.zfunc/_cft
    ///   cft completions fish > ~/.config/fish/completions/cft.fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_switch_command() {
        let cli = Cli::parse_from(["cft", "switch", "web", "db"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Switch { ref services, dry_run: false, json: false })
                if services == &["web", "db"]
        ));
    }

    #[test]
    fn parse_switch_dry_run() {
        let cli = Cli::parse_from(["cft", "switch", "--dry-run", "web"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Switch { dry_run: true, .. })
        ));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cft", "switch", "web", "-c", "stack.yml", "-f", "-v"]);
        assert_eq!(cli.compose_file, Some(PathBuf::from("stack.yml")));
        assert!(cli.force);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_tag_command() {
        let cli = Cli::parse_from(["cft", "tag", "-t", "v2", "myorg/.*", "redis"]);
        match cli.command {
            Some(Commands::Tag { tag, patterns, .. }) => {
                assert_eq!(tag.as_deref(), Some("v2"));
                assert_eq!(patterns, vec!["myorg/.*", "redis"]);
            }
            _ => panic!("Expected Tag command"),
        }
    }

    #[test]
    fn parse_git_co_command() {
        let cli = Cli::parse_from(["cft", "git-co", "-b", "feature", "-r", "web"]);
        match cli.command {
            Some(Commands::GitCo {
                branch,
                remote_only,
                base,
                services,
            }) => {
                assert_eq!(branch.as_deref(), Some("feature"));
                assert!(remote_only);
                assert_eq!(base, None);
                assert_eq!(services, vec!["web"]);
            }
            _ => panic!("Expected GitCo command"),
        }
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["cft", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
