//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tweetloom - scheduled tweet bot with weighted content and post history
#[derive(Parser, Debug)]
#[command(name = "tweetloom")]
#[command(about = "Scheduled tweet bot with weighted content and post history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered above the discovered ones
    #[arg(short, long, global = true, env = "TWEETLOOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log and record posts without calling the API
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Draw this week's slots and post at each until interrupted (Ctrl-C)
    Run,

    /// Generate one tweet and print it
    Once {
        /// Post (and record) the generated tweet
        #[arg(long)]
        yes: bool,
    },

    /// Post custom text, trimmed to the length budget
    Post {
        /// Text to post
        text: String,
    },

    /// Draw and list slots without starting the scheduler
    Schedule,

    /// Show history statistics and recent posts
    Stats {
        /// Number of recent posts to list
        #[arg(long, default_value = "10")]
        recent: usize,
    },

    /// Export the history
    Export {
        /// Output format (json or csv)
        #[arg(long, default_value = "json")]
        format: String,

        /// Output path (defaults to a timestamped file next to the history)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Remove history records older than a number of days
    Cleanup {
        /// Age limit in days
        #[arg(long, default_value = "90")]
        days: u32,
    },

    /// Check the configuration and validate a sample from every generator
    Validate,

    /// Show the account posts are published as
    Whoami,

    /// Fetch engagement metrics for recent posts
    RefreshMetrics {
        /// Number of recent posts to refresh
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tweetloom", "run", "--dry-run", "-v", "--config", "bot.toml"])
            .unwrap();
        assert_eq!(cli.command, Commands::Run);
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tweetloom", "stats"]).unwrap();
        assert_eq!(cli.command, Commands::Stats { recent: 10 });
        assert!(!cli.dry_run);

        let cli = Cli::try_parse_from(["tweetloom", "cleanup"]).unwrap();
        assert_eq!(cli.command, Commands::Cleanup { days: 90 });

        let cli = Cli::try_parse_from(["tweetloom", "export"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Export {
                format: "json".to_string(),
                output: None
            }
        );
    }

    #[test]
    fn test_once_requires_explicit_confirmation() {
        let cli = Cli::try_parse_from(["tweetloom", "once"]).unwrap();
        assert_eq!(cli.command, Commands::Once { yes: false });

        let cli = Cli::try_parse_from(["tweetloom", "once", "--yes"]).unwrap();
        assert_eq!(cli.command, Commands::Once { yes: true });
    }

    #[test]
    fn test_kebab_case_subcommand() {
        let cli = Cli::try_parse_from(["tweetloom", "refresh-metrics", "--limit", "5"]).unwrap();
        assert_eq!(cli.command, Commands::RefreshMetrics { limit: 5 });
    }

    #[test]
    fn test_post_requires_text() {
        assert!(Cli::try_parse_from(["tweetloom", "post"]).is_err());
        let cli = Cli::try_parse_from(["tweetloom", "post", "gm #Bitcoin"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Post {
                text: "gm #Bitcoin".to_string()
            }
        );
    }
}
