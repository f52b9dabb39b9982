//! Tweetloom CLI binary.
//!
//! This binary runs the scheduled bot and the maintenance commands around it:
//! - Post on a random weekly schedule until interrupted
//! - Generate, preview and post single tweets
//! - Inspect, export and clean up the post history

use clap::Parser;
use tweetloom::{ObservabilityConfig, Tweetloom, TweetloomConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Credentials may live in .env
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(&observability)?;

    let config = TweetloomConfig::load(cli.config.as_deref())?.with_dry_run(cli.dry_run);

    if cli.command == Commands::Validate {
        cli::validate(config).await?;
        return Ok(());
    }

    let bot = Tweetloom::build(config).await?;

    // Execute the requested command
    match cli.command {
        Commands::Run => cli::run(&bot).await?,
        Commands::Once { yes } => cli::once(&bot, yes).await?,
        Commands::Post { text } => cli::post(&bot, &text).await?,
        Commands::Schedule => cli::schedule(&bot)?,
        Commands::Stats { recent } => cli::stats(&bot, recent).await?,
        Commands::Export { format, output } => {
            cli::export(&bot, &format, output.as_deref()).await?
        }
        Commands::Cleanup { days } => cli::cleanup(&bot, days).await?,
        Commands::Whoami => cli::whoami(&bot).await?,
        Commands::RefreshMetrics { limit } => cli::refresh_metrics(&bot, limit).await?,
        Commands::Validate => {}
    }

    Ok(())
}
