//! History command handlers.

use std::path::Path;
use tracing::error;
use tweetloom::{ExportFormat, Tweetloom, TweetloomResult};

/// Print statistics, the category distribution and the latest posts.
pub async fn stats(bot: &Tweetloom, recent: usize) -> TweetloomResult<()> {
    let history = bot.history();
    let stats = history.statistics().await;

    println!("History: {}", history.path().display());
    println!("{:-<80}", "");
    println!("Total posts:       {}", stats.total_count());
    println!("Successful:        {}", stats.success_count());
    println!("Failed:            {}", stats.failure_count());
    println!("Success rate:      {:.1}%", stats.success_rate() * 100.0);
    println!("Impressions:       {}", stats.total_impressions());
    println!("Engagements:       {}", stats.total_engagements());
    println!("Engagement rate:   {:.2}%", stats.engagement_rate() * 100.0);

    if !stats.category_counts().is_empty() {
        println!("{:-<80}", "");
        println!("Categories:");
        for (category, count) in stats.category_counts() {
            let share = *count as f64 / *stats.total_count() as f64 * 100.0;
            println!("  {:<12} {:>5} ({:.1}%)", category, count, share);
        }
    }

    let records = history.recent(recent).await;
    if !records.is_empty() {
        println!("{:-<80}", "");
        println!("Recent posts:");
        for record in records.iter().rev() {
            let preview: String = record.content().chars().take(60).collect();
            println!(
                "  {} [{}] {} likes={} retweets={}",
                record.timestamp(),
                record.category(),
                preview,
                record.likes(),
                record.retweets()
            );
        }
    }
    Ok(())
}

/// Export the history.
pub async fn export(bot: &Tweetloom, format: &str, output: Option<&Path>) -> TweetloomResult<()> {
    let written = match ExportFormat::parse(format) {
        Ok(format) => bot.history().export(format, output).await,
        Err(e) => Err(e),
    };

    match written {
        Ok(path) => {
            println!("Exported history to {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Export failed");
            Err(e.into())
        }
    }
}

/// Remove records older than `days`.
pub async fn cleanup(bot: &Tweetloom, days: u32) -> TweetloomResult<()> {
    let removed = bot.history().cleanup_older_than(days).await?;
    println!("Removed {} records older than {} days.", removed, days);
    Ok(())
}

/// Refresh engagement metrics for the latest posts.
pub async fn refresh_metrics(bot: &Tweetloom, limit: usize) -> TweetloomResult<()> {
    let report = bot.refresh_metrics(limit).await;
    println!(
        "Checked {} posts: {} updated, {} missing, {} failed.",
        report.checked(),
        report.updated(),
        report.missing(),
        report.failed()
    );
    Ok(())
}
