//! Posting command handlers.

use super::inspect::print_slots;
use tracing::{error, info, warn};
use tweetloom::{FireOutcome, Tweetloom, TweetloomResult};

/// Schedule this week's slots and post at each until Ctrl-C.
pub async fn run(bot: &Tweetloom) -> TweetloomResult<()> {
    if bot.dry_run() {
        info!("Dry run: posts are logged and recorded, nothing is published");
    } else {
        match bot.poster().identity().await? {
            Some(identity) => info!(handle = %identity.handle(), name = %identity.name(), "Authenticated"),
            None => warn!("Posting API did not report an identity"),
        }
    }

    let mut scheduler = bot.scheduler()?;
    {
        let mut rng = rand::thread_rng();
        scheduler.schedule_slots(&mut rng);
    }
    print_slots(&scheduler.list_slots());

    scheduler.run_until_shutdown(shutdown_signal()).await?;
    println!("Scheduler stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Could not listen for Ctrl-C; stop the process to exit");
        std::future::pending::<()>().await;
    }
}

/// Generate one tweet, print it and post it only when confirmed.
pub async fn once(bot: &Tweetloom, yes: bool) -> TweetloomResult<()> {
    let pipeline = bot.pipeline();
    let tweet = pipeline.generate();

    println!("Category: {}", tweet.category());
    println!("{:-<80}", "");
    println!("{}", tweet.text());
    println!("{:-<80}", "");
    println!("{} characters", tweet.text().chars().count());

    if !yes {
        println!("Not posted. Re-run with --yes to publish.");
        return Ok(());
    }
    report(pipeline.publish(tweet).await)
}

/// Post hand-written text.
pub async fn post(bot: &Tweetloom, text: &str) -> TweetloomResult<()> {
    let (trimmed, validation) = bot.check_text(text);

    for warning in validation.warnings() {
        println!("Warning: {}", warning);
    }
    if trimmed != text {
        println!("Trimmed to {} characters.", trimmed.chars().count());
    }

    report(bot.post_text(text).await?)
}

fn report(outcome: FireOutcome) -> TweetloomResult<()> {
    match outcome {
        FireOutcome::Posted { id, category, .. } => {
            println!("Posted {} ({})", id, category);
            Ok(())
        }
        FireOutcome::Simulated { id, category, .. } => {
            println!("Dry run: recorded as {} ({})", id, category);
            Ok(())
        }
        FireOutcome::Failed { error, .. } => Err(error.into()),
    }
}
