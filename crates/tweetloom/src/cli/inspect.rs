//! Read-only command handlers: schedule preview, validation, identity.

use tweetloom::{SlotListing, Tweetloom, TweetloomConfig, TweetloomResult, ValidationError};

pub(super) fn print_slots(slots: &[SlotListing]) {
    println!("Scheduled tweets:");
    println!("{:-<80}", "");
    for slot in slots {
        let next = slot
            .next_run()
            .as_ref()
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:<10} {:<40} next: {}", slot.id(), slot.description(), next);
    }
    println!("{:-<80}", "");
    println!("Total: {} slots per week", slots.len());
}

/// Draw slots and list them without starting the scheduler.
pub fn schedule(bot: &Tweetloom) -> TweetloomResult<()> {
    let mut scheduler = bot.scheduler()?;
    let mut rng = rand::thread_rng();
    scheduler.schedule_slots(&mut rng);
    print_slots(&scheduler.list_slots());
    Ok(())
}

/// Validate the configuration, then generate and validate one sample per
/// generator.
pub async fn validate(config: TweetloomConfig) -> TweetloomResult<()> {
    println!("Configuration:");
    match config.validate() {
        Ok(tz) => {
            let schedule = config.schedule();
            println!(
                "  ok: {} posts/week, hours {}-{} in {}",
                schedule.count(),
                schedule.time_range().start_hour(),
                schedule.time_range().end_hour(),
                tz
            );
        }
        Err(e) => {
            println!("  invalid: {}", e.message);
            return Err(e.into());
        }
    }

    let bot = Tweetloom::build(config).await?;
    let checks = {
        let mut rng = rand::thread_rng();
        bot.sample_checks(&mut rng)
    };

    println!("Content samples:");
    let mut invalid = 0;
    for check in &checks {
        let validation = check.validation();
        let status = if validation.is_valid() { "ok" } else { "invalid" };
        println!("  [{}] {}: {}", status, check.tweet().category(), check.tweet().text());
        for problem in validation.errors() {
            println!("      error: {}", problem);
        }
        for warning in validation.warnings() {
            println!("      warning: {}", warning);
        }
        if !validation.is_valid() {
            invalid += 1;
        }
    }

    if invalid > 0 {
        return Err(ValidationError::new(vec![format!(
            "{} of {} samples failed validation",
            invalid,
            checks.len()
        )])
        .into());
    }
    println!("All {} samples valid.", checks.len());
    Ok(())
}

/// Print the authenticated account.
pub async fn whoami(bot: &Tweetloom) -> TweetloomResult<()> {
    match bot.poster().identity().await? {
        Some(identity) => println!(
            "@{} ({}) id {} on {}",
            identity.handle(),
            identity.name(),
            identity.id(),
            bot.poster().name()
        ),
        None => println!("{} did not report an identity", bot.poster().name()),
    }
    Ok(())
}
