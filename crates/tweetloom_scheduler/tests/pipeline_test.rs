//! Tests for the generate-post-record pipeline.

mod test_utils;

use tempfile::TempDir;
use test_utils::{MockBehavior, MockPoster, pipeline};
use tweetloom_content::GeneratedTweet;
use tweetloom_scheduler::FireOutcome;

#[tokio::test]
async fn test_successful_fire_is_recorded() {
    let dir = TempDir::new().unwrap();
    let poster = MockPoster::new(MockBehavior::Succeed);
    let pipeline = pipeline(&dir, poster.clone(), false).await;

    let outcome = pipeline.fire().await;
    assert!(matches!(outcome, FireOutcome::Posted { .. }));
    assert_eq!(outcome.post_id(), Some("post-1"));

    let records = pipeline.history().load().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), "post-1");
    assert_eq!(records[0].category(), "crypto");
    assert_eq!(records[0].content(), outcome.text());
    assert!(*records[0].success());
}

#[tokio::test]
async fn test_failed_fire_is_not_recorded() {
    let dir = TempDir::new().unwrap();
    let poster = MockPoster::new(MockBehavior::Fail);
    let pipeline = pipeline(&dir, poster.clone(), false).await;

    let outcome = pipeline.fire().await;
    match &outcome {
        FireOutcome::Failed { error, .. } => assert!(error.is_recoverable()),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!outcome.is_success());
    assert_eq!(poster.calls(), 1);
    assert!(pipeline.history().load().await.is_empty());
}

#[tokio::test]
async fn test_dry_run_simulates_without_posting() {
    let dir = TempDir::new().unwrap();
    let poster = MockPoster::new(MockBehavior::Succeed);
    let pipeline = pipeline(&dir, poster.clone(), true).await;

    let outcome = pipeline.fire().await;
    let FireOutcome::Simulated { id, .. } = &outcome else {
        panic!("expected simulated outcome, got {outcome:?}");
    };
    assert!(id.starts_with("dry-run-"));
    assert_eq!(poster.calls(), 0);

    let records = pipeline.history().load().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), id);
}

#[tokio::test]
async fn test_publish_custom_text() {
    let dir = TempDir::new().unwrap();
    let poster = MockPoster::new(MockBehavior::Succeed);
    let pipeline = pipeline(&dir, poster.clone(), false).await;

    let outcome = pipeline
        .publish(GeneratedTweet::new("finance", "Pay yourself first."))
        .await;
    assert!(outcome.is_success());

    let record = pipeline.history().get("post-1").await.unwrap();
    assert_eq!(record.category(), "finance");
    assert_eq!(record.content(), "Pay yourself first.");
}

#[tokio::test]
async fn test_publish_trims_long_text() {
    let dir = TempDir::new().unwrap();
    let poster = MockPoster::new(MockBehavior::Succeed);
    let pipeline = pipeline(&dir, poster.clone(), false).await;

    let long = format!("{} #Saving", "Spend less than you earn. ".repeat(20));
    let outcome = pipeline
        .publish(GeneratedTweet::new("finance", long))
        .await;

    assert!(outcome.text().chars().count() <= 280);
    let record = pipeline.history().get("post-1").await.unwrap();
    assert!(record.content().chars().count() <= 280);
    assert_eq!(record.content(), outcome.text());
}
