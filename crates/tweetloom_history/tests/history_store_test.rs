//! Tests for the file-backed history store.

use chrono::{Duration, Utc};
use tempfile::TempDir;
use tweetloom_history::{
    ContentRecord, ContentRecordBuilder, ExportFormat, HistoryQuery, HistoryStore, PostMetrics,
    format_timestamp,
};

async fn store_in(dir: &TempDir, max_entries: usize) -> HistoryStore {
    HistoryStore::open(dir.path().join("storage").join("history.json"), max_entries).await
}

fn record(id: &str, category: &str) -> ContentRecord {
    ContentRecord::posted(id, format!("post {id}"), category)
}

#[tokio::test]
async fn test_open_creates_empty_log() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    assert!(store.path().exists());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn test_append_respects_cap_in_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    for i in 0..150 {
        store.append(record(&i.to_string(), "crypto")).await.unwrap();
    }

    let records = store.load().await;
    assert_eq!(records.len(), 100);
    let ids: Vec<String> = records.iter().map(|r| r.id().clone()).collect();
    let expected: Vec<String> = (50..150).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_corrupt_log_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load().await.is_empty());
    assert_eq!(*store.statistics().await.total_count(), 0);

    store.append(record("1", "funny")).await.unwrap();
    assert_eq!(store.load().await.len(), 1);
}

#[tokio::test]
async fn test_missing_log_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;
    std::fs::remove_file(store.path()).unwrap();

    assert!(store.load().await.is_empty());
    assert!(store.get("anything").await.is_none());
}

#[tokio::test]
async fn test_statistics_mixed_history() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let posted = ContentRecordBuilder::default()
        .id("1")
        .content("gm")
        .category("crypto")
        .impressions(100u64)
        .likes(5u64)
        .build()
        .unwrap();
    let failed = ContentRecordBuilder::default()
        .id("2")
        .content("oops")
        .category("funny")
        .success(false)
        .build()
        .unwrap();
    store.save(vec![posted, failed]).await.unwrap();

    let stats = store.statistics().await;
    assert_eq!(*stats.total_count(), 2);
    assert_eq!(*stats.success_count(), 1);
    assert_eq!(*stats.failure_count(), 1);
    assert_eq!(*stats.success_rate(), 0.5);
    assert_eq!(*stats.total_impressions(), 100);
    assert_eq!(*stats.total_engagements(), 5);
    assert_eq!(*stats.engagement_rate(), 0.05);
    assert_eq!(stats.category_counts()["crypto"], 1);
    assert_eq!(stats.category_counts()["funny"], 1);
}

#[tokio::test]
async fn test_statistics_empty_history() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let stats = store.statistics().await;
    assert_eq!(*stats.total_count(), 0);
    assert_eq!(*stats.success_rate(), 0.0);
    assert_eq!(*stats.engagement_rate(), 0.0);
    assert!(stats.category_counts().is_empty());
}

#[tokio::test]
async fn test_query_by_category_and_date() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let old = ContentRecordBuilder::default()
        .id("old")
        .content("old crypto")
        .category("crypto")
        .timestamp(format_timestamp(Utc::now() - Duration::days(30)))
        .build()
        .unwrap();
    store.append(old).await.unwrap();
    store.append(record("a", "crypto")).await.unwrap();
    store.append(record("b", "finance")).await.unwrap();
    store.append(record("c", "crypto")).await.unwrap();

    let crypto = store
        .query(&HistoryQuery::new().with_category("crypto"))
        .await;
    assert_eq!(crypto.len(), 3);

    let recent_crypto = store
        .query(
            &HistoryQuery::new()
                .with_category("crypto")
                .with_since(Utc::now() - Duration::days(1)),
        )
        .await;
    let ids: Vec<&str> = recent_crypto.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let last = store.recent(2).await;
    assert_eq!(last.len(), 2);
    assert_eq!(last[1].id(), "c");
}

#[tokio::test]
async fn test_cleanup_keeps_recent_and_unparseable() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let stale = ContentRecordBuilder::default()
        .id("stale")
        .content("x")
        .timestamp(format_timestamp(Utc::now() - Duration::days(200)))
        .build()
        .unwrap();
    let odd = ContentRecordBuilder::default()
        .id("odd")
        .content("x")
        .timestamp("sometime")
        .build()
        .unwrap();
    store
        .save(vec![stale, odd, record("fresh", "social")])
        .await
        .unwrap();

    let removed = store.cleanup_older_than(90).await.unwrap();
    assert_eq!(removed, 1);

    let ids: Vec<String> = store.load().await.iter().map(|r| r.id().clone()).collect();
    assert_eq!(ids, vec!["odd", "fresh"]);
}

#[tokio::test]
async fn test_cleanup_with_unrepresentable_age_removes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let ancient = ContentRecordBuilder::default()
        .id("ancient")
        .content("x")
        .timestamp("1970-01-01T00:00:00Z")
        .build()
        .unwrap();
    store
        .save(vec![ancient, record("fresh", "social")])
        .await
        .unwrap();

    assert_eq!(store.cleanup_older_than(u32::MAX).await.unwrap(), 0);
    assert_eq!(store.load().await.len(), 2);
}

#[tokio::test]
async fn test_update_metrics() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;
    store.append(record("7", "crypto")).await.unwrap();

    let metrics = PostMetrics::new(1_000, 20, 3, 2);
    assert!(store.update_metrics("7", metrics).await.unwrap());
    assert!(!store.update_metrics("missing", metrics).await.unwrap());

    let updated = store.get("7").await.unwrap();
    assert_eq!(updated.metrics(), metrics);
    assert_eq!(updated.engagements(), 25);
}

#[tokio::test]
async fn test_export_json_and_csv() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;
    store.append(record("1", "crypto")).await.unwrap();
    store.append(record("2", "finance")).await.unwrap();

    let json_path = dir.path().join("out.json");
    store
        .export(ExportFormat::Json, Some(&json_path))
        .await
        .unwrap();
    let exported: Vec<ContentRecord> =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(exported, store.load().await);

    let csv_path = dir.path().join("out.csv");
    store
        .export(ExportFormat::Csv, Some(&csv_path))
        .await
        .unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,content,timestamp,category,impressions,likes,retweets,replies,success"
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn test_export_empty_csv_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let path = dir.path().join("empty.csv");
    store.export(ExportFormat::Csv, Some(&path)).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[tokio::test]
async fn test_export_default_path_next_to_log() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 100).await;

    let path = store.export(ExportFormat::Json, None).await.unwrap();
    assert_eq!(path.parent(), store.path().parent());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("history_export_"));
    assert!(name.ends_with(".json"));
}

#[test]
fn test_unsupported_format() {
    let err = ExportFormat::parse("xlsx").unwrap_err();
    assert!(err.to_string().contains("xlsx"));
    assert_eq!(ExportFormat::parse(" Json ").unwrap(), ExportFormat::Json);
}
