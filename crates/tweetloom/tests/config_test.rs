//! Tests for layered configuration loading and validation.

use std::io::Write;
use tempfile::NamedTempFile;
use tweetloom::{DEFAULT_API_BASE, TweetloomConfig, TweetloomErrorKind};

#[test]
fn test_bundled_defaults() {
    let config = TweetloomConfig::from_toml_str("").unwrap();

    assert!(!*config.dry_run());
    assert_eq!(*config.schedule().count(), 2);
    assert_eq!(config.schedule().days(), &vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(*config.schedule().time_range().start_hour(), 9);
    assert_eq!(*config.schedule().time_range().end_hour(), 21);
    assert_eq!(config.schedule().timezone(), "UTC");

    assert_eq!(config.categories().weight("crypto"), Some(0.25));
    assert_eq!(config.categories().weight("sociology"), Some(0.15));
    assert!((config.categories().total() - 1.0).abs() < 1e-9);

    assert_eq!(*config.content().max_length(), 280);
    assert_eq!(config.content().default_category(), "crypto");
    assert_eq!(*config.history().max_entries(), 100);
    assert_eq!(*config.platform().requests_per_window(), 50);
    assert_eq!(*config.platform().window_minutes(), 15);
    assert_eq!(config.platform().api_base_or_default(), DEFAULT_API_BASE);

    assert!(config.validate().is_ok());
}

#[test]
fn test_overlay_merges_with_defaults() {
    let config = TweetloomConfig::from_toml_str(
        r#"
dry_run = true

[schedule]
count = 5
timezone = "America/New_York"

[categories]
funny = 2.0
"#,
    )
    .unwrap();

    assert!(*config.dry_run());
    assert_eq!(*config.schedule().count(), 5);
    // Untouched keys keep their bundled values
    assert_eq!(config.schedule().days().len(), 7);
    assert_eq!(config.categories().weight("funny"), Some(2.0));
    assert_eq!(config.categories().weight("crypto"), Some(0.25));

    let tz = config.validate().unwrap();
    assert_eq!(tz, chrono_tz::America::New_York);
}

#[test]
fn test_unknown_timezone_rejected() {
    let config = TweetloomConfig::from_toml_str("[schedule]\ntimezone = \"Mars/Olympus\"").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.message.contains("Mars/Olympus"));
}

#[test]
fn test_schedule_bounds_rejected() {
    for overlay in [
        "[schedule]\ncount = 0",
        "[schedule]\ncount = 51",
        "[schedule]\ndays = [0, 7]",
        "[schedule.time_range]\nstart_hour = 21\nend_hour = 9",
        "[schedule.time_range]\nstart_hour = 10\nend_hour = 25",
    ] {
        let config = TweetloomConfig::from_toml_str(overlay).unwrap();
        assert!(config.validate().is_err(), "accepted: {}", overlay);
    }
}

#[test]
fn test_section_bounds_rejected() {
    for overlay in [
        "[content]\nmax_length = 0",
        "[content]\nmax_length = 1000",
        "[content]\ndefault_category = \" \"",
        "[history]\nmax_entries = 0",
        "[platform]\nrequests_per_window = 0",
        "[platform]\nwindow_minutes = 0",
    ] {
        let config = TweetloomConfig::from_toml_str(overlay).unwrap();
        assert!(config.validate().is_err(), "accepted: {}", overlay);
    }
}

#[test]
fn test_max_length_capped_at_platform_limit() {
    let config = TweetloomConfig::from_toml_str("[content]\nmax_length = 280").unwrap();
    assert!(config.validate().is_ok());

    let config = TweetloomConfig::from_toml_str("[content]\nmax_length = 281").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.message.contains("content.max_length"));
}

#[test]
fn test_invalid_weights_fail_to_load() {
    let err = TweetloomConfig::from_toml_str("[categories]\ncrypto = -1.0").unwrap_err();
    assert!(matches!(err.kind(), TweetloomErrorKind::Config(_)));

    let all_zero = "[categories]\ncrypto = 0.0\nfunny = 0.0\nfinance = 0.0\nsocial = 0.0\nsociology = 0.0";
    assert!(TweetloomConfig::from_toml_str(all_zero).is_err());
}

#[test]
fn test_wrong_shape_fails_to_load() {
    let err = TweetloomConfig::from_toml_str("[schedule]\ncount = \"many\"").unwrap_err();
    match err.kind() {
        TweetloomErrorKind::Config(e) => assert!(e.message.contains("Failed to parse configuration")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_explicit_file() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(file, "[history]\npath = \"elsewhere/history.json\"\nmax_entries = 10").unwrap();

    let config = TweetloomConfig::load(Some(file.path())).unwrap();
    assert_eq!(
        config.history().path(),
        &std::path::PathBuf::from("elsewhere/history.json")
    );
    assert_eq!(*config.history().max_entries(), 10);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(TweetloomConfig::load(Some(&missing)).is_err());
}

#[test]
fn test_dry_run_flag_only_turns_it_on() {
    let config = TweetloomConfig::from_toml_str("").unwrap();
    assert!(*config.clone().with_dry_run(true).dry_run());
    assert!(!*config.with_dry_run(false).dry_run());

    let config = TweetloomConfig::from_toml_str("dry_run = true").unwrap();
    assert!(*config.with_dry_run(false).dry_run());
}
