//! Advisory checks on post text.

use crate::trim::DEFAULT_MAX_LENGTH;
use derive_getters::Getters;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, instrument};

const BLOCKED_WORDS: &[&str] = &[
    "hate", "kill", "murder", "terrorist", "bomb", "scam", "fraud", "cheat", "steal", "sucker",
    "idiot", "stupid", "moron",
];

const RESERVED_HASHTAGS: &[&str] = &["twitter", "admin", "support", "help", "api", "oauth", "security"];

const MAX_HASHTAGS: usize = 5;
const MAX_MENTIONS: usize = 3;
const MAX_URLS: usize = 2;
const MAX_REPEAT_RUN: usize = 3;
const CAPS_RATIO: f64 = 0.7;
const SHORT_TEXT: usize = 50;

static DEFAULT_VALIDATOR: OnceLock<ContentValidator> = OnceLock::new();

/// Outcome of validating a piece of post text.
///
/// Only `errors` make the text invalid. Warnings and suggestions are
/// informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ContentValidation {
    errors: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl ContentValidation {
    /// True when no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks length, blocked words and spam-like patterns.
#[derive(Debug, Clone)]
pub struct ContentValidator {
    max_length: usize,
    blocked: Regex,
    hashtag: Regex,
    mention: Regex,
    url: Regex,
    caps_noise: Regex,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl ContentValidator {
    /// Create a validator for the given length budget.
    pub fn new(max_length: usize) -> Self {
        let blocked = Regex::new(&format!(r"(?i)\b(?:{})\b", BLOCKED_WORDS.join("|")))
            .expect("Valid blocked word regex");
        let hashtag = Regex::new(r"#(\w+)").expect("Valid hashtag regex");
        let mention = Regex::new(r"@\w+").expect("Valid mention regex");
        let url = Regex::new(r"https?://\S+|www\.\S+").expect("Valid URL regex");
        let caps_noise = Regex::new(r"[@#]\w+|https?://\S+").expect("Valid caps noise regex");

        Self {
            max_length,
            blocked,
            hashtag,
            mention,
            url,
            caps_noise,
        }
    }

    /// Shared validator for the platform limit.
    pub fn shared() -> &'static ContentValidator {
        DEFAULT_VALIDATOR.get_or_init(ContentValidator::default)
    }

    /// Validate `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetloom_content::ContentValidator;
    ///
    /// let validator = ContentValidator::new(280);
    /// assert!(validator.validate("Steady saving beats clever timing. #Finance").is_valid());
    /// assert!(!validator.validate("This is a scam").is_valid());
    /// ```
    #[instrument(skip(self, text), fields(text_len = text.chars().count()))]
    pub fn validate(&self, text: &str) -> ContentValidation {
        let mut result = ContentValidation::default();
        let length = text.chars().count();

        if length > self.max_length {
            result.errors.push(format!(
                "Text is {} characters; the limit is {}",
                length, self.max_length
            ));
        }

        let mut blocked: Vec<String> = self
            .blocked
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        blocked.sort();
        blocked.dedup();
        if !blocked.is_empty() {
            result
                .errors
                .push(format!("Contains blocked words: {}", blocked.join(", ")));
        }

        let hashtags: Vec<&str> = self
            .hashtag
            .captures_iter(text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        if hashtags.len() > MAX_HASHTAGS {
            result.warnings.push(format!(
                "{} hashtags; more than {} looks like spam",
                hashtags.len(),
                MAX_HASHTAGS
            ));
        }
        for tag in &hashtags {
            if RESERVED_HASHTAGS.contains(&tag.to_lowercase().as_str()) {
                result
                    .warnings
                    .push(format!("Hashtag #{} is reserved by the platform", tag));
            }
        }

        let mentions = self.mention.find_iter(text).count();
        if mentions > MAX_MENTIONS {
            result
                .warnings
                .push(format!("{} mentions; keep it to {} or fewer", mentions, MAX_MENTIONS));
        }

        let urls = self.url.find_iter(text).count();
        if urls > MAX_URLS {
            result
                .warnings
                .push(format!("{} links; keep it to {} or fewer", urls, MAX_URLS));
        }

        if has_repeated_run(text, MAX_REPEAT_RUN) {
            result
                .warnings
                .push("Contains a character repeated four or more times".to_string());
        }

        if self.mostly_capitals(text) {
            result
                .warnings
                .push("Mostly capital letters reads as shouting".to_string());
        }

        if result.is_valid() {
            if hashtags.is_empty() {
                result
                    .suggestions
                    .push("Add a hashtag or two to reach more readers".to_string());
            }
            if length < SHORT_TEXT {
                result
                    .suggestions
                    .push("Very short text; consider adding context".to_string());
            }
        }

        debug!(
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated content"
        );
        result
    }

    fn mostly_capitals(&self, text: &str) -> bool {
        let cleaned = self.caps_noise.replace_all(text, "");
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        if words.is_empty() {
            return false;
        }
        let shouted = words
            .iter()
            .filter(|w| w.chars().count() > 1 && is_upper(w))
            .count();
        shouted as f64 / words.len() as f64 > CAPS_RATIO
    }
}

/// Validate `text` against a length budget.
pub fn validate_tweet(text: &str, max_length: usize) -> ContentValidation {
    if max_length == DEFAULT_MAX_LENGTH {
        ContentValidator::shared().validate(text)
    } else {
        ContentValidator::new(max_length).validate(text)
    }
}

/// Has cased characters and none of them lowercase.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Whether some character repeats more than `limit` times in a row.
fn has_repeated_run(text: &str, limit: usize) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
            if run > limit {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}
