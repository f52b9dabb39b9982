//! Static per-category data pools loaded from JSON files.

use derive_getters::Getters;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};
use tweetloom_error::{DataLoadError, DataLoadErrorKind};

/// File name of the crypto pool inside the data directory.
pub const CRYPTO_POOL_FILE: &str = "crypto_topics.json";
/// File name of the finance pool inside the data directory.
pub const FINANCE_POOL_FILE: &str = "finance_quotes.json";
/// File name of the joke pool inside the data directory.
pub const JOKE_POOL_FILE: &str = "jokes.json";
/// File name of the social pool inside the data directory.
pub const SOCIAL_POOL_FILE: &str = "social_topics.json";

/// Read and parse one pool file.
#[instrument(level = "debug", fields(path = %path.display()))]
pub(crate) fn read_pool<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DataLoadError::new(DataLoadErrorKind::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    let pool = serde_json::from_str(&raw).map_err(|e| {
        DataLoadError::new(DataLoadErrorKind::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    debug!(bytes = raw.len(), "Loaded data pool");
    Ok(pool)
}

#[track_caller]
fn require(pool: &str, field: &str, entries: &[String]) -> Result<(), DataLoadError> {
    if entries.is_empty() {
        return Err(DataLoadError::new(DataLoadErrorKind::EmptyPool {
            pool: pool.to_string(),
            field: field.to_string(),
        }));
    }
    Ok(())
}

/// Crypto topics, `{topic}`/`{hashtag}` templates and a hashtag pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CryptoPool {
    topics: Vec<String>,
    templates: Vec<String>,
    hashtags: Vec<String>,
}

impl CryptoPool {
    /// Build a pool from in-memory lists.
    pub fn new(topics: Vec<String>, templates: Vec<String>, hashtags: Vec<String>) -> Self {
        Self {
            topics,
            templates,
            hashtags,
        }
    }

    /// Load `crypto_topics.json` from a data directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        read_pool(&data_dir.as_ref().join(CRYPTO_POOL_FILE))
    }

    /// Reject pools with an empty list.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        require("crypto_topics", "topics", &self.topics)?;
        require("crypto_topics", "templates", &self.templates)?;
        require("crypto_topics", "hashtags", &self.hashtags)
    }
}

/// A quotation and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Quote {
    text: String,
    author: String,
}

impl Quote {
    /// Create a quote.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Finance quotes, tips and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FinancePool {
    quotes: Vec<Quote>,
    tips: Vec<String>,
    statistics: Vec<String>,
}

impl FinancePool {
    /// Build a pool from in-memory lists.
    pub fn new(quotes: Vec<Quote>, tips: Vec<String>, statistics: Vec<String>) -> Self {
        Self {
            quotes,
            tips,
            statistics,
        }
    }

    /// Load `finance_quotes.json` from a data directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        read_pool(&data_dir.as_ref().join(FINANCE_POOL_FILE))
    }

    /// Reject pools with an empty list.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        if self.quotes.is_empty() {
            return Err(DataLoadError::new(DataLoadErrorKind::EmptyPool {
                pool: "finance_quotes".to_string(),
                field: "quotes".to_string(),
            }));
        }
        require("finance_quotes", "tips", &self.tips)?;
        require("finance_quotes", "statistics", &self.statistics)
    }
}

/// Jokes keyed by style (e.g. `programming`, `puns`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokePool {
    styles: BTreeMap<String, Vec<String>>,
}

impl JokePool {
    /// Build a pool from `(style, jokes)` pairs.
    pub fn new<S, I>(styles: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<String>)>,
    {
        Self {
            styles: styles.into_iter().map(|(s, j)| (s.into(), j)).collect(),
        }
    }

    /// Load `jokes.json` from a data directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        read_pool(&data_dir.as_ref().join(JOKE_POOL_FILE))
    }

    /// Jokes grouped by style, in style-name order.
    pub fn styles(&self) -> &BTreeMap<String, Vec<String>> {
        &self.styles
    }

    /// Reject pools without styles or with a style that has no jokes.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        if self.styles.is_empty() {
            return Err(DataLoadError::new(DataLoadErrorKind::EmptyPool {
                pool: "jokes".to_string(),
                field: "styles".to_string(),
            }));
        }
        for (style, jokes) in &self.styles {
            require("jokes", style, jokes)?;
        }
        Ok(())
    }
}

/// Social topics, questions, insights and optional discussion starters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SocialPool {
    topics: Vec<String>,
    questions: Vec<String>,
    insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discussion_starters: Option<Vec<String>>,
}

impl SocialPool {
    /// Build a pool from in-memory lists; starters fall back to the built-in set.
    pub fn new(topics: Vec<String>, questions: Vec<String>, insights: Vec<String>) -> Self {
        Self {
            topics,
            questions,
            insights,
            discussion_starters: None,
        }
    }

    /// Replace the discussion starters.
    pub fn with_discussion_starters(mut self, starters: Vec<String>) -> Self {
        self.discussion_starters = Some(starters);
        self
    }

    /// Load `social_topics.json` from a data directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        read_pool(&data_dir.as_ref().join(SOCIAL_POOL_FILE))
    }

    /// Reject pools with an empty list.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        require("social_topics", "topics", &self.topics)?;
        require("social_topics", "questions", &self.questions)?;
        require("social_topics", "insights", &self.insights)?;
        if let Some(starters) = &self.discussion_starters {
            require("social_topics", "discussion_starters", starters)?;
        }
        Ok(())
    }
}
