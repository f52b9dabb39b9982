//! Layered configuration for the tweetloom bot.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Bundled defaults (`tweetloom.toml` at the repository root)
//! 2. `~/.config/tweetloom/tweetloom.toml`
//! 3. `./tweetloom.toml`
//! 4. A file passed explicitly (`--config`)
//! 5. `TWEETLOOM__*` environment variables, e.g. `TWEETLOOM__SCHEDULE__COUNT=3`
//!
//! Credentials are not part of this configuration; see
//! [`BEARER_TOKEN_ENV`](tweetloom_social::BEARER_TOKEN_ENV).

use chrono_tz::Tz;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};
use tweetloom_content::{CategoryWeights, DEFAULT_MAX_LENGTH};
use tweetloom_error::{ConfigError, TweetloomResult};
use tweetloom_scheduler::ScheduleConfig;
use tweetloom_social::{DEFAULT_API_BASE, PostLimiter};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../../tweetloom.toml");

const ENV_PREFIX: &str = "TWEETLOOM";
const ENV_SEPARATOR: &str = "__";

/// Where content pools live and how long a tweet may be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ContentConfig {
    /// Directory holding the JSON data pools
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
    /// Length budget in characters
    #[serde(default = "default_max_length")]
    max_length: usize,
    /// Category used when a weighted category has no generator
    #[serde(default = "default_category")]
    default_category: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_category() -> String {
    tweetloom_content::CRYPTO.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_length: default_max_length(),
            default_category: default_category(),
        }
    }
}

/// Location and size of the post history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HistoryConfig {
    /// JSON history file
    #[serde(default = "default_history_path")]
    path: PathBuf,
    /// Entries kept before the oldest are evicted
    #[serde(default = "default_max_entries")]
    max_entries: usize,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("storage/history.json")
}

fn default_max_entries() -> usize {
    100
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            max_entries: default_max_entries(),
        }
    }
}

/// Posting API endpoint and client-side rate limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlatformConfig {
    /// API root; `None` uses the production endpoint
    #[serde(default)]
    api_base: Option<String>,
    /// Requests allowed per window
    #[serde(default = "default_requests_per_window")]
    requests_per_window: u32,
    /// Window length in minutes
    #[serde(default = "default_window_minutes")]
    window_minutes: u64,
}

fn default_requests_per_window() -> u32 {
    50
}

fn default_window_minutes() -> u64 {
    15
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            requests_per_window: default_requests_per_window(),
            window_minutes: default_window_minutes(),
        }
    }
}

impl PlatformConfig {
    /// Configured API root, or the production endpoint.
    pub fn api_base_or_default(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Rate limiter matching this configuration.
    pub fn limiter(&self) -> PostLimiter {
        PostLimiter::new(
            self.requests_per_window,
            Duration::from_secs(self.window_minutes * 60),
        )
    }
}

/// Complete bot configuration.
///
/// # Example
///
/// ```no_run
/// use tweetloom::TweetloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TweetloomConfig::load(None)?;
/// let tz = config.validate()?;
/// println!("{} posts per week in {}", config.schedule().count(), tz);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TweetloomConfig {
    /// Log and record posts without calling the API
    #[serde(default)]
    dry_run: bool,
    /// Weekly slot drawing
    #[serde(default)]
    schedule: ScheduleConfig,
    /// Relative category weights
    #[serde(default)]
    categories: CategoryWeights,
    /// Content pools and length budget
    #[serde(default)]
    content: ContentConfig,
    /// History log
    #[serde(default)]
    history: HistoryConfig,
    /// Posting API
    #[serde(default)]
    platform: PlatformConfig,
}

impl Default for TweetloomConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            schedule: ScheduleConfig::default(),
            categories: CategoryWeights::default(),
            content: ContentConfig::default(),
            history: HistoryConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl TweetloomConfig {
    /// Load configuration from every source, `explicit` ranking above the
    /// discovered files and below the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `explicit` is missing, a source fails to
    /// parse, or a value has the wrong shape.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> TweetloomResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tweetloom/tweetloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("tweetloom").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("schedule.days"),
        );

        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with one TOML document, ignoring
    /// discovered files and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `toml` does not parse or has the wrong shape.
    pub fn from_toml_str(toml: &str) -> TweetloomResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> TweetloomResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }

    /// Force dry-run mode on (the `--dry-run` flag never turns it off).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run |= dry_run;
        self
    }

    /// Check every section and resolve the schedule timezone.
    ///
    /// Category weights are checked while deserializing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<Tz, ConfigError> {
        let tz = self.schedule.validate()?;

        if !(1..=DEFAULT_MAX_LENGTH).contains(&self.content.max_length) {
            return Err(ConfigError::new(format!(
                "content.max_length must be between 1 and {}, got {}",
                DEFAULT_MAX_LENGTH, self.content.max_length
            )));
        }
        if self.content.default_category.trim().is_empty() {
            return Err(ConfigError::new("content.default_category must not be empty"));
        }
        if self.history.max_entries == 0 {
            return Err(ConfigError::new("history.max_entries must be positive"));
        }
        if self.platform.requests_per_window == 0 || self.platform.window_minutes == 0 {
            return Err(ConfigError::new(
                "platform.requests_per_window and platform.window_minutes must be positive",
            ));
        }

        debug!(timezone = %tz, "Configuration valid");
        Ok(tz)
    }
}
