//! Tracing subscriber setup for the tweetloom binary.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_LEVEL: &str = "info";

/// How log output is filtered and formatted.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Explicit filter (e.g., "debug"); overrides `RUST_LOG` when set
    pub log_level: Option<String>,
    /// Emit one JSON object per event
    pub json_logs: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl ObservabilityConfig {
    /// Configuration filtered by `RUST_LOG`, or `info` when it is unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit log level, taking precedence over `RUST_LOG`.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Show event targets.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Filter for this configuration: the explicit level, else `RUST_LOG`,
    /// else `info`.
    ///
    /// # Errors
    ///
    /// Fails if the explicit level is not a valid filter directive.
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        match &self.log_level {
            Some(level) => EnvFilter::try_new(level),
            None => EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL)),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once, before anything logs.
///
/// # Errors
///
/// Fails if the level is not a valid filter directive.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = config.env_filter()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
