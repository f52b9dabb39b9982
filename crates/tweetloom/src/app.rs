//! Startup wiring: one selector, one history store, one posting client.

use crate::config::{PlatformConfig, TweetloomConfig};
use chrono_tz::Tz;
use derive_getters::Getters;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use tweetloom_content::{
    ContentSelector, ContentValidation, GeneratedTweet, GeneratorRegistry, detect_category,
    validate_tweet,
};
use tweetloom_error::{ConfigError, TweetloomResult, ValidationError};
use tweetloom_history::HistoryStore;
use tweetloom_scheduler::{DRY_RUN_ID_PREFIX, FireOutcome, PostPipeline, TweetScheduler};
use tweetloom_social::{Poster, UnconfiguredPoster, XClient};

/// Build the posting client from the environment.
///
/// Missing credentials do not fail startup: the returned poster reports them
/// on first use, so commands that never publish still run.
pub fn connect_poster(platform: &PlatformConfig) -> Arc<dyn Poster> {
    match XClient::from_env(platform.api_base_or_default()) {
        Ok(client) => {
            debug!(api_base = client.api_base(), "X client ready");
            Arc::new(client.with_limiter(platform.limiter()))
        }
        Err(e) => {
            debug!(error = %e, "Posting credentials unavailable");
            Arc::new(UnconfiguredPoster::new(e.to_string()))
        }
    }
}

/// One generated sample and what validation thought of it.
#[derive(Debug, Clone, Getters)]
pub struct SampleCheck {
    tweet: GeneratedTweet,
    validation: ContentValidation,
}

/// Outcome of a metrics refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct MetricsRefresh {
    /// Records looked up on the platform
    checked: usize,
    /// Records whose counters were stored
    updated: usize,
    /// Posts the platform no longer knows
    missing: usize,
    /// Lookups or writes that failed
    failed: usize,
}

/// The assembled bot.
///
/// Built once at startup; every command borrows its collaborators from here.
#[derive(Clone, Getters)]
pub struct Tweetloom {
    config: TweetloomConfig,
    #[getter(skip)]
    tz: Tz,
    selector: Arc<ContentSelector>,
    history: HistoryStore,
    poster: Arc<dyn Poster>,
}

impl std::fmt::Debug for Tweetloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tweetloom")
            .field("tz", &self.tz)
            .field("poster", &self.poster.name())
            .field("history", &self.history.path())
            .field("dry_run", self.config.dry_run())
            .finish()
    }
}

impl Tweetloom {
    /// Validate `config`, load the content pools, open the history and
    /// connect the posting client.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration or unloadable data pools.
    #[instrument(skip_all, fields(dry_run = config.dry_run()))]
    pub async fn build(config: TweetloomConfig) -> TweetloomResult<Self> {
        let poster = connect_poster(config.platform());
        Self::with_poster(config, poster).await
    }

    /// Like [`build`](Self::build) with an explicit posting collaborator.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration or unloadable data pools.
    pub async fn with_poster(
        config: TweetloomConfig,
        poster: Arc<dyn Poster>,
    ) -> TweetloomResult<Self> {
        let tz = config.validate()?;

        let content = config.content();
        let registry = GeneratorRegistry::from_data_dir(content.data_dir())?;
        let selector = ContentSelector::new(
            config.categories().clone(),
            registry,
            content.default_category().clone(),
            *content.max_length(),
        )?;

        let history =
            HistoryStore::open(config.history().path(), *config.history().max_entries()).await;

        info!(
            timezone = %tz,
            poster = poster.name(),
            history = %history.path().display(),
            "Tweetloom ready"
        );
        Ok(Self {
            config,
            tz,
            selector: Arc::new(selector),
            history,
            poster,
        })
    }

    /// Schedule timezone.
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Whether posts are simulated.
    pub fn dry_run(&self) -> bool {
        *self.config.dry_run()
    }

    /// Generate, post and record pipeline sharing this bot's collaborators.
    pub fn pipeline(&self) -> PostPipeline {
        PostPipeline::new(
            Arc::clone(&self.selector),
            Arc::clone(&self.poster),
            self.history.clone(),
            self.dry_run(),
        )
    }

    /// Idle scheduler over [`pipeline`](Self::pipeline).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the schedule is invalid.
    pub fn scheduler(&self) -> Result<TweetScheduler, ConfigError> {
        TweetScheduler::new(self.config.schedule().clone(), Arc::new(self.pipeline()))
    }

    /// Trim hand-written text to the length budget and validate the result.
    pub fn check_text(&self, text: &str) -> (String, ContentValidation) {
        let text = self.selector.trim(text);
        let validation = validate_tweet(&text, self.selector.max_length());
        (text, validation)
    }

    /// Post hand-written text: trimmed, validated and recorded under its
    /// detected category.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] without posting when validation finds
    /// errors. Posting failures are reported in the [`FireOutcome`].
    #[instrument(skip(self, text))]
    pub async fn post_text(&self, text: &str) -> Result<FireOutcome, ValidationError> {
        let (text, validation) = self.check_text(text);
        if !validation.is_valid() {
            warn!(errors = validation.errors().len(), "Refusing to post invalid text");
            return Err(ValidationError::new(validation.errors().clone()));
        }

        let category = detect_category(&text);
        debug!(category, "Posting custom text");
        Ok(self
            .pipeline()
            .publish(GeneratedTweet::new(category, text))
            .await)
    }

    /// Generate one sample per registered generator and validate each.
    pub fn sample_checks(&self, rng: &mut dyn RngCore) -> Vec<SampleCheck> {
        let max_length = self.selector.max_length();
        self.selector
            .registry()
            .categories()
            .filter_map(|category| {
                let generator = self.selector.registry().get(category)?;
                let text = self.selector.trim(&generator.generate(rng));
                let validation = validate_tweet(&text, max_length);
                Some(SampleCheck {
                    tweet: GeneratedTweet::new(category, text),
                    validation,
                })
            })
            .collect()
    }

    /// Fetch public metrics for the `limit` most recent posts and store them.
    ///
    /// Dry-run records are skipped. Stops early on a failure that retrying
    /// cannot fix, such as missing credentials.
    #[instrument(skip(self))]
    pub async fn refresh_metrics(&self, limit: usize) -> MetricsRefresh {
        let mut report = MetricsRefresh::default();

        for record in self.history.recent(limit).await {
            if record.id().starts_with(DRY_RUN_ID_PREFIX) || !*record.success() {
                continue;
            }
            report.checked += 1;

            match self.poster.metrics(record.id()).await {
                Ok(Some(metrics)) => match self.history.update_metrics(record.id(), metrics).await {
                    Ok(true) => report.updated += 1,
                    Ok(false) => report.missing += 1,
                    Err(e) => {
                        warn!(error = %e, post_id = %record.id(), "Failed to store metrics");
                        report.failed += 1;
                    }
                },
                Ok(None) => {
                    debug!(post_id = %record.id(), "Post no longer exists");
                    report.missing += 1;
                }
                Err(e) => {
                    warn!(error = %e, post_id = %record.id(), "Failed to fetch metrics");
                    report.failed += 1;
                    if !e.is_recoverable() {
                        break;
                    }
                }
            }
        }

        info!(
            checked = report.checked,
            updated = report.updated,
            missing = report.missing,
            failed = report.failed,
            "Metrics refreshed"
        );
        report
    }
}
