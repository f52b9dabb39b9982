//! Scheduler state machine and per-slot trigger tasks.

use crate::config::ScheduleConfig;
use crate::pipeline::{FireOutcome, PostPipeline};
use crate::slot::{ScheduledSlot, WeeklyTrigger};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use derive_getters::Getters;
use rand::RngCore;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use tweetloom_error::ConfigError;

/// Lifecycle of a [`TweetScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum SchedulerState {
    /// No slots drawn yet
    Idle,
    /// Slots drawn, no triggers running
    Scheduled,
    /// One trigger task per slot is running
    Running,
    /// Triggers cancelled; can be started again with fresh slots
    Stopped,
}

/// Read-only view of one scheduled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SlotListing {
    id: String,
    label: String,
    day: String,
    time: String,
    description: String,
    next_run: Option<DateTime<Utc>>,
}

/// Wall clock that follows tokio's clock, so paused test time moves it too.
#[derive(Debug, Clone, Copy)]
struct Clock {
    origin_utc: DateTime<Utc>,
    origin: tokio::time::Instant,
}

impl Clock {
    fn start() -> Self {
        Self {
            origin_utc: Utc::now(),
            origin: tokio::time::Instant::now(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin_utc + elapsed
    }
}

/// Posts on a randomized weekly schedule.
///
/// Slots are drawn fresh on every start from [`Idle`](SchedulerState::Idle)
/// or [`Stopped`](SchedulerState::Stopped). Each slot runs in its own task, so
/// a slow post never delays another slot. Stopping prevents further firings
/// but lets a firing already in progress finish.
#[derive(Debug)]
pub struct TweetScheduler {
    config: ScheduleConfig,
    tz: Tz,
    pipeline: Arc<PostPipeline>,
    state: SchedulerState,
    slots: Vec<ScheduledSlot>,
    shutdown: Option<watch::Sender<bool>>,
    tasks: Vec<JoinHandle<()>>,
}

impl TweetScheduler {
    /// Create an idle scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the schedule configuration is invalid.
    pub fn new(config: ScheduleConfig, pipeline: Arc<PostPipeline>) -> Result<Self, ConfigError> {
        let tz = config.validate()?;
        Ok(Self {
            config,
            tz,
            pipeline,
            state: SchedulerState::Idle,
            slots: Vec::new(),
            shutdown: None,
            tasks: Vec::new(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Currently drawn slots.
    pub fn slots(&self) -> &[ScheduledSlot] {
        &self.slots
    }

    /// Schedule configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Draw a fresh set of slots. Ignored while running.
    #[instrument(skip(self, rng), fields(state = %self.state))]
    pub fn schedule_slots(&mut self, rng: &mut dyn RngCore) -> &[ScheduledSlot] {
        if self.state == SchedulerState::Running {
            warn!("Scheduler is running; keeping current slots");
            return &self.slots;
        }
        self.slots = self.config.draw_slots(rng);
        self.state = SchedulerState::Scheduled;
        for (index, slot) in self.slots.iter().enumerate() {
            debug!(slot = index + 1, %slot, "Drew slot");
        }
        &self.slots
    }

    /// Start one trigger task per slot.
    ///
    /// Draws slots first unless they were just drawn with
    /// [`schedule_slots`](Self::schedule_slots). Starting a running scheduler
    /// is a no-op. Must be called inside a tokio runtime.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn start(&mut self) -> Result<(), ConfigError> {
        match self.state {
            SchedulerState::Running => {
                warn!("Scheduler already running");
                return Ok(());
            }
            SchedulerState::Idle | SchedulerState::Stopped => {
                let mut rng = rand::thread_rng();
                self.schedule_slots(&mut rng);
            }
            SchedulerState::Scheduled => {}
        }

        let triggers = self
            .slots
            .iter()
            .map(|slot| WeeklyTrigger::new(*slot, self.tz))
            .collect::<Result<Vec<_>, _>>()?;

        let clock = Clock::start();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        self.tasks = triggers
            .into_iter()
            .enumerate()
            .map(|(index, trigger)| {
                if let Some(next) = trigger.next_after(clock.now()) {
                    info!(slot = index + 1, next_run = %next, "Scheduled tweet");
                }
                tokio::spawn(run_slot(
                    index + 1,
                    trigger,
                    Arc::clone(&self.pipeline),
                    clock,
                    shutdown_rx.clone(),
                ))
            })
            .collect();
        self.shutdown = Some(shutdown_tx);
        self.state = SchedulerState::Running;

        info!(slots = self.tasks.len(), timezone = %self.tz, "Tweet scheduler started");
        Ok(())
    }

    /// Cancel pending triggers and wait for in-flight firings to finish.
    ///
    /// Calling `stop` when not running does nothing.
    #[instrument(skip(self), fields(state = %self.state))]
    pub async fn stop(&mut self) {
        if self.state != SchedulerState::Running {
            debug!("Scheduler not running; nothing to stop");
            return;
        }

        if let Some(shutdown) = self.shutdown.take() {
            // Receivers only vanish once their tasks have ended.
            let _ = shutdown.send(true);
        }
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                error!(error = %e, "Trigger task ended abnormally");
            }
        }

        self.state = SchedulerState::Stopped;
        info!("Tweet scheduler stopped");
    }

    /// Start, wait for `signal`, then stop.
    pub async fn run_until_shutdown<F>(&mut self, signal: F) -> Result<(), ConfigError>
    where
        F: Future<Output = ()>,
    {
        self.start()?;
        signal.await;
        info!("Shutdown requested");
        self.stop().await;
        Ok(())
    }

    /// Describe the drawn slots without side effects.
    pub fn list_slots(&self) -> Vec<SlotListing> {
        let now = Utc::now();
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let next_run = WeeklyTrigger::new(*slot, self.tz)
                    .ok()
                    .and_then(|trigger| trigger.next_after(now));
                SlotListing {
                    id: format!("tweet_{}", index + 1),
                    label: format!("Scheduled Tweet {}", index + 1),
                    day: slot.day_name().to_string(),
                    time: slot.time(),
                    description: format!(
                        "Every {} at {} ({})",
                        slot.day_name(),
                        slot.time(),
                        self.tz
                    ),
                    next_run,
                }
            })
            .collect()
    }
}

impl Drop for TweetScheduler {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
    }
}

/// Wait for each firing of `trigger` and run the pipeline until shutdown.
async fn run_slot(
    slot: usize,
    trigger: WeeklyTrigger,
    pipeline: Arc<PostPipeline>,
    clock: Clock,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut after = clock.now();

    loop {
        let Some(next) = trigger.next_after(after) else {
            warn!(slot, "Trigger has no future firing");
            break;
        };
        let wait = (next - clock.now()).to_std().unwrap_or_default();
        debug!(slot, next_run = %next, wait_secs = wait.as_secs(), "Waiting for slot");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }
        if *shutdown.borrow() {
            break;
        }

        match pipeline.fire().await {
            FireOutcome::Failed { error, .. } => {
                warn!(slot, error = %error, "Scheduled tweet failed");
            }
            outcome => {
                debug!(slot, post_id = outcome.post_id(), "Scheduled tweet done");
            }
        }
        after = next.max(clock.now());
    }

    debug!(slot, "Trigger task finished");
}
