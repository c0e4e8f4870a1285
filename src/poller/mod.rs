//! The poll-detect-notify loop.
//!
//! A [`Poller`] owns the only state that survives between cycles
//! ([`PollState`]). Each cycle fetches the status window, validates it,
//! compares the newest homework's status with the last one seen, and
//! notifies on change. Any error inside a cycle is logged and the cycle is
//! skipped; the state is left exactly as it was.


use hwatch_channels::{DeliveryResult, Notifier};
use hwatch_core::{
    catalog::ReviewStatus,
    config::{self, WatchConfig},
    error::WatchError,
    message::NotificationMessage,
    review,
    traits::StatusSource,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Memory carried from one cycle to the next. Lives only as long as the
/// process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Status of the newest homework at the last successful change check.
    /// `None` until the first observation.
    pub last_status: Option<ReviewStatus>,
}

/// What a successful cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The status window holds no homeworks.
    NoData,
    /// Newest status equals the remembered one; nothing sent.
    Unchanged(ReviewStatus),
    /// Status changed; a notification was attempted.
    Notified {
        status: ReviewStatus,
        delivery: DeliveryResult,
    },
}

impl CycleOutcome {
    /// The newest homework status the cycle saw, if any.
    pub fn status(&self) -> Option<ReviewStatus> {
        match self {
            Self::NoData => None,
            Self::Unchanged(status) | Self::Notified { status, .. } => Some(*status),
        }
    }
}

/// Poll loop tuning, taken from `[watch]`.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub lookback_secs: u64,
    pub report_errors: bool,
}

impl From<&WatchConfig> for PollSettings {
    fn from(cfg: &WatchConfig) -> Self {
        Self {
            interval: Duration::from_secs(cfg.retry_period_secs),
            lookback_secs: cfg.lookback_secs,
            report_errors: cfg.report_errors,
        }
    }
}

impl PollSettings {
    fn window_start(&self, now: i64) -> i64 {
        config::window_start(self.lookback_secs, now)
    }
}

pub struct Poller {
    source: Arc<dyn StatusSource>,
    notifier: Notifier,
    settings: PollSettings,
    state: PollState,
    /// Text of the last failure sent to the chat, for report dedup.
    /// Kept apart from `state` so failed cycles never touch it.
    last_reported_error: Option<String>,
}

impl Poller {
    /// Build a poller that starts from `state`; use `PollState::default()`
    /// for a fresh process.
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Notifier,
        settings: PollSettings,
        state: PollState,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
            state,
            last_reported_error: None,
        }
    }

    /// Run one cycle at wall-clock time `now` (unix seconds).
    ///
    /// On error the state is untouched. On a status change the state is
    /// updated whatever the delivery outcome, so a lost notification is
    /// never re-sent for the same transition.
    pub async fn poll_once(&mut self, now: i64) -> Result<CycleOutcome, WatchError> {
        let since = self.settings.window_start(now);
        let raw = self.source.fetch(since).await?;
        let response = review::validate(raw)?;

        let Some(record) = review::most_recent(response) else {
            debug!("no homework updates since {since}");
            return Ok(CycleOutcome::NoData);
        };

        let status = record.status()?;
        if self.state.last_status == Some(status) {
            debug!(status = %status, "homework status unchanged");
            return Ok(CycleOutcome::Unchanged(status));
        }

        let message = review::render(&record)?;
        info!(
            from = self.state.last_status.map(|s| s.code()).unwrap_or("none"),
            to = %status,
            "homework status changed"
        );
        let delivery = self.notifier.deliver(&message).await;
        self.state.last_status = Some(status);

        Ok(CycleOutcome::Notified { status, delivery })
    }

    /// Run one cycle and apply the failure policy: log, keep going, and when
    /// `report_errors` is on, tell the chat once per distinct error.
    /// Returns `None` when the cycle failed.
    pub async fn tick(&mut self, now: i64) -> Option<CycleOutcome> {
        match self.poll_once(now).await {
            Ok(outcome) => {
                self.last_reported_error = None;
                Some(outcome)
            }
            Err(e) => {
                error!(
                    source = self.source.name(),
                    kind = e.kind(),
                    "poll cycle failed: {e}"
                );
                self.report_failure(&e).await;
                None
            }
        }
    }

    async fn report_failure(&mut self, err: &WatchError) {
        if !self.settings.report_errors {
            return;
        }
        let text = err.to_string();
        if self.last_reported_error.as_deref() == Some(text.as_str()) {
            debug!("failure already reported, not repeating it");
            return;
        }
        self.last_reported_error = Some(text);
        self.notifier.deliver(&NotificationMessage::failure(err)).await;
    }

    /// Poll until Ctrl-C. Returns the final state.
    pub async fn run(self) -> PollState {
        self.run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Poll until `shutdown` completes. Shutdown is only observed between
    /// cycles, never in the middle of one.
    pub async fn run_until<F>(mut self, shutdown: F) -> PollState
    where
        F: Future<Output = ()>,
    {
        info!(
            "hwatch polling {} every {}s",
            self.source.name(),
            self.settings.interval.as_secs()
        );
        tokio::pin!(shutdown);

        loop {
            if let Some(outcome) = self.tick(chrono::Utc::now().timestamp()).await {
                if let CycleOutcome::Notified {
                    status,
                    delivery: DeliveryResult::Failed,
                } = outcome
                {
                    warn!(status = %status, "status change recorded, notification lost");
                }
                debug!(status = ?outcome.status(), "poll cycle complete");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.interval) => {}
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    return self.state;
                }
            }
        }
    }
}

/// Render what a cycle would send right now, without touching any chat.
pub async fn preview(
    source: &dyn StatusSource,
    since: i64,
) -> Result<Option<NotificationMessage>, WatchError> {
    let response = review::validate(source.fetch(since).await?)?;
    match review::most_recent(response) {
        Some(record) => review::render(&record).map(Some),
        None => Ok(None),
    }
}
