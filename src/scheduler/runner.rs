//! Reminder scheduling runtime.
//!
//! [`ReminderScheduler`] owns the preference cache and two background
//! workers: a poll worker that runs an eligibility/delivery pass once per
//! minute, and a refresh worker that re-fetches preferences every five
//! minutes. `start` installs the workers, `stop` cancels them; both are
//! idempotent. Failures inside the workers are logged and swallowed; the
//! subsystem is best-effort and the absence of a notification is the only
//! observable symptom of failure.

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::delivery::{NotificationSink, PermissionState, ReminderNotification};
use crate::error::{ReminderError, Result};
use crate::preferences::{NotificationPreference, PreferencesClient};
use crate::scheduler::category::ReminderCategory;
use crate::scheduler::eligibility;
use crate::scheduler::ledger::DedupLedger;

/// Default seconds between eligibility/delivery passes.
pub const POLL_INTERVAL_SECS: u64 = 60;
/// Default seconds between preference-cache refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 300;

/// State shared between the scheduler handle and its workers.
struct SchedulerShared {
    client: PreferencesClient,
    sink: Arc<dyn NotificationSink>,
    ledger: Arc<dyn DedupLedger>,
    preferences: Mutex<Vec<NotificationPreference>>,
}

impl SchedulerShared {
    /// Fetch the preference list and install the result.
    ///
    /// On failure the cache is cleared to empty so passes never run against
    /// stale data. A result arriving after `cancel` fired is discarded
    /// without touching the cache.
    async fn refresh_preferences(&self, cancel: &CancellationToken) {
        let result = self.client.fetch().await;
        self.apply_refresh(cancel, result);
    }

    /// Install a fetch result in the cache, or discard it when `cancel`
    /// fired. The token is re-checked under the cache lock, and `stop`
    /// cancels before it clears under the same lock; an accepted result
    /// therefore always precedes the clear.
    fn apply_refresh(
        &self,
        cancel: &CancellationToken,
        result: Result<Vec<NotificationPreference>>,
    ) {
        let Ok(mut preferences) = self.preferences.lock() else {
            return;
        };
        if cancel.is_cancelled() {
            debug!("discarding preference fetch result after stop");
            return;
        }
        match result {
            Ok(fresh) => {
                debug!("preference cache refreshed with {} entries", fresh.len());
                *preferences = fresh;
            }
            Err(e) => {
                warn!("preference refresh failed, clearing cache: {e}");
                preferences.clear();
            }
        }
    }

    /// Hand one notification to the sink, folding a failure into the error
    /// taxonomy with the sink's identifier attached.
    async fn dispatch(&self, notification: &ReminderNotification) -> Result<()> {
        self.sink
            .deliver(notification)
            .await
            .map_err(|e| ReminderError::Delivery(format!("{} sink: {e}", self.sink.id())))
    }

    /// Run one eligibility/delivery pass at `now` against the cached
    /// preferences, in fetch order. Each preference's delivery attempt is
    /// isolated: a sink or ledger error is logged and the pass moves on.
    async fn deliver_due(&self, now: DateTime<Local>) {
        let snapshot = {
            let Ok(preferences) = self.preferences.lock() else {
                return;
            };
            preferences.clone()
        };

        for pref in &snapshot {
            let Some(category) = ReminderCategory::from_key(&pref.key) else {
                debug!("ignoring unknown notification category '{}'", pref.key);
                continue;
            };
            if !pref.enabled {
                continue;
            }
            if !eligibility::minute_matches(now, pref.target_time()) {
                continue;
            }
            let last_sent = self.ledger.last_sent(category.key());
            if !eligibility::cadence_satisfied(category.cadence(), last_sent, now) {
                continue;
            }

            let notification = ReminderNotification::for_category(category);
            match self.dispatch(&notification).await {
                Ok(()) => {
                    if let Err(e) = self.ledger.record(category.key(), now) {
                        warn!("cannot record delivery of '{category}': {e}");
                    }
                    info!("delivered '{category}' reminder");
                }
                Err(e) => {
                    warn!("cannot deliver '{category}' reminder: {e}");
                }
            }
        }
    }
}

/// Polls preferences and delivers due reminders until stopped.
///
/// One instance per host session; anything that needs to start or stop the
/// scheduler holds a reference to it. Construction is cheap and does no
/// I/O; nothing runs until [`start`](Self::start).
pub struct ReminderScheduler {
    shared: Arc<SchedulerShared>,
    poll_interval: Duration,
    refresh_interval: Duration,
    cancel: Option<CancellationToken>,
}

impl ReminderScheduler {
    /// Create a stopped scheduler over a preference source, delivery sink,
    /// and dedup ledger.
    #[must_use]
    pub fn new(
        client: PreferencesClient,
        sink: Arc<dyn NotificationSink>,
        ledger: Arc<dyn DedupLedger>,
    ) -> Self {
        Self {
            shared: Arc::new(SchedulerShared {
                client,
                sink,
                ledger,
                preferences: Mutex::new(Vec::new()),
            }),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            cancel: None,
        }
    }

    /// Override the poll/refresh cadence (config-driven hosts and tests).
    #[must_use]
    pub fn with_intervals(mut self, poll: Duration, refresh: Duration) -> Self {
        self.poll_interval = poll;
        self.refresh_interval = refresh;
        self
    }

    /// Whether the workers are currently installed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Start polling and refreshing.
    ///
    /// No-op when already running. Returns silently without installing
    /// workers unless the sink reports [`PermissionState::Granted`]; the
    /// host requests permission out-of-band before calling this. Never
    /// fails: the initial fetch happens inside the poll worker and degrades
    /// to an empty cache like any other fetch failure.
    pub fn start(&mut self) {
        if self.cancel.is_some() {
            debug!("reminder scheduler already running");
            return;
        }
        match self.shared.sink.permission() {
            PermissionState::Granted => {}
            state => {
                info!("notifications not deliverable ({state:?}); reminder scheduler not started");
                return;
            }
        }

        let cancel = CancellationToken::new();
        tokio::spawn(poll_worker(
            self.shared.clone(),
            cancel.clone(),
            self.poll_interval,
        ));
        tokio::spawn(refresh_worker(
            self.shared.clone(),
            cancel.clone(),
            self.refresh_interval,
        ));
        self.cancel = Some(cancel);
        info!("reminder scheduler started");
    }

    /// Stop both workers and clear the preference cache.
    ///
    /// Idempotent; safe to call when never started. In-flight fetches are
    /// not aborted but their results are discarded.
    pub fn stop(&mut self) {
        // Cancel before clearing; `apply_refresh` re-checks the token under
        // the preferences lock.
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
            info!("reminder scheduler stopped");
        }
        if let Ok(mut preferences) = self.shared.preferences.lock() {
            preferences.clear();
        }
    }

    /// Run one eligibility/delivery pass at `now` against the cached
    /// preferences.
    ///
    /// The poll worker calls this with the real clock every tick; hosts and
    /// tests can drive it directly with a simulated clock.
    pub async fn deliver_due(&self, now: DateTime<Local>) {
        self.shared.deliver_due(now).await;
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}

/// Poll worker: one initial fetch, an immediate pass, then one pass per
/// interval against the real clock.
async fn poll_worker(shared: Arc<SchedulerShared>, cancel: CancellationToken, interval: Duration) {
    shared.refresh_preferences(&cancel).await;

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("poll worker cancelled");
                break;
            }
            _ = ticker.tick() => {
                shared.deliver_due(Local::now()).await;
            }
        }
    }
}

/// Refresh worker: re-fetches preferences once per interval. The first
/// refresh lands a full interval after start; the initial fetch belongs to
/// the poll worker.
async fn refresh_worker(
    shared: Arc<SchedulerShared>,
    cancel: CancellationToken,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("refresh worker cancelled");
                break;
            }
            _ = ticker.tick() => {
                shared.refresh_preferences(&cancel).await;
            }
        }
    }
}
