//! Notification delivery seam.
//!
//! The scheduler never talks to a notification capability directly; it goes
//! through [`NotificationSink`], which models the host surface the browser
//! Notifications API used to provide: a permission state readable before
//! starting, and a constructor-style delivery call. Permission *requesting*
//! is the host's job, performed out-of-band before the scheduler starts.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use crate::scheduler::category::{AppRoute, ReminderCategory};

/// Host notification-permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The runtime has no notification capability at all.
    Unavailable,
    /// Capability present, user not yet asked.
    Prompt,
    /// User granted notification delivery.
    Granted,
    /// User denied notification delivery.
    Denied,
}

/// A fully resolved notification, ready to show.
///
/// Carries the static content and click-through route for its category so
/// sinks need no knowledge of the content table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    /// Category this notification belongs to.
    pub category: ReminderCategory,
    /// Notification title.
    pub title: &'static str,
    /// Notification body text.
    pub body: &'static str,
    /// Icon asset path.
    pub icon: &'static str,
    /// In-app route opened when the user clicks the notification.
    pub route: AppRoute,
}

impl ReminderNotification {
    /// Resolve the static content and route for a category.
    #[must_use]
    pub fn for_category(category: ReminderCategory) -> Self {
        let content = category.content();
        Self {
            category,
            title: content.title,
            body: content.body,
            icon: content.icon,
            route: category.route(),
        }
    }
}

/// Notification delivery contract. New host surfaces only need to implement
/// this trait.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Stable sink identifier (e.g. `channel`, `log`).
    fn id(&self) -> &'static str;

    /// Current permission state of the underlying capability.
    fn permission(&self) -> PermissionState;

    /// Show one notification. Failures are per-delivery; the scheduler logs
    /// them and moves on to the next preference.
    async fn deliver(&self, notification: &ReminderNotification) -> anyhow::Result<()>;
}

/// Sink that forwards notifications over an unbounded channel.
///
/// The host bridge consumes the receiving end; tests use it to observe
/// deliveries.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ReminderNotification>,
    permission: PermissionState,
}

impl ChannelSink {
    /// Create a granted sink plus the receiver for its deliveries.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReminderNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                permission: PermissionState::Granted,
            },
            rx,
        )
    }

    /// Create a sink reporting a specific permission state.
    #[must_use]
    pub fn with_permission(
        state: PermissionState,
    ) -> (Self, mpsc::UnboundedReceiver<ReminderNotification>) {
        let (mut sink, rx) = Self::new();
        sink.permission = state;
        (sink, rx)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    fn id(&self) -> &'static str {
        "channel"
    }

    fn permission(&self) -> PermissionState {
        self.permission
    }

    async fn deliver(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        if self.tx.send(notification.clone()).is_err() {
            anyhow::bail!("notification receiver dropped");
        }
        Ok(())
    }
}

/// Sink that only logs deliveries. Always granted; useful when the daemon
/// runs without a host bridge attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    fn id(&self) -> &'static str {
        "log"
    }

    fn permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn deliver(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        info!(
            "reminder '{}': {}: {}",
            notification.category, notification.title, notification.body
        );
        Ok(())
    }
}
