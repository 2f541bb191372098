//! Exhale: reminder scheduling for the smoking-cessation companion.
//!
//! This crate polls a user's notification preferences and delivers the
//! reminders that are due, at most once per cadence period:
//! Preferences API → eligibility rules → notification sink → dedup ledger
//!
//! # Architecture
//!
//! The scheduler is built from independent pieces wired together by
//! [`ReminderScheduler`]:
//! - **Preferences**: Fetched over HTTP via `reqwest` and cached in memory
//! - **Eligibility**: Pure local-time rules (minute match plus cadence)
//! - **Delivery**: A [`NotificationSink`] trait the host implements
//! - **Dedup ledger**: Last-sent timestamps keyed per category

pub mod config;
pub mod delivery;
pub mod error;
pub mod exhale_dirs;
pub mod preferences;
pub mod scheduler;

pub use config::ReminderConfig;
pub use delivery::{
    ChannelSink, LogSink, NotificationSink, PermissionState, ReminderNotification,
};
pub use error::{ReminderError, Result};
pub use preferences::{NotificationPreference, PreferencesClient};
pub use scheduler::{
    Cadence, DedupLedger, FileLedger, MemoryLedger, ReminderCategory, ReminderScheduler,
};
