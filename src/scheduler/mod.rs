//! Reminder scheduling.
//!
//! Decides which reminder categories are due at a given local time and
//! delivers them at most once per cadence period. The pieces compose as
//! pure eligibility rules ([`eligibility`]), a closed category/content
//! table ([`category`]), a dedup ledger ([`ledger`]), and the polling
//! runtime that ties them to a preference source ([`runner`]).

pub mod category;
pub mod eligibility;
pub mod ledger;
pub mod runner;

pub use category::{AppRoute, Cadence, NotificationContent, ReminderCategory};
pub use ledger::{DedupLedger, FileLedger, MemoryLedger};
pub use runner::{POLL_INTERVAL_SECS, REFRESH_INTERVAL_SECS, ReminderScheduler};
