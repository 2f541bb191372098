//! Durable dedup ledger for reminder deliveries.
//!
//! One entry per category under the storage key
//! `notification_last_sent_<key>`, holding the ISO-8601 timestamp of the
//! last successful delivery. The ledger is read before every delivery
//! attempt and overwritten at the moment of delivery; entries are never
//! explicitly deleted.
//!
//! Reads and writes are not transactional: two scheduler instances sharing
//! a ledger can both pass the eligibility check in the same minute and
//! double-deliver. That race is a documented limitation of the subsystem;
//! the [`DedupLedger`] trait is the seam where an atomic check-and-set
//! implementation could later be slotted in.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ReminderError, Result};

/// Storage-key prefix for ledger entries.
pub const LEDGER_KEY_PREFIX: &str = "notification_last_sent_";

/// Compose the durable storage key for a category key.
#[must_use]
pub fn storage_key(key: &str) -> String {
    format!("{LEDGER_KEY_PREFIX}{key}")
}

/// Last-delivery timestamps keyed by category.
///
/// `key` is the category key (e.g. `daily_motivation`); implementations
/// prefix it with [`LEDGER_KEY_PREFIX`] to form the storage key. Missing or
/// unparseable entries count as "never sent".
pub trait DedupLedger: Send + Sync {
    /// Timestamp of the last recorded delivery for `key`, if any.
    fn last_sent(&self, key: &str) -> Option<DateTime<Local>>;

    /// Record a delivery for `key` at `at`, overwriting any prior entry.
    fn record(&self, key: &str, at: DateTime<Local>) -> Result<()>;
}

/// File-backed ledger: a single JSON object mapping storage keys to
/// RFC 3339 timestamps.
///
/// Every read goes to disk, and `record` re-reads and merges before
/// rewriting through a temp file + rename, so the file itself stays intact
/// under concurrent writers even though check-then-write is not atomic.
pub struct FileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLedger {
    /// Create a ledger bound to a JSON file path. The file and its parent
    /// directories are created on first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    "failed to read reminder ledger {}: {e}",
                    self.path.display()
                );
                return HashMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "ignoring malformed reminder ledger at {}: {e}",
                    self.path.display()
                );
                HashMap::new()
            }
        }
    }
}

impl DedupLedger for FileLedger {
    fn last_sent(&self, key: &str) -> Option<DateTime<Local>> {
        let entries = self.read_entries();
        let value = entries.get(&storage_key(key))?;
        match DateTime::parse_from_rfc3339(value) {
            Ok(ts) => Some(ts.with_timezone(&Local)),
            Err(e) => {
                tracing::warn!("ignoring unparseable ledger timestamp for '{key}': {e}");
                None
            }
        }
    }

    fn record(&self, key: &str, at: DateTime<Local>) -> Result<()> {
        let Ok(_guard) = self.write_lock.lock() else {
            return Err(ReminderError::Ledger(
                "ledger write lock poisoned".to_owned(),
            ));
        };

        let mut entries = self.read_entries();
        entries.insert(storage_key(key), at.to_rfc3339());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReminderError::Ledger(format!("failed to create ledger directory: {e}"))
            })?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| ReminderError::Ledger(format!("failed to encode ledger: {e}")))?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| ReminderError::Ledger(format!("failed to write ledger temp file: {e}")))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| ReminderError::Ledger(format!("failed to finalize ledger file: {e}")))?;
        Ok(())
    }
}

/// In-memory ledger with the same key/value contract, used as a test double.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryLedger {
    /// Create an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DedupLedger for MemoryLedger {
    fn last_sent(&self, key: &str) -> Option<DateTime<Local>> {
        let Ok(entries) = self.entries.lock() else {
            return None;
        };
        let value = entries.get(&storage_key(key))?;
        match DateTime::parse_from_rfc3339(value) {
            Ok(ts) => Some(ts.with_timezone(&Local)),
            Err(_) => None,
        }
    }

    fn record(&self, key: &str, at: DateTime<Local>) -> Result<()> {
        let Ok(mut entries) = self.entries.lock() else {
            return Err(ReminderError::Ledger("ledger lock poisoned".to_owned()));
        };
        entries.insert(storage_key(key), at.to_rfc3339());
        Ok(())
    }
}
