//! Centralized application directory paths for Exhale.
//!
//! Provides a single source of truth for the filesystem paths used by the
//! reminder core. Uses the [`dirs`] crate for platform-appropriate directory
//! resolution.
//!
//! # Directory Layout
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/exhale/` | `~/.local/share/exhale/` |
//! | Config | `~/Library/Application Support/exhale/` | `~/.config/exhale/` |
//!
//! # Environment Overrides
//!
//! All paths can be overridden for testing or custom deployments:
//! - `EXHALE_DATA_DIR` overrides [`data_dir`]
//! - `EXHALE_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Used for persistent state owned by the reminder core, currently the
/// delivery dedup ledger.
///
/// Resolves to `dirs::data_dir()/exhale/` by default. Override with
/// the `EXHALE_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("EXHALE_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("exhale"))
        .unwrap_or_else(|| PathBuf::from("/tmp/exhale-data"))
}

/// Application config directory.
///
/// Used for `reminders.toml` and other configuration files.
///
/// Resolves to `dirs::config_dir()/exhale/` by default. Override with
/// the `EXHALE_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("EXHALE_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("exhale"))
        .unwrap_or_else(|| PathBuf::from("/tmp/exhale-config"))
}

/// Reminder config file path (`config_dir()/reminders.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("reminders.toml")
}

/// Delivery dedup ledger file path (`data_dir()/reminder_ledger.json`).
#[must_use]
pub fn ledger_file() -> PathBuf {
    data_dir().join("reminder_ledger.json")
}
