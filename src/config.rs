//! Configuration types for the reminder scheduling core.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration for the reminder scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Preferences API settings.
    pub api: ApiConfig,
    /// Poll/refresh cadence and ledger location.
    pub scheduler: SchedulerConfig,
}

/// Preferences API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Exhale backend.
    pub base_url: String,
    /// Bearer token presented on every preferences fetch.
    ///
    /// Usually injected by the host via `EXHALE_API_TOKEN` rather than
    /// written to the config file.
    pub bearer_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exhale.app".to_owned(),
            bearer_token: String::new(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Scheduler cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between eligibility/delivery passes.
    pub poll_interval_secs: u64,
    /// Seconds between preference-cache refreshes.
    pub refresh_interval_secs: u64,
    /// Dedup ledger file location (None = platform data dir).
    pub ledger_path: Option<PathBuf>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            refresh_interval_secs: 300,
            ledger_path: None,
        }
    }
}

impl SchedulerConfig {
    /// Poll cadence as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Refresh cadence as a [`Duration`].
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Resolved ledger file path (configured, or the platform default).
    #[must_use]
    pub fn ledger_file(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(crate::exhale_dirs::ledger_file)
    }
}

impl ReminderConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ReminderError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ReminderError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default config path, or defaults when no file exists.
    ///
    /// `EXHALE_API_TOKEN`, when set, overrides the configured bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        if let Ok(token) = std::env::var("EXHALE_API_TOKEN") {
            config.api.bearer_token = token;
        }
        Ok(config)
    }

    /// Returns the default config file path (`config_dir()/reminders.toml`).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        crate::exhale_dirs::config_file()
    }
}
