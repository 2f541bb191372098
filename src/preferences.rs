//! Read-only client for the user notification-preferences endpoint.
//!
//! The backend owns the preference data; the scheduler only fetches the
//! current list and reads `key`/`enabled`/`time`/`default_time` from each
//! element. Everything else on the wire is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ReminderError, Result};

/// Endpoint path, relative to the API base URL.
const PREFERENCES_PATH: &str = "/assist/users/me/notification-preferences";

/// One user notification preference, as served by the backend.
///
/// Wire objects carry additional fields (`id`, `title`, `template_id`,
/// `created_at`, `updated_at`); only the four consumed by the scheduler are
/// modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationPreference {
    /// Category key, e.g. `daily_motivation`.
    pub key: String,
    /// Whether the user wants this category delivered.
    pub enabled: bool,
    /// User-chosen `HH:MM` override; `null` or absent means unset.
    #[serde(default)]
    pub time: Option<String>,
    /// `HH:MM` fallback when no override is set.
    pub default_time: String,
}

impl NotificationPreference {
    /// Target delivery time: the user override when present, else the default.
    #[must_use]
    pub fn target_time(&self) -> &str {
        self.time.as_deref().unwrap_or(&self.default_time)
    }
}

/// Response envelope of the preferences endpoint.
#[derive(Debug, Deserialize)]
struct PreferencesEnvelope {
    notifications: Vec<NotificationPreference>,
}

/// HTTP client for fetching notification preferences.
#[derive(Clone)]
pub struct PreferencesClient {
    base_url: String,
    bearer_token: String,
    client: reqwest::Client,
}

impl PreferencesClient {
    /// Create a client from API configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self {
            base_url: config.base_url.clone(),
            bearer_token: config.bearer_token.clone(),
            client,
        }
    }

    /// Override the base URL. Useful for testing with mock servers.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the current preference list.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::PreferenceFetch`] on transport failure,
    /// non-2xx status, or an undecodable response body.
    pub async fn fetch(&self) -> Result<Vec<NotificationPreference>> {
        let url = format!(
            "{}{PREFERENCES_PATH}",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|e| ReminderError::PreferenceFetch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReminderError::PreferenceFetch(format!(
                "preferences fetch failed ({status}): {body}"
            )));
        }

        let envelope: PreferencesEnvelope = response
            .json()
            .await
            .map_err(|e| ReminderError::PreferenceFetch(format!("invalid response body: {e}")))?;
        debug!(
            "fetched {} notification preferences",
            envelope.notifications.len()
        );
        Ok(envelope.notifications)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn parse(body: &str) -> Vec<NotificationPreference> {
        let envelope: PreferencesEnvelope = serde_json::from_str(body).unwrap();
        envelope.notifications
    }

    #[test]
    fn parses_full_wire_object() {
        let prefs = parse(
            r#"{"notifications":[{
                "id": 12,
                "key": "daily_motivation",
                "time": "07:30",
                "title": "Daily motivation",
                "enabled": true,
                "template_id": 3,
                "default_time": "09:00",
                "created_at": "2025-11-02T10:00:00Z",
                "updated_at": "2025-11-20T08:15:00Z"
            }]}"#,
        );
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].key, "daily_motivation");
        assert!(prefs[0].enabled);
        assert_eq!(prefs[0].time.as_deref(), Some("07:30"));
        assert_eq!(prefs[0].default_time, "09:00");
    }

    #[test]
    fn null_time_parses_as_none() {
        let prefs = parse(
            r#"{"notifications":[{
                "key": "weekly_tip",
                "time": null,
                "enabled": false,
                "default_time": "10:00"
            }]}"#,
        );
        assert_eq!(prefs[0].time, None);
    }

    #[test]
    fn absent_time_parses_as_none() {
        let prefs = parse(
            r#"{"notifications":[{
                "key": "progress_checkin",
                "enabled": true,
                "default_time": "20:00"
            }]}"#,
        );
        assert_eq!(prefs[0].time, None);
    }

    #[test]
    fn empty_list_parses() {
        let prefs = parse(r#"{"notifications":[]}"#);
        assert!(prefs.is_empty());
    }

    #[test]
    fn target_time_prefers_override() {
        let pref = NotificationPreference {
            key: "daily_motivation".to_owned(),
            enabled: true,
            time: Some("07:30".to_owned()),
            default_time: "09:00".to_owned(),
        };
        assert_eq!(pref.target_time(), "07:30");
    }

    #[test]
    fn target_time_falls_back_to_default() {
        let pref = NotificationPreference {
            key: "daily_motivation".to_owned(),
            enabled: true,
            time: None,
            default_time: "09:00".to_owned(),
        };
        assert_eq!(pref.target_time(), "09:00");
    }
}
