//! Error types for the reminder scheduling core.

/// Top-level error type for the reminder subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Notification-preference fetch error (network, auth, decode).
    #[error("preference fetch error: {0}")]
    PreferenceFetch(String),

    /// Notification delivery error.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Dedup ledger read/write error.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ReminderError>;
