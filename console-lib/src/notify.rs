//! Transient user notifications.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Default duration for notifications.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(4);

/// How prominently a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Lowercase name, used by plain-text renderers and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient notification payload.
///
/// The core never displays anything itself; callers receive these and
/// decide how to show them.
///
/// # Example
///
/// ```
/// use console_lib::notify::{Notification, Severity};
///
/// let n = Notification::warning("Delete users: 2 succeeded, 1 failed");
/// assert_eq!(n.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The message to display.
    pub message: String,
    /// Severity of the message.
    pub severity: Severity,
    /// How long to show the notification.
    pub duration: Duration,
}

impl Notification {
    /// Create a notification with an explicit severity.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Create an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    /// Set a custom duration for this notification.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Notification {
    fn from(message: String) -> Self {
        Notification::info(message)
    }
}

impl From<&str> for Notification {
    fn from(message: &str) -> Self {
        Notification::info(message)
    }
}
