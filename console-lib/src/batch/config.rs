//! Batch executor configuration

use std::time::Duration;

use crate::notify::DEFAULT_NOTIFICATION_DURATION;

/// Configuration for a [`BatchExecutor`](super::BatchExecutor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// How long the completion notification stays up.
    ///
    /// Default: 4 seconds
    pub notification_duration: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

impl BatchConfig {
    /// Creates a new batch config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notification duration.
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }
}
