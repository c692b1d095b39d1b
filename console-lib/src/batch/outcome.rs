//! Aggregated batch results

use std::time::Duration;

use crate::notify::Notification;
use crate::notify::Severity;

/// Counts of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub fail_count: usize,
}

impl BatchOutcome {
    /// Number of items attempted.
    pub fn total(&self) -> usize {
        self.success_count + self.fail_count
    }

    /// Returns `true` if no item failed.
    pub fn is_clean(&self) -> bool {
        self.fail_count == 0
    }

    /// `Success` when nothing failed, `Warning` otherwise.
    pub fn severity(&self) -> Severity {
        if self.is_clean() {
            Severity::Success
        } else {
            Severity::Warning
        }
    }

    /// Summary line, e.g. `"Delete users: 2 succeeded, 1 failed"`.
    pub fn message(&self, label: &str) -> String {
        format!(
            "{}: {} succeeded, {} failed",
            label, self.success_count, self.fail_count
        )
    }

    /// The completion notification for a batch called `label`.
    pub fn notification(&self, label: &str, duration: Duration) -> Notification {
        Notification::new(self.message(label), self.severity()).with_duration(duration)
    }

    pub(crate) fn record(&mut self, ok: bool) {
        if ok {
            self.success_count += 1;
        } else {
            self.fail_count += 1;
        }
    }
}
