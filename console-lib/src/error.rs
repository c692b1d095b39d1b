//! Error types

/// Errors returned by the batch executor.
///
/// Per-item failures never show up here; they are absorbed into the
/// [`BatchOutcome`](crate::batch::BatchOutcome) counts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// Another batch is still running on the same executor.
    #[error("a batch operation is already running")]
    Busy,
}
