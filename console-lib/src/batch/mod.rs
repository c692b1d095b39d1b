//! Sequential batch operations over a selection
//!
//! A batch runs one caller-supplied async operation per selected id, one
//! at a time and in order, with per-item failure isolation.
//!
//! # Example
//!
//! ```ignore
//! let job = BatchJob::new("Delete users", grid.selected_ids());
//! let outcome = executor
//!     .run(job, |id| api.delete_user(id), &mut hooks)
//!     .await?;
//! ```

mod config;
mod hooks;
mod outcome;

pub use config::BatchConfig;
pub use hooks::BatchHooks;
pub use outcome::BatchOutcome;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::BatchError;

// =============================================================================
// Batch Job
// =============================================================================

/// The ids one batch action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob<K> {
    label: String,
    target_ids: Vec<K>,
}

impl<K> BatchJob<K> {
    /// Creates a job. `label` names the action in logs and notifications.
    pub fn new(label: impl Into<String>, target_ids: Vec<K>) -> Self {
        Self {
            label: label.into(),
            target_ids,
        }
    }

    /// The action label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ids in processing order.
    pub fn target_ids(&self) -> &[K] {
        &self.target_ids
    }

    /// Returns the number of targets.
    pub fn len(&self) -> usize {
        self.target_ids.len()
    }

    /// Returns `true` if there is nothing to process.
    pub fn is_empty(&self) -> bool {
        self.target_ids.is_empty()
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Whether an executor is processing a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
}

/// Runs batch jobs.
///
/// Clones share their running flag, so a UI can keep a clone to disable its
/// trigger while a batch is in flight. There is no cancellation: once
/// started, a batch runs to completion.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    running: Arc<AtomicBool>,
    config: BatchConfig,
}

impl BatchExecutor {
    /// Creates an idle executor with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle executor with a custom config.
    pub fn with_config(config: BatchConfig) -> Self {
        Self {
            running: Arc::default(),
            config,
        }
    }

    /// Current state.
    pub fn state(&self) -> BatchState {
        if self.running.load(Ordering::SeqCst) {
            BatchState::Running
        } else {
            BatchState::Idle
        }
    }

    /// Returns `true` while a batch is running.
    pub fn is_running(&self) -> bool {
        self.state() == BatchState::Running
    }

    /// Runs `operation` for every target id of `job`.
    ///
    /// Items are awaited one after another in the job's order. A failing
    /// item is logged and counted, and processing moves on to the next id;
    /// nothing is retried or rolled back. Once the loop is done the hooks
    /// clear the selection, reload once and receive a notification whose
    /// severity is `Success` when nothing failed and `Warning` otherwise.
    ///
    /// Returns [`BatchError::Busy`] without doing anything if this executor
    /// (or a clone of it) is already running a batch.
    pub async fn run<K, F, Fut, E, H>(
        &self,
        job: BatchJob<K>,
        mut operation: F,
        hooks: &mut H,
    ) -> Result<BatchOutcome, BatchError>
    where
        K: Clone + fmt::Display,
        F: FnMut(K) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
        H: BatchHooks + ?Sized,
    {
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            log::warn!("{}: rejected, another batch is running", job.label);
            return Err(BatchError::Busy);
        };

        log::info!("{}: starting on {} items", job.label, job.len());
        let mut outcome = BatchOutcome::default();

        for id in &job.target_ids {
            match operation(id.clone()).await {
                Ok(()) => {
                    log::debug!("{}: {} done", job.label, id);
                    outcome.record(true);
                }
                Err(err) => {
                    log::warn!("{}: {} failed: {}", job.label, id, err);
                    outcome.record(false);
                }
            }
        }

        log::info!(
            "{}: finished, {} succeeded, {} failed",
            job.label,
            outcome.success_count,
            outcome.fail_count
        );

        hooks.clear_selection();
        hooks.reload().await;
        hooks.notify(outcome.notification(&job.label, self.config.notification_duration));

        Ok(outcome)
    }
}

/// Holds the running flag for the duration of a batch.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
