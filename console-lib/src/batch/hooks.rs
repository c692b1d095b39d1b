//! Completion hooks supplied by the caller of a batch.

use async_trait::async_trait;

use crate::notify::Notification;

/// Side effects a batch triggers once every item has been attempted.
///
/// Called in order: [`clear_selection`](Self::clear_selection), then
/// [`reload`](Self::reload) exactly once, then [`notify`](Self::notify).
#[async_trait]
pub trait BatchHooks: Send {
    /// Clear the selection the batch was started from.
    fn clear_selection(&mut self);

    /// Reload the data the batch changed.
    async fn reload(&mut self);

    /// Show the completion notification.
    fn notify(&mut self, notification: Notification);
}
