//! Record grid engine for the admin console
//!
//! Sorting, filtering, pagination and id-keyed selection for record lists,
//! plus a sequential batch executor that performs bulk actions against the
//! current selection with per-item failure isolation.

pub mod batch;
pub mod error;
pub mod grid;
pub mod model;
pub mod notify;

pub use batch::BatchExecutor;
pub use batch::BatchJob;
pub use batch::BatchOutcome;
pub use error::BatchError;
pub use grid::Grid;
pub use notify::Notification;
pub use notify::Severity;
