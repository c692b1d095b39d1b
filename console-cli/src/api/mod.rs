//! Directory service the console administers.
//!
//! [`DirectoryApi`] is the seam between the screens and whatever backs the
//! user and organization records. The console ships with
//! [`MemoryDirectory`], seeded from an embedded fixture.

mod memory;

pub use memory::MemoryDirectory;

use std::fmt;

use async_trait::async_trait;
use console_lib::model::{Organization, User};

/// Kind of record an API call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Organization,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => f.write_str("user"),
            Entity::Organization => f.write_str("organization"),
        }
    }
}

/// Errors returned by a [`DirectoryApi`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: u64 },

    /// The service refused the request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or failed internally.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Directory data could not be parsed.
    #[error("invalid directory data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Creates a not-found error.
    pub fn not_found(entity: Entity, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// List, delete and remind operations over users and organizations.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// All users, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// All organizations, ordered by id.
    async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError>;

    async fn delete_user(&self, id: u64) -> Result<(), ApiError>;

    async fn delete_organization(&self, id: u64) -> Result<(), ApiError>;

    /// Remind a user to complete their survey.
    async fn send_user_reminder(&self, id: u64) -> Result<(), ApiError>;

    /// Send an organization's contact a reminder about its members' surveys.
    async fn send_organization_reminder(&self, id: u64) -> Result<(), ApiError>;
}
