//! In-memory directory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use console_lib::model::{Organization, User};
use dashmap::{DashMap, DashSet};
use serde::Deserialize;

use super::{ApiError, DirectoryApi, Entity};

const SEED: &str = include_str!("../../fixtures/directory.json");

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    organizations: Vec<Organization>,
}

/// A directory held in memory.
///
/// Mutations can be made to fail for chosen records with
/// [`fail_on`](Self::fail_on), and the whole service can be taken offline,
/// which makes the list calls fail.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    users: DashMap<u64, User>,
    organizations: DashMap<u64, Organization>,
    failing: DashSet<(Entity, u64)>,
    reminded: DashSet<(Entity, u64)>,
    offline: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory seeded with the bundled fixture.
    pub fn seeded() -> Result<Self, ApiError> {
        Self::from_json(SEED)
    }

    /// A directory holding the records of a JSON document with `users` and
    /// `organizations` arrays.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let directory = Self::new();
        for user in snapshot.users {
            directory.users.insert(user.id, user);
        }
        for organization in snapshot.organizations {
            directory.organizations.insert(organization.id, organization);
        }
        log::debug!(
            "directory loaded: {} users, {} organizations",
            directory.users.len(),
            directory.organizations.len()
        );
        Ok(directory)
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every mutation of this record fail.
    pub fn fail_on(&self, entity: Entity, id: u64) {
        self.failing.insert((entity, id));
    }

    /// Take the service offline or bring it back.
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns `true` if a reminder went out for this record.
    #[cfg(test)]
    pub fn was_reminded(&self, entity: Entity, id: u64) -> bool {
        self.reminded.contains(&(entity, id))
    }

    async fn enter(&self) -> Result<(), ApiError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("directory is offline".to_string()));
        }
        Ok(())
    }

    async fn enter_mutation(&self, entity: Entity, id: u64) -> Result<(), ApiError> {
        self.enter().await?;
        if self.failing.contains(&(entity, id)) {
            return Err(ApiError::Unavailable(format!("{entity} {id} could not be updated")));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryApi for MemoryDirectory {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.enter().await?;
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.enter().await?;
        let mut organizations: Vec<Organization> = self
            .organizations
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        organizations.sort_by_key(|organization| organization.id);
        Ok(organizations)
    }

    async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.enter_mutation(Entity::User, id).await?;
        let (_, user) = self
            .users
            .remove(&id)
            .ok_or_else(|| ApiError::not_found(Entity::User, id))?;

        if let Some(name) = &user.organization {
            for mut organization in self.organizations.iter_mut() {
                if &organization.name == name {
                    organization.member_count = organization.member_count.saturating_sub(1);
                }
            }
        }
        log::debug!("deleted user {id}");
        Ok(())
    }

    async fn delete_organization(&self, id: u64) -> Result<(), ApiError> {
        self.enter_mutation(Entity::Organization, id).await?;
        let (_, organization) = self
            .organizations
            .remove(&id)
            .ok_or_else(|| ApiError::not_found(Entity::Organization, id))?;

        for mut user in self.users.iter_mut() {
            if user.organization.as_deref() == Some(organization.name.as_str()) {
                user.organization = None;
            }
        }
        log::debug!("deleted organization {id}");
        Ok(())
    }

    async fn send_user_reminder(&self, id: u64) -> Result<(), ApiError> {
        self.enter_mutation(Entity::User, id).await?;
        let user = self
            .users
            .get(&id)
            .ok_or_else(|| ApiError::not_found(Entity::User, id))?;
        if !user.has_pending_survey() {
            return Err(ApiError::Rejected(format!(
                "{} has already completed the survey",
                user.email
            )));
        }
        self.reminded.insert((Entity::User, id));
        log::debug!("reminder sent to {}", user.email);
        Ok(())
    }

    async fn send_organization_reminder(&self, id: u64) -> Result<(), ApiError> {
        self.enter_mutation(Entity::Organization, id).await?;
        let organization = self
            .organizations
            .get(&id)
            .ok_or_else(|| ApiError::not_found(Entity::Organization, id))?;
        let Some(contact) = &organization.contact_email else {
            return Err(ApiError::Rejected(format!(
                "{} has no contact address",
                organization.name
            )));
        };
        self.reminded.insert((Entity::Organization, id));
        log::debug!("reminder sent to {contact}");
        Ok(())
    }
}
