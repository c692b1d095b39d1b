//! Typed, persisted console settings.

mod memory;
mod sqlite;
mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::SettingsStore;

use std::sync::Arc;

use console_lib::grid::SortState;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Settings as typed values, bincode-encoded into a [`SettingsStore`].
///
/// Clones share the store.
#[derive(Clone)]
pub struct SettingsProvider {
    store: Arc<dyn SettingsStore>,
}

impl SettingsProvider {
    pub fn new(store: impl SettingsStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.store.read(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.store.write(key, bytes).await
    }

    /// Saved grid preferences for a screen, if any.
    pub async fn grid_preferences(
        &self,
        screen: &str,
    ) -> Result<Option<GridPreferences>, SettingsError> {
        self.get(&GridPreferences::key(screen)).await
    }

    /// Save grid preferences for a screen.
    pub async fn set_grid_preferences(
        &self,
        screen: &str,
        preferences: &GridPreferences,
    ) -> Result<(), SettingsError> {
        self.set(&GridPreferences::key(screen), preferences).await
    }

    /// Forget a screen's grid preferences. Returns whether any were saved.
    pub async fn clear_grid_preferences(&self, screen: &str) -> Result<bool, SettingsError> {
        self.store.remove(&GridPreferences::key(screen)).await
    }

    /// Forget the grid preferences of every screen, including screens this
    /// build no longer has. Returns the screens that had some.
    pub async fn clear_all_grid_preferences(&self) -> Result<Vec<String>, SettingsError> {
        let mut cleared = Vec::new();
        for key in self.store.keys(GridPreferences::PREFIX).await? {
            if self.store.remove(&key).await? {
                cleared.push(key[GridPreferences::PREFIX.len()..].to_string());
            }
        }
        Ok(cleared)
    }
}

/// Per-screen grid layout remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPreferences {
    /// Rows per page; `None` keeps the screen's default.
    pub page_size: Option<usize>,
    pub sort: Option<SortState>,
}

impl GridPreferences {
    const PREFIX: &'static str = "grid.";

    /// Settings key for a screen's preferences.
    pub fn key(screen: &str) -> String {
        format!("{}{screen}", Self::PREFIX)
    }
}
