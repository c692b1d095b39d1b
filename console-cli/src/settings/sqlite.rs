//! Settings persisted to a SQLite file.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::OptionalExtension;

use super::{SettingsError, SettingsStore};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (
    key   TEXT PRIMARY KEY,
    value BLOB NOT NULL
) WITHOUT ROWID";

/// SQLite store with a read-through cache.
///
/// The cache remembers misses too, so screens asking for preferences that
/// were never saved only hit the database once. This process is the only
/// writer, so the cache never goes stale.
pub struct SqliteStore {
    client: Client,
    cache: DashMap<String, Option<Vec<u8>>>,
}

impl SqliteStore {
    /// Open the database at `path`, creating the file and table if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let client = ClientBuilder::new().path(path).open().await?;
        client.conn(|conn| conn.execute_batch(SCHEMA)).await?;
        log::debug!("settings database at {}", path.display());

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(cached) = self.cache.get(key) {
            return Ok(cached.clone());
        }

        let owned = key.to_owned();
        let value = self
            .client
            .conn(move |conn| {
                conn.query_row("SELECT value FROM preferences WHERE key = ?1", [&owned], |row| {
                    row.get::<_, Vec<u8>>(0)
                })
                .optional()
            })
            .await?;

        self.cache.insert(key.to_owned(), value.clone());
        Ok(value)
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let owned = key.to_owned();
        let bytes = value.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
                    rusqlite::params![owned, bytes],
                )
            })
            .await?;

        self.cache.insert(key.to_owned(), Some(value));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, SettingsError> {
        let owned = key.to_owned();
        let deleted = self
            .client
            .conn(move |conn| conn.execute("DELETE FROM preferences WHERE key = ?1", [&owned]))
            .await?;

        self.cache.insert(key.to_owned(), None);
        Ok(deleted > 0)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // substr instead of LIKE: `_` and `%` are ordinary characters here
        let prefix = prefix.to_owned();
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key FROM preferences
                     WHERE substr(key, 1, length(?1)) = ?1
                     ORDER BY key",
                )?;
                let keys = stmt.query_map([&prefix], |row| row.get::<_, String>(0))?;
                keys.collect::<Result<Vec<_>, _>>()
            })
            .await?;
        Ok(keys)
    }
}
