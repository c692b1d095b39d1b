//! Process-local settings store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsError, SettingsStore};

/// Settings that last as long as the process.
///
/// Used when no settings database can be opened, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, SettingsError> {
        Ok(self.values.remove(key).is_some())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .values
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keys_and_remove() {
        let store = MemoryStore::new();
        for (key, value) in [("grid.users", 1), ("grid.organizations", 2), ("gridlines", 3)] {
            store.write(key, vec![value]).await.unwrap();
        }

        assert_eq!(
            store.keys("grid.").await.unwrap(),
            vec!["grid.organizations".to_string(), "grid.users".to_string()]
        );

        assert!(store.remove("grid.users").await.unwrap());
        assert!(!store.remove("grid.users").await.unwrap());
        assert_eq!(store.read("grid.users").await.unwrap(), None);
        assert_eq!(store.read("gridlines").await.unwrap(), Some(vec![3]));
    }
}
