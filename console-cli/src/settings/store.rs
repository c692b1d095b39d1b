//! Storage seam under [`SettingsProvider`](super::SettingsProvider).

use async_trait::async_trait;

use super::SettingsError;

/// Where encoded settings live.
///
/// Values are opaque bytes; encoding is the provider's business. Keys are
/// dotted paths such as `grid.users`, so a prefix names a group of
/// settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or replace the value under `key`.
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Drop `key`. Returns whether it was stored.
    async fn remove(&self, key: &str) -> Result<bool, SettingsError>;

    /// Stored keys starting with `prefix`, in order. The prefix is matched
    /// literally.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
