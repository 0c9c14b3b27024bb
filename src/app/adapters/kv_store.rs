//! Key-value persistence boundary
//!
//! The roster persists everything as string blobs under string keys: the
//! student snapshot, the notification history and the per-user notification
//! preferences. The [`KeyValueStore`] trait keeps the core independent of
//! where those blobs live.
//!
//! ## Implementations
//!
//! - [`MemoryStore`]: in-process map, used by tests
//! - [`JsonFileStore`]: one file per key under a data directory
//!
//! Failures from either surface as [`crate::Error::Transport`] and are never
//! retried.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Error, Result};

/// Asynchronous string blob store
pub trait KeyValueStore: Send + Sync {
    /// Read the blob under `key`, `None` when nothing is stored
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous blob
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Remove the blob under `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Read and deserialize a JSON blob
///
/// Returns `Ok(None)` when the key is absent and [`Error::Json`] when the
/// blob is not valid JSON for `T`.
pub async fn load_json<K, T>(store: &K, key: &str) -> Result<Option<T>>
where
    K: KeyValueStore,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        None => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::json(format!("Stored value under '{}' is not valid", key), e)),
    }
}

/// Serialize a value as JSON and store it
pub async fn save_json<K, T>(store: &K, key: &str, value: &T) -> Result<()>
where
    K: KeyValueStore,
    T: Serialize + Sync,
{
    let text = serde_json::to_string(value)
        .map_err(|e| Error::json(format!("Failed to encode value for '{}'", key), e))?;
    store.set(key, text).await
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Stored keys in sorted order
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// File-backed key-value store
///
/// Each key maps to `<root>/<encoded key>.json`. Keys are percent-encoded
/// so any key yields a single safe file name.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::transport_with_source(
                format!("Failed to read '{}' from {}", key, path.display()),
                e,
            )),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            Error::transport_with_source(
                format!("Failed to create data directory {}", self.root.display()),
                e,
            )
        })?;

        // Write beside the target then rename so readers never see half a blob
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, value).await.map_err(|e| {
            Error::transport_with_source(
                format!("Failed to write '{}' to {}", key, staging.display()),
                e,
            )
        })?;
        tokio::fs::rename(&staging, &path).await.map_err(|e| {
            Error::transport_with_source(
                format!("Failed to store '{}' at {}", key, path.display()),
                e,
            )
        })?;
        debug!("Stored '{}' at {}", key, path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::transport_with_source(
                format!("Failed to remove '{}' at {}", key, path.display()),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("k", "v1".to_string()).await.unwrap();
        store.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let key = "notificationPreferences_user 1";

        JsonFileStore::new(dir.path())
            .set(key, "{\"grade_update\":false}".to_string())
            .await
            .unwrap();

        let reopened = JsonFileStore::new(dir.path());
        assert_eq!(
            reopened.get(key).await.unwrap().as_deref(),
            Some("{\"grade_update\":false}")
        );
        assert!(reopened.path_for(key).exists());
        assert!(
            reopened
                .path_for(key)
                .to_string_lossy()
                .ends_with("notificationPreferences_user%201.json")
        );
    }

    #[tokio::test]
    async fn test_file_store_missing_key_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("students").await.unwrap(), None);
        store.remove("students").await.unwrap();

        store.set("students", "[]".to_string()).await.unwrap();
        store.remove("students").await.unwrap();
        assert_eq!(store.get("students").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_unwritable_root_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let store = JsonFileStore::new(&blocker);
        let result = store.set("students", "[]".to_string()).await;
        assert!(matches!(result, Err(Error::Transport { .. })));
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryStore::with_entries([("bad", "{not json")]);

        save_json(&store, "list", &vec![1, 2, 3]).await.unwrap();
        let list: Option<Vec<i32>> = load_json(&store, "list").await.unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = load_json(&store, "nope").await.unwrap();
        assert_eq!(missing, None);

        let bad: Result<Option<Vec<i32>>> = load_json(&store, "bad").await;
        assert!(matches!(bad, Err(Error::Json { .. })));
    }
}
