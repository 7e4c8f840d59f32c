//! Key-value stores for preferences.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::StorageKey;
use super::error::StorageError;

/// An opaque get/set/delete store addressed by [`StorageKey`].
///
/// A value passed to `save` must come back unchanged from `get`; a key
/// that was never saved, or was deleted, reads as `None`.
pub trait KeyValueStore: Send + Sync {
    fn save(
        &self,
        key: StorageKey,
        value: &Value,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn get(&self, key: StorageKey) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Store keeping every key in one JSON document on disk.
///
/// The whole document is rewritten on each change, through a temporary
/// file that is then renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new("gather_preferences.json")
    }
}

impl KeyValueStore for JsonFileStore {
    async fn save(&self, key: StorageKey, value: &Value) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.as_str().to_string(), value.clone());
        self.write_document(&document).await?;
        debug!(%key, path = %self.path.display(), "saved preference");
        Ok(())
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key.as_str()))
    }

    async fn delete(&self, key: StorageKey) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(key.as_str()).is_some() {
            self.write_document(&document).await?;
            debug!(%key, path = %self.path.display(), "deleted preference");
        }
        Ok(())
    }
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<StorageKey, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn save(&self, key: StorageKey, value: &Value) -> Result<(), StorageError> {
        self.inner.write().await.insert(key, value.clone());
        Ok(())
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError> {
        Ok(self.inner.read().await.get(&key).cloned())
    }

    async fn delete(&self, key: StorageKey) -> Result<(), StorageError> {
        self.inner.write().await.remove(&key);
        Ok(())
    }
}
