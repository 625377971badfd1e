//! Durable key/value storage for the record collections.
//!
//! Each collection lives under one key as a serialized JSON array. `Store::load` never fails: an
//! absent, unparsable or wrongly shaped entry comes back as an empty collection. `Store::save`
//! rewrites the whole entry and is the only write path.

use crate::error::{ErrorType, IntoResult};
use crate::{utils, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// The durable entry holding the transactions collection.
pub const TRANSACTIONS: &str = "transactions";

/// The durable entry holding the appointments collection.
pub const APPOINTMENTS: &str = "appointments";

/// A string-keyed store of text values.
#[async_trait]
pub trait KeyValue: Debug + Send + Sync {
    /// Returns the value stored at `key`, `None` when nothing has been stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored at `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates `dir` if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValue for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.is_file() {
            return Ok(None);
        }
        utils::read(&path).await.map(Some)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        // Write beside the target and move it into place so a crash never leaves half a file.
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        utils::write(&tmp, value).await?;
        utils::rename(&tmp, &path).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        utils::remove(&self.path(key)).await
    }
}

/// Keeps values in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValue for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _ = self.values().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _ = self.values().remove(key);
        Ok(())
    }
}

/// Reads and writes whole collections of records.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Arc<dyn KeyValue>,
}

impl Store {
    pub fn new(backend: impl KeyValue + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &dyn KeyValue {
        self.backend.as_ref()
    }

    /// Loads the collection stored at `key`, or an empty one if it is absent or not an array.
    /// Records that cannot be read are skipped and the rest are kept.
    pub async fn load<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        let text = match self.backend.get(key).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Unable to read '{key}', starting empty: {e:#}");
                return Vec::new();
            }
        };
        // `null` is what a cleared entry looks like, treat it like an absent one.
        let values = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&text) {
            Ok(values) => values.unwrap_or_default(),
            Err(e) => {
                warn!("Stored '{key}' is not a valid collection, starting empty: {e}");
                return Vec::new();
            }
        };
        values
            .into_iter()
            .enumerate()
            .filter_map(|(ix, value)| match serde_json::from_value::<T>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable record {ix} of '{key}': {e}");
                    None
                }
            })
            .collect()
    }

    /// Serializes `records` and overwrites whatever was stored at `key`.
    pub async fn save<T>(&self, key: &str, records: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let text = serde_json::to_string(records).pub_result(ErrorType::Internal)?;
        self.backend
            .set(key, text)
            .await
            .pub_result(ErrorType::Storage)?;
        debug!("Saved {} record(s) to '{key}'", records.len());
        Ok(())
    }
}
