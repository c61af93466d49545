//! File-based Handle Store Adapter
//!
//! Stores the reminder handle map as a single JSON object on disk, keyed by
//! the reminder key's string form. Every write goes to a sibling temp file
//! which is then renamed over the map, so a crash mid-write leaves either the
//! old or the new map, never a truncated one.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::reminder::{ReminderKey, ScheduledReminder};
use crate::ports::{HandleStore, HandleStoreError};

/// File-based storage for the handle map
#[derive(Debug)]
pub struct FileHandleStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileHandleStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// The file and its parent directory are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileHandleStore::new("./data/reminder-handles.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_raw(&self) -> Result<BTreeMap<String, ScheduledReminder>, HandleStoreError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(HandleStoreError::IoError(e.to_string())),
        };

        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&json)
            .map_err(|e| HandleStoreError::DeserializationFailed(e.to_string()))
    }

    async fn write_raw(
        &self,
        records: &BTreeMap<String, ScheduledReminder>,
    ) -> Result<(), HandleStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HandleStoreError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| HandleStoreError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| HandleStoreError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| HandleStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl HandleStore for FileHandleStore {
    async fn load_all(&self) -> Result<HashMap<ReminderKey, ScheduledReminder>, HandleStoreError> {
        let raw = self.read_raw().await?;
        let mut records = HashMap::with_capacity(raw.len());

        for (key, record) in raw {
            match key.parse::<ReminderKey>() {
                Ok(parsed) => {
                    records.insert(parsed, record);
                }
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        handle = %record.handle,
                        error = %e,
                        "Ignoring handle map entry with unparseable key"
                    );
                }
            }
        }

        Ok(records)
    }

    async fn put(
        &self,
        key: &ReminderKey,
        record: &ScheduledReminder,
    ) -> Result<(), HandleStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut raw = self.read_raw().await?;
        raw.insert(key.to_string(), record.clone());
        self.write_raw(&raw).await
    }

    async fn remove(&self, key: &ReminderKey) -> Result<(), HandleStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut raw = self.read_raw().await?;
        if raw.remove(&key.to_string()).is_none() {
            return Ok(());
        }
        self.write_raw(&raw).await
    }
}
