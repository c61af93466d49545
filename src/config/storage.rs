//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// File locations
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the reminder handle map
    #[serde(default = "default_handle_map_path")]
    pub handle_map_path: PathBuf,

    /// YAML snapshot of preferences, perks and cards
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.handle_map_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.handle_map_path"));
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.snapshot_path"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            handle_map_path: default_handle_map_path(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_handle_map_path() -> PathBuf {
    PathBuf::from("data/reminder-handles.json")
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/snapshot.yaml")
}
