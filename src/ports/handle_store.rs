//! HandleStore port - persisted map from reminder key to scheduled handle.
//!
//! Read at process start and written per key during reconciliation. A write
//! that returns `Ok` must be durable; the dispatcher only treats a reminder
//! as scheduled once its record write has confirmed.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::reminder::{ReminderKey, ScheduledReminder};

/// Errors that can occur during handle map persistence
#[derive(Debug, thiserror::Error)]
pub enum HandleStoreError {
    #[error("Failed to serialize handle map: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize handle map: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the persisted `ReminderKey → ScheduledReminder` map
#[async_trait]
pub trait HandleStore: Send + Sync {
    /// Load every persisted record.
    ///
    /// An empty store yields an empty map, not an error.
    async fn load_all(&self) -> Result<HashMap<ReminderKey, ScheduledReminder>, HandleStoreError>;

    /// Insert or replace the record for `key`.
    async fn put(
        &self,
        key: &ReminderKey,
        record: &ScheduledReminder,
    ) -> Result<(), HandleStoreError>;

    /// Remove the record for `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &ReminderKey) -> Result<(), HandleStoreError>;
}
