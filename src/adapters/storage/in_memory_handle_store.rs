//! In-Memory Handle Store Adapter
//!
//! Keeps the reminder handle map in memory. Useful for testing and
//! development; supports failure injection for the persist-after-confirm
//! path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::reminder::{ReminderKey, ScheduledReminder};
use crate::ports::{HandleStore, HandleStoreError};

/// In-memory storage for scheduled reminder records
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandleStore {
    records: Arc<RwLock<HashMap<ReminderKey, ScheduledReminder>>>,
    failing_writes: Arc<RwLock<usize>>,
}

impl InMemoryHandleStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: HashMap<ReminderKey, ScheduledReminder>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            failing_writes: Arc::new(RwLock::new(0)),
        }
    }

    /// Make the next `count` writes (put or remove) fail.
    pub async fn fail_next_writes(&self, count: usize) {
        *self.failing_writes.write().await = count;
    }

    pub async fn get(&self, key: &ReminderKey) -> Option<ScheduledReminder> {
        self.records.read().await.get(key).cloned()
    }

    /// Get the number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn check_write(&self) -> Result<(), HandleStoreError> {
        let mut failing = self.failing_writes.write().await;
        if *failing > 0 {
            *failing -= 1;
            return Err(HandleStoreError::IoError("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HandleStore for InMemoryHandleStore {
    async fn load_all(&self) -> Result<HashMap<ReminderKey, ScheduledReminder>, HandleStoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn put(
        &self,
        key: &ReminderKey,
        record: &ScheduledReminder,
    ) -> Result<(), HandleStoreError> {
        self.check_write().await?;
        self.records.write().await.insert(key.clone(), record.clone());
        Ok(())
    }

    async fn remove(&self, key: &ReminderKey) -> Result<(), HandleStoreError> {
        self.check_write().await?;
        self.records.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::navigation::DeepLink;
    use crate::domain::reminder::{ReminderContent, ScheduledHandle};

    fn key() -> ReminderKey {
        "amex-plat:uber-cash:2026-02:expiry-3".parse().unwrap()
    }

    fn record() -> ScheduledReminder {
        ScheduledReminder {
            handle: ScheduledHandle::new("h-1"),
            fire_at: Timestamp::now(),
            content: ReminderContent {
                title: "title".to_string(),
                body: "body".to_string(),
                data: DeepLink::new("/(tabs)/01-dashboard"),
            },
            state: Default::default(),
        }
    }

    #[tokio::test]
    async fn put_then_load() {
        let store = InMemoryHandleStore::new();
        store.put(&key(), &record()).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.get(&key()), Some(&record()));
    }

    #[tokio::test]
    async fn remove_absent_key_succeeds() {
        let store = InMemoryHandleStore::new();
        assert!(store.remove(&key()).await.is_ok());
    }

    #[tokio::test]
    async fn injected_write_failure_leaves_store_untouched() {
        let store = InMemoryHandleStore::new();
        store.fail_next_writes(1).await;

        assert!(store.put(&key(), &record()).await.is_err());
        assert!(store.is_empty().await);

        store.put(&key(), &record()).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
