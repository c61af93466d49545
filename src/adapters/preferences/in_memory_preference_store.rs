//! In-Memory Preference Store
//!
//! Holds the current notification preferences. The settings screen writes
//! through `update`; the reminder engine reads synchronous snapshots.

use std::sync::{Arc, RwLock};

use crate::domain::preferences::NotificationPreferences;
use crate::ports::PreferenceReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    preferences: Arc<RwLock<NotificationPreferences>>,
}

impl InMemoryPreferenceStore {
    pub fn new(preferences: NotificationPreferences) -> Self {
        Self {
            preferences: Arc::new(RwLock::new(preferences)),
        }
    }

    /// Replace the stored preferences.
    pub fn set(&self, preferences: NotificationPreferences) {
        self.update(|current| *current = preferences);
    }

    /// Apply an in-place edit.
    pub fn update(&self, edit: impl FnOnce(&mut NotificationPreferences)) {
        let mut guard = self
            .preferences
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        edit(&mut guard);
    }
}

impl PreferenceReader for InMemoryPreferenceStore {
    fn snapshot(&self) -> NotificationPreferences {
        self.preferences
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
