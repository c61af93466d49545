//! In-Memory Notification Scheduler
//!
//! Stands in for the platform's local-notification primitive. Keeps pending
//! notifications in memory, enforces an optional pending limit and lets tests
//! inject failures into the next N create or cancel calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::domain::reminder::ScheduledHandle;
use crate::ports::{NotificationContent, NotificationScheduler, NotificationTrigger, SchedulingError};

/// A notification waiting to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub handle: ScheduledHandle,
    pub content: NotificationContent,
    pub trigger: NotificationTrigger,
}

impl PendingNotification {
    /// The payload the platform hands to the delivery listener.
    pub fn delivered_payload(&self) -> serde_json::Value {
        self.content.data.to_delivered_payload()
    }
}

#[derive(Debug, Default)]
struct SchedulerState {
    pending: HashMap<ScheduledHandle, PendingNotification>,
    failing_creates: usize,
    failing_cancels: usize,
    create_calls: usize,
    cancel_calls: usize,
}

/// In-memory scheduling primitive
#[derive(Debug, Clone)]
pub struct InMemoryNotificationScheduler {
    state: Arc<RwLock<SchedulerState>>,
    max_pending: Option<usize>,
}

impl InMemoryNotificationScheduler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SchedulerState::default())),
            max_pending: None,
        }
    }

    /// Reject creates once `limit` notifications are pending.
    pub fn with_max_pending(mut self, limit: usize) -> Self {
        self.max_pending = Some(limit);
        self
    }

    /// Make the next `count` create calls fail.
    pub async fn fail_next_creates(&self, count: usize) {
        self.state.write().await.failing_creates = count;
    }

    /// Make the next `count` cancel calls fail.
    pub async fn fail_next_cancels(&self, count: usize) {
        self.state.write().await.failing_cancels = count;
    }

    /// Get the number of pending notifications
    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending.len()
    }

    pub async fn pending(&self) -> Vec<PendingNotification> {
        let mut pending: Vec<_> = self.state.read().await.pending.values().cloned().collect();
        pending.sort_by_key(|p| (p.trigger.fire_at, p.handle.as_str().to_string()));
        pending
    }

    pub async fn is_pending(&self, handle: &ScheduledHandle) -> bool {
        self.state.read().await.pending.contains_key(handle)
    }

    pub async fn create_calls(&self) -> usize {
        self.state.read().await.create_calls
    }

    pub async fn cancel_calls(&self) -> usize {
        self.state.read().await.cancel_calls
    }

    /// Removes and returns every notification due at or before `now`,
    /// earliest first.
    pub async fn fire_due(&self, now: Timestamp) -> Vec<PendingNotification> {
        let mut state = self.state.write().await;
        let due: Vec<ScheduledHandle> = state
            .pending
            .values()
            .filter(|p| !p.trigger.fire_at.is_after(&now))
            .map(|p| p.handle.clone())
            .collect();

        let mut fired: Vec<_> = due
            .iter()
            .filter_map(|handle| state.pending.remove(handle))
            .collect();
        fired.sort_by_key(|p| p.trigger.fire_at);
        fired
    }

    /// Clear all pending notifications and counters (useful for tests)
    pub async fn clear(&self) {
        *self.state.write().await = SchedulerState::default();
    }
}

impl Default for InMemoryNotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationScheduler for InMemoryNotificationScheduler {
    async fn create(
        &self,
        content: &NotificationContent,
        trigger: &NotificationTrigger,
    ) -> Result<ScheduledHandle, SchedulingError> {
        let mut state = self.state.write().await;
        state.create_calls += 1;

        if state.failing_creates > 0 {
            state.failing_creates -= 1;
            return Err(SchedulingError::Rejected("injected create failure".to_string()));
        }

        if let Some(limit) = self.max_pending {
            if state.pending.len() >= limit {
                return Err(SchedulingError::LimitExceeded { limit });
            }
        }

        let handle = ScheduledHandle::new(Uuid::new_v4().to_string());
        state.pending.insert(
            handle.clone(),
            PendingNotification {
                handle: handle.clone(),
                content: content.clone(),
                trigger: trigger.clone(),
            },
        );
        Ok(handle)
    }

    async fn cancel(&self, handle: &ScheduledHandle) -> Result<(), SchedulingError> {
        let mut state = self.state.write().await;
        state.cancel_calls += 1;

        if state.failing_cancels > 0 {
            state.failing_cancels -= 1;
            return Err(SchedulingError::Timeout);
        }

        state.pending.remove(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::DeepLink;

    fn content(title: &str) -> NotificationContent {
        NotificationContent {
            title: title.to_string(),
            body: "body".to_string(),
            data: DeepLink::new("/(tabs)/01-dashboard"),
        }
    }

    #[tokio::test]
    async fn create_returns_distinct_handles() {
        let scheduler = InMemoryNotificationScheduler::new();
        let trigger = NotificationTrigger::at(Timestamp::now().add_days(1));

        let a = scheduler.create(&content("a"), &trigger).await.unwrap();
        let b = scheduler.create(&content("b"), &trigger).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(scheduler.pending_count().await, 2);
    }

    #[tokio::test]
    async fn cancel_unknown_handle_succeeds() {
        let scheduler = InMemoryNotificationScheduler::new();
        let result = scheduler.cancel(&ScheduledHandle::new("gone")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cancel_removes_pending() {
        let scheduler = InMemoryNotificationScheduler::new();
        let trigger = NotificationTrigger::at(Timestamp::now().add_days(1));
        let handle = scheduler.create(&content("a"), &trigger).await.unwrap();

        scheduler.cancel(&handle).await.unwrap();

        assert!(!scheduler.is_pending(&handle).await);
    }

    #[tokio::test]
    async fn enforces_pending_limit() {
        let scheduler = InMemoryNotificationScheduler::new().with_max_pending(1);
        let trigger = NotificationTrigger::at(Timestamp::now().add_days(1));
        scheduler.create(&content("a"), &trigger).await.unwrap();

        let result = scheduler.create(&content("b"), &trigger).await;

        assert!(matches!(result, Err(SchedulingError::LimitExceeded { limit: 1 })));
    }

    #[tokio::test]
    async fn injected_failures_are_consumed() {
        let scheduler = InMemoryNotificationScheduler::new();
        let trigger = NotificationTrigger::at(Timestamp::now().add_days(1));
        scheduler.fail_next_creates(1).await;

        assert!(scheduler.create(&content("a"), &trigger).await.is_err());
        assert!(scheduler.create(&content("a"), &trigger).await.is_ok());
        assert_eq!(scheduler.create_calls().await, 2);
    }

    #[tokio::test]
    async fn fire_due_only_returns_elapsed() {
        let scheduler = InMemoryNotificationScheduler::new();
        let now = Timestamp::now();
        scheduler
            .create(&content("past"), &NotificationTrigger::at(now.add_days(-1)))
            .await
            .unwrap();
        scheduler
            .create(&content("future"), &NotificationTrigger::at(now.add_days(1)))
            .await
            .unwrap();

        let fired = scheduler.fire_due(now).await;

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].content.title, "past");
        assert_eq!(scheduler.pending_count().await, 1);
    }
}
