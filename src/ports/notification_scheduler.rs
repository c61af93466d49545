//! NotificationScheduler port - the platform's local scheduling primitive.
//!
//! The primitive only creates and cancels; there is no update. Both calls may
//! suspend and may fail, and the core treats every failure as transient.

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;
use crate::domain::navigation::DeepLink;
use crate::domain::reminder::{DesiredReminder, ScheduledHandle};

/// Errors from the scheduling primitive.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Platform rejected the request: {0}")]
    Rejected(String),

    #[error("Pending notification limit of {limit} reached")]
    LimitExceeded { limit: usize },

    #[error("Scheduling call timed out")]
    Timeout,

    #[error("Notification permission not granted")]
    PermissionDenied,
}

/// What the notification displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: DeepLink,
}

/// When (and on which channel) the notification fires.
///
/// Adapters encode this however their platform expects, e.g. a plain date
/// trigger or a channel-qualified one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTrigger {
    pub fire_at: Timestamp,
    pub channel: Option<String>,
}

impl NotificationContent {
    pub fn from_reminder(reminder: &DesiredReminder) -> Self {
        Self {
            title: reminder.content.title.clone(),
            body: reminder.content.body.clone(),
            data: reminder.content.data.clone(),
        }
    }
}

impl NotificationTrigger {
    pub fn at(fire_at: Timestamp) -> Self {
        Self {
            fire_at,
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: Option<String>) -> Self {
        self.channel = channel;
        self
    }
}

/// Port for scheduling local notifications.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Schedules a notification and returns its platform handle.
    async fn create(
        &self,
        content: &NotificationContent,
        trigger: &NotificationTrigger,
    ) -> Result<ScheduledHandle, SchedulingError>;

    /// Cancels a scheduled notification.
    ///
    /// Cancelling a handle that already fired or was already cancelled
    /// succeeds.
    async fn cancel(&self, handle: &ScheduledHandle) -> Result<(), SchedulingError>;
}
