//! Desired and scheduled reminder records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ReminderContent, ReminderKey};
use crate::domain::foundation::Timestamp;

/// A reminder that should exist, as computed by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredReminder {
    pub key: ReminderKey,
    pub fire_at: Timestamp,
    pub content: ReminderContent,
}

/// Opaque identifier returned by the platform's scheduling primitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduledHandle(String);

impl ScheduledHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduledHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a persisted handle is live or on its way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleState {
    #[default]
    Scheduled,
    /// Written before the cancel call is issued. A record left in this state
    /// by an interrupted pass is cancelled again on the next pass.
    PendingCancel,
}

/// Persisted entry of the handle map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    pub handle: ScheduledHandle,
    pub fire_at: Timestamp,
    pub content: ReminderContent,
    #[serde(default)]
    pub state: HandleState,
}

impl ScheduledReminder {
    /// Record for a reminder the platform just confirmed.
    pub fn confirmed(handle: ScheduledHandle, desired: &DesiredReminder) -> Self {
        Self {
            handle,
            fire_at: desired.fire_at,
            content: desired.content.clone(),
            state: HandleState::Scheduled,
        }
    }

    pub fn pending_cancel(&self) -> Self {
        Self {
            state: HandleState::PendingCancel,
            ..self.clone()
        }
    }

    /// True if this live record already delivers exactly `desired`.
    pub fn matches(&self, desired: &DesiredReminder) -> bool {
        self.state == HandleState::Scheduled
            && self.fire_at == desired.fire_at
            && self.content == desired.content
    }
}
