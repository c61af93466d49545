//! ReminderDispatcher - applies a reconciliation plan to the platform.
//!
//! Cancellations run before creations so the platform's pending limit is
//! never exceeded transiently. Progress is committed to the handle store one
//! key at a time:
//!
//! 1. cancel: persist `PendingCancel` → cancel (retry once) → remove record
//! 2. create: create (retry once) → persist `Scheduled` record
//!
//! A record is only ever written as `Scheduled` after the platform confirmed
//! the handle, and a handle is only cancelled after its record was marked
//! `PendingCancel`, so an interrupted pass never leaves a live-looking record
//! for a dead handle.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::domain::reminder::{
    plan_reconciliation, DesiredReminder, HandleState, ReminderKey, ScheduledHandle,
    ScheduledReminder,
};
use crate::ports::{
    HandleStore, HandleStoreError, NotificationContent, NotificationScheduler, NotificationTrigger,
    SchedulingError,
};

/// Errors that abort a reconciliation pass.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to load handle map: {0}")]
    Load(#[source] HandleStoreError),

    #[error("Failed to persist handle for {key}: {source}")]
    Persistence {
        key: ReminderKey,
        #[source]
        source: HandleStoreError,
    },
}

/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub created: usize,
    pub cancelled: usize,
    /// Desired reminders already scheduled identically.
    pub unchanged: usize,
    /// Keys whose create failed twice; absent from the store until a later pass.
    pub failed_creates: Vec<ReminderKey>,
    /// Keys whose cancel failed twice; left `PendingCancel` in the store.
    pub failed_cancels: Vec<ReminderKey>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.failed_creates.is_empty() && self.failed_cancels.is_empty()
    }
}

/// Diffs desired reminders against the handle store and issues the platform
/// calls that close the gap.
pub struct ReminderDispatcher {
    scheduler: Arc<dyn NotificationScheduler>,
    store: Arc<dyn HandleStore>,
    channel: Option<String>,
}

impl ReminderDispatcher {
    pub fn new(scheduler: Arc<dyn NotificationScheduler>, store: Arc<dyn HandleStore>) -> Self {
        Self {
            scheduler,
            store,
            channel: None,
        }
    }

    /// Notification channel passed along with every trigger.
    pub fn with_channel(mut self, channel: Option<String>) -> Self {
        self.channel = channel;
        self
    }

    /// Brings the scheduled set in line with `desired`.
    ///
    /// # Errors
    ///
    /// Store failures abort the pass. Scheduling failures do not; they are
    /// counted in the report and retried by the next pass.
    pub async fn reconcile(
        &self,
        desired: &[DesiredReminder],
    ) -> Result<ReconciliationReport, DispatchError> {
        let scheduled = self.store.load_all().await.map_err(DispatchError::Load)?;
        let plan = plan_reconciliation(desired, &scheduled);

        let desired_keys: BTreeSet<&ReminderKey> = desired.iter().map(|r| &r.key).collect();
        let mut report = ReconciliationReport {
            unchanged: desired_keys.len() - plan.to_create.len(),
            ..ReconciliationReport::default()
        };

        if plan.is_empty() {
            tracing::debug!(unchanged = report.unchanged, "Reminders already up to date");
            return Ok(report);
        }

        let mut still_pending: HashSet<ReminderKey> = HashSet::new();

        for (key, record) in &plan.to_cancel {
            if self.cancel_one(key, record).await? {
                report.cancelled += 1;
            } else {
                report.failed_cancels.push(key.clone());
                still_pending.insert(key.clone());
            }
        }

        for reminder in &plan.to_create {
            if still_pending.contains(&reminder.key) {
                tracing::debug!(key = %reminder.key, "Deferring create until stale handle is cancelled");
                report.failed_creates.push(reminder.key.clone());
                continue;
            }
            if self.create_one(reminder).await? {
                report.created += 1;
            } else {
                report.failed_creates.push(reminder.key.clone());
            }
        }

        tracing::info!(
            created = report.created,
            cancelled = report.cancelled,
            unchanged = report.unchanged,
            failed_creates = report.failed_creates.len(),
            failed_cancels = report.failed_cancels.len(),
            "Reconciliation pass complete"
        );

        Ok(report)
    }

    /// Returns false if the platform refused the cancel twice.
    async fn cancel_one(
        &self,
        key: &ReminderKey,
        record: &ScheduledReminder,
    ) -> Result<bool, DispatchError> {
        if record.state != HandleState::PendingCancel {
            self.store
                .put(key, &record.pending_cancel())
                .await
                .map_err(|source| persistence(key, source))?;
        }

        match self.cancel_with_retry(&record.handle).await {
            Ok(()) => {
                self.store
                    .remove(key)
                    .await
                    .map_err(|source| persistence(key, source))?;
                tracing::debug!(key = %key, handle = %record.handle, "Cancelled reminder");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    handle = %record.handle,
                    error = %e,
                    "Cancel failed after retry, left pending"
                );
                Ok(false)
            }
        }
    }

    /// Returns false if the platform refused the create twice.
    async fn create_one(&self, reminder: &DesiredReminder) -> Result<bool, DispatchError> {
        let content = NotificationContent::from_reminder(reminder);
        let trigger = NotificationTrigger::at(reminder.fire_at).with_channel(self.channel.clone());

        let handle = match self.create_with_retry(&content, &trigger).await {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(key = %reminder.key, error = %e, "Create failed after retry");
                return Ok(false);
            }
        };

        let record = ScheduledReminder::confirmed(handle.clone(), reminder);
        if let Err(source) = self.store.put(&reminder.key, &record).await {
            // Nothing references the handle, so take it back off the platform.
            if let Err(e) = self.scheduler.cancel(&handle).await {
                tracing::error!(
                    key = %reminder.key,
                    handle = %handle,
                    error = %e,
                    "Failed to cancel unpersisted handle"
                );
            }
            return Err(persistence(&reminder.key, source));
        }

        tracing::debug!(
            key = %reminder.key,
            handle = %handle,
            fire_at = %reminder.fire_at.as_datetime(),
            "Scheduled reminder"
        );
        Ok(true)
    }

    async fn create_with_retry(
        &self,
        content: &NotificationContent,
        trigger: &NotificationTrigger,
    ) -> Result<ScheduledHandle, SchedulingError> {
        match self.scheduler.create(content, trigger).await {
            Ok(handle) => Ok(handle),
            Err(e) => {
                tracing::debug!(error = %e, "Create failed, retrying once");
                self.scheduler.create(content, trigger).await
            }
        }
    }

    async fn cancel_with_retry(&self, handle: &ScheduledHandle) -> Result<(), SchedulingError> {
        match self.scheduler.cancel(handle).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(handle = %handle, error = %e, "Cancel failed, retrying once");
                self.scheduler.cancel(handle).await
            }
        }
    }
}

fn persistence(key: &ReminderKey, source: HandleStoreError) -> DispatchError {
    DispatchError::Persistence {
        key: key.clone(),
        source,
    }
}
