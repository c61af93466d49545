//! ReconciliationCoordinator - serialized, coalescing reconciliation loop.
//!
//! Hosts call `trigger` whenever something that affects reminders changes.
//! Passes never overlap. Any number of triggers arriving while a pass runs
//! collapse into exactly one follow-up pass, which reads the latest
//! preferences and catalog when it starts.
//!
//! ## Graceful Shutdown
//!
//! `run` listens on a watch channel and returns after the current pass.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{watch, Mutex, Notify};

use super::reminders::{ReconcileError, ReconcileRemindersHandler, ReconcileRemindersResult};
use crate::domain::foundation::Timestamp;

/// Why a pass was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileTrigger {
    PreferenceChanged,
    PerkStatusChanged,
    AppForeground,
    DailyRollover,
}

impl fmt::Display for ReconcileTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReconcileTrigger::PreferenceChanged => "preference_changed",
            ReconcileTrigger::PerkStatusChanged => "perk_status_changed",
            ReconcileTrigger::AppForeground => "app_foreground",
            ReconcileTrigger::DailyRollover => "daily_rollover",
        };
        write!(f, "{}", s)
    }
}

/// Source of `now` for each pass.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Runs reconciliation passes one at a time.
pub struct ReconciliationCoordinator {
    handler: ReconcileRemindersHandler,
    clock: Clock,
    wake: Notify,
    // Held for the duration of a pass.
    pass_lock: Mutex<()>,
    last_trigger: StdMutex<Option<ReconcileTrigger>>,
    completed: watch::Sender<u64>,
    triggers_received: AtomicU64,
}

impl ReconciliationCoordinator {
    pub fn new(handler: ReconcileRemindersHandler) -> Self {
        Self::with_clock(handler, Arc::new(Timestamp::now))
    }

    /// Use a custom clock (tests pin `now`).
    pub fn with_clock(handler: ReconcileRemindersHandler, clock: Clock) -> Self {
        let (completed, _) = watch::channel(0);
        Self {
            handler,
            clock,
            wake: Notify::new(),
            pass_lock: Mutex::new(()),
            last_trigger: StdMutex::new(None),
            completed,
            triggers_received: AtomicU64::new(0),
        }
    }

    /// Requests a pass. Never blocks; repeated triggers coalesce.
    pub fn trigger(&self, trigger: ReconcileTrigger) {
        self.triggers_received.fetch_add(1, Ordering::Relaxed);
        *self
            .last_trigger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(trigger);
        self.wake.notify_one();
        tracing::debug!(%trigger, "Reconciliation requested");
    }

    /// Number of passes finished so far, successful or not.
    pub fn completed_passes(&self) -> u64 {
        *self.completed.borrow()
    }

    /// Watch the completed pass counter.
    pub fn subscribe_passes(&self) -> watch::Receiver<u64> {
        self.completed.subscribe()
    }

    pub fn triggers_received(&self) -> u64 {
        self.triggers_received.load(Ordering::Relaxed)
    }

    /// Runs the loop until `shutdown` flips to true or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("Reconciliation coordinator started");
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Reconciliation coordinator stopping");
                        return;
                    }
                }
                _ = self.wake.notified() => {
                    let trigger = self
                        .last_trigger
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .take();
                    if let Err(e) = self.pass(trigger).await {
                        tracing::error!(error = %e, "Reconciliation pass failed");
                    }
                }
            }
        }
    }

    /// Runs exactly one pass, waiting for any pass in progress first.
    pub async fn run_once(&self) -> Result<ReconcileRemindersResult, ReconcileError> {
        self.pass(None).await
    }

    async fn pass(
        &self,
        trigger: Option<ReconcileTrigger>,
    ) -> Result<ReconcileRemindersResult, ReconcileError> {
        let _guard = self.pass_lock.lock().await;
        let now = (self.clock)();
        let trigger = trigger.map_or_else(|| "direct".to_string(), |t| t.to_string());
        tracing::debug!(trigger = %trigger, "Starting reconciliation pass");

        let result = self.handler.handle(now).await;
        self.completed.send_modify(|count| *count += 1);

        match &result {
            Ok(outcome) => tracing::debug!(
                trigger = %trigger,
                desired = outcome.desired,
                skipped = outcome.skipped.len(),
                "Reconciliation pass finished"
            ),
            Err(e) => tracing::warn!(trigger = %trigger, error = %e, "Reconciliation pass aborted"),
        }
        result
    }
}
