//! Application layer - orchestration over the ports.
//!
//! - `reminders` - dispatcher and the per-pass handler
//! - `coordinator` - serialized, coalescing trigger loop
//! - `notification_listener` - delivered notification → navigation

pub mod coordinator;
pub mod notification_listener;
pub mod reminders;

pub use coordinator::{Clock, ReconcileTrigger, ReconciliationCoordinator};
pub use notification_listener::NotificationListener;
pub use reminders::{
    DispatchError, ReconcileError, ReconcileRemindersHandler, ReconcileRemindersResult,
    ReconciliationReport, ReminderDispatcher,
};
