//! Reminder reconciliation: the dispatcher and the pass handler.

mod dispatcher;
mod reconcile_reminders;

pub use dispatcher::{DispatchError, ReconciliationReport, ReminderDispatcher};
pub use reconcile_reminders::{ReconcileError, ReconcileRemindersHandler, ReconcileRemindersResult};
