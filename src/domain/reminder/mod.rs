//! Reminder module - reminder identity, the scheduler that decides which
//! reminders should exist, and the planner that diffs them against what the
//! platform has scheduled.

mod content;
mod key;
mod reconcile;
mod records;
mod scheduler;

pub use content::{days_label, days_remaining_phrase, format_cents, ReminderContent};
pub use key::{CycleIdentifier, KeyParseError, ReminderKey, ReminderKind};
pub use reconcile::{plan_reconciliation, ReconciliationPlan};
pub use records::{DesiredReminder, HandleState, ScheduledHandle, ScheduledReminder};
pub use scheduler::{
    compute_catalog_reminders, compute_desired_reminders, compute_digest_reminder,
    compute_renewal_reminders, CatalogPlan, ScheduleContext,
};
