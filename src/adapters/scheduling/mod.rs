//! Scheduling Adapters
//!
//! Implementations of the NotificationScheduler port.
//!
//! - **InMemoryNotificationScheduler** - pending notifications kept in memory
//!   (testing/development, and the CLI's dry run)

mod in_memory_notification_scheduler;

pub use in_memory_notification_scheduler::{InMemoryNotificationScheduler, PendingNotification};
