//! PreferenceReader port - synchronous snapshot of notification preferences.

use crate::domain::preferences::NotificationPreferences;

/// Port for reading the user's current notification preferences.
///
/// The settings UI owns writes; the reminder engine only takes snapshots.
pub trait PreferenceReader: Send + Sync {
    fn snapshot(&self) -> NotificationPreferences;
}
