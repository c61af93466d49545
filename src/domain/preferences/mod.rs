//! Preferences module - what the user wants to be reminded about, and when.

mod notification_preferences;
mod reminder_time;

pub use notification_preferences::NotificationPreferences;
pub use reminder_time::ReminderTime;
