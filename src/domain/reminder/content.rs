//! Reminder content and user-facing wording.

use serde::{Deserialize, Serialize};

use crate::domain::navigation::DeepLink;

/// What the notification shows, and where tapping it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
    pub data: DeepLink,
}

/// "1 day" / "3 days". The dashboard banner renders the same count.
pub fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// "today" / "in 1 day" / "in 3 days".
pub fn days_remaining_phrase(days: u32) -> String {
    match days {
        0 => "today".to_string(),
        n => format!("in {}", days_label(n)),
    }
}

/// Formats cents as dollars, e.g. `1550` as `$15.50`.
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
