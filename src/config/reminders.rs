//! Reminder scheduling configuration

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::preferences::ReminderTime;

/// Largest offset any real time zone uses.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Reminder scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemindersConfig {
    /// Time of day (HH:MM) used when the user has not picked one
    #[serde(default = "default_reminder_time")]
    pub default_reminder_time: String,

    /// Offset of the user's local time from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Platform notification channel, if the platform uses channels
    pub notification_channel: Option<String>,

    /// Pending notification limit of the platform
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

impl RemindersConfig {
    pub fn default_time(&self) -> Result<ReminderTime, ValidationError> {
        self.default_reminder_time
            .parse()
            .map_err(|_| ValidationError::InvalidReminderTime(self.default_reminder_time.clone()))
    }

    pub fn offset(&self) -> Result<FixedOffset, ValidationError> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or(ValidationError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    /// Validate reminder configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default_time()?;
        self.offset()?;
        if self.max_pending == 0 {
            return Err(ValidationError::InvalidMaxPending);
        }
        Ok(())
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            default_reminder_time: default_reminder_time(),
            utc_offset_minutes: 0,
            notification_channel: None,
            max_pending: default_max_pending(),
        }
    }
}

fn default_reminder_time() -> String {
    "09:00".to_string()
}

fn default_max_pending() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RemindersConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_time().unwrap(), ReminderTime::DEFAULT);
    }

    #[test]
    fn negative_offset_west_of_utc() {
        let config = RemindersConfig {
            utc_offset_minutes: -300,
            ..Default::default()
        };
        assert_eq!(config.offset().unwrap().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn rejects_offset_beyond_fourteen_hours() {
        let config = RemindersConfig {
            utc_offset_minutes: 15 * 60,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset(900)));
    }

    #[test]
    fn rejects_malformed_time() {
        let config = RemindersConfig {
            default_reminder_time: "9am".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidReminderTime(_))
        ));
    }

    #[test]
    fn rejects_zero_max_pending() {
        let config = RemindersConfig {
            max_pending: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxPending));
    }
}
