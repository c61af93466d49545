//! Time-of-day at which reminders fire.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Wall-clock time of day in `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    /// Used when the user has not chosen a time.
    pub const DEFAULT: ReminderTime = ReminderTime { hour: 9, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, i64::from(hour)));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range("minute", 0, 59, i64::from(minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for ReminderTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::invalid_format("reminder_time", "expected HH:MM");
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u32>().map_err(|_| invalid())?;
        let minute = minute.parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(time: ReminderTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
