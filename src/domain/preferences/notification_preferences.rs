//! User notification preferences.
//!
//! One structured value with every option enumerated. Absence rules:
//! - a lead-time array that is absent or empty suppresses that category for
//!   the period, even when the category's toggle is on
//! - an absent reminder time falls back to the configured default (09:00)

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::ReminderTime;
use crate::domain::benefit::BenefitPeriod;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub perk_expiry_reminders_enabled: bool,

    #[serde(default = "default_true")]
    pub renewal_reminders_enabled: bool,

    #[serde(default)]
    pub perk_reset_confirmation_enabled: bool,

    #[serde(default)]
    pub weekly_digest_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_perk_expiry_reminder_days: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarterly_perk_expiry_reminder_days: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semiannual_perk_expiry_reminder_days: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_perk_expiry_reminder_days: Option<Vec<u32>>,

    /// Days before a card's annual-fee renewal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_reminder_days: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perk_expiry_reminder_time: Option<ReminderTime>,

    #[serde(default = "default_digest_day")]
    pub weekly_digest_day: Weekday,
}

impl NotificationPreferences {
    /// Lead times that ship with a fresh install.
    pub fn recommended() -> Self {
        Self {
            monthly_perk_expiry_reminder_days: Some(vec![3, 1]),
            quarterly_perk_expiry_reminder_days: Some(vec![14, 3]),
            semiannual_perk_expiry_reminder_days: Some(vec![30, 7]),
            annual_perk_expiry_reminder_days: Some(vec![30, 7]),
            renewal_reminder_days: Some(vec![30]),
            ..Self::default()
        }
    }

    /// Expiry lead times for a period, sorted descending and deduplicated.
    ///
    /// Returns `None` when the category is disabled or the array is absent
    /// or empty.
    pub fn expiry_lead_days(&self, period: &BenefitPeriod) -> Option<Vec<u32>> {
        if !self.perk_expiry_reminders_enabled {
            return None;
        }
        let days = match period {
            BenefitPeriod::Monthly => &self.monthly_perk_expiry_reminder_days,
            BenefitPeriod::Quarterly => &self.quarterly_perk_expiry_reminder_days,
            BenefitPeriod::Semiannual => &self.semiannual_perk_expiry_reminder_days,
            BenefitPeriod::Annual => &self.annual_perk_expiry_reminder_days,
            BenefitPeriod::Unrecognized(_) => return None,
        };
        normalized(days.as_deref())
    }

    /// Renewal lead times, or `None` when renewal reminders are suppressed.
    pub fn renewal_lead_days(&self) -> Option<Vec<u32>> {
        if !self.renewal_reminders_enabled {
            return None;
        }
        normalized(self.renewal_reminder_days.as_deref())
    }

    /// Time of day for reminders, falling back to `default`.
    pub fn reminder_time_or(&self, default: ReminderTime) -> ReminderTime {
        self.perk_expiry_reminder_time.unwrap_or(default)
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            perk_expiry_reminders_enabled: true,
            renewal_reminders_enabled: true,
            perk_reset_confirmation_enabled: false,
            weekly_digest_enabled: false,
            monthly_perk_expiry_reminder_days: None,
            quarterly_perk_expiry_reminder_days: None,
            semiannual_perk_expiry_reminder_days: None,
            annual_perk_expiry_reminder_days: None,
            renewal_reminder_days: None,
            perk_expiry_reminder_time: None,
            weekly_digest_day: default_digest_day(),
        }
    }
}

fn normalized(days: Option<&[u32]>) -> Option<Vec<u32>> {
    let mut days = days?.to_vec();
    if days.is_empty() {
        return None;
    }
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    Some(days)
}

fn default_true() -> bool {
    true
}

fn default_digest_day() -> Weekday {
    Weekday::Mon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences_suppress_expiry_without_arrays() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.perk_expiry_reminders_enabled);
        assert_eq!(prefs.expiry_lead_days(&BenefitPeriod::Monthly), None);
    }

    #[test]
    fn empty_array_suppresses_category() {
        let prefs = NotificationPreferences {
            monthly_perk_expiry_reminder_days: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(prefs.expiry_lead_days(&BenefitPeriod::Monthly), None);
    }

    #[test]
    fn disabled_toggle_suppresses_category() {
        let prefs = NotificationPreferences {
            perk_expiry_reminders_enabled: false,
            ..NotificationPreferences::recommended()
        };
        assert_eq!(prefs.expiry_lead_days(&BenefitPeriod::Monthly), None);
    }

    #[test]
    fn lead_days_are_sorted_and_deduplicated() {
        let prefs = NotificationPreferences {
            quarterly_perk_expiry_reminder_days: Some(vec![1, 14, 3, 14]),
            ..Default::default()
        };
        assert_eq!(
            prefs.expiry_lead_days(&BenefitPeriod::Quarterly),
            Some(vec![14, 3, 1])
        );
    }

    #[test]
    fn renewal_lead_days_follow_toggle() {
        let mut prefs = NotificationPreferences::recommended();
        assert_eq!(prefs.renewal_lead_days(), Some(vec![30]));

        prefs.renewal_reminders_enabled = false;
        assert_eq!(prefs.renewal_lead_days(), None);
    }

    #[test]
    fn reminder_time_falls_back_to_default() {
        let prefs = NotificationPreferences::default();
        assert_eq!(prefs.reminder_time_or(ReminderTime::DEFAULT), ReminderTime::DEFAULT);
    }

    #[test]
    fn deserializes_app_settings_shape() {
        let json = r#"{
            "perkExpiryRemindersEnabled": true,
            "renewalRemindersEnabled": false,
            "perkResetConfirmationEnabled": true,
            "weeklyDigestEnabled": false,
            "monthlyPerkExpiryReminderDays": [3, 1],
            "perkExpiryReminderTime": "08:30"
        }"#;
        let prefs: NotificationPreferences = serde_json::from_str(json).unwrap();

        assert!(!prefs.renewal_reminders_enabled);
        assert!(prefs.perk_reset_confirmation_enabled);
        assert_eq!(prefs.monthly_perk_expiry_reminder_days, Some(vec![3, 1]));
        assert_eq!(prefs.perk_expiry_reminder_time, Some(ReminderTime::new(8, 30).unwrap()));
        assert_eq!(prefs.weekly_digest_day, Weekday::Mon);
    }

    #[test]
    fn negative_lead_time_is_rejected_at_parse() {
        let json = r#"{"monthlyPerkExpiryReminderDays": [-1]}"#;
        assert!(serde_json::from_str::<NotificationPreferences>(json).is_err());
    }
}
