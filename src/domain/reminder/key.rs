//! Logical reminder identity.
//!
//! A key is independent of the handle the platform hands back, so desired
//! and scheduled reminders can be compared across process restarts. Keys are
//! persisted as `cardId:benefitDefinitionId:cycleIdentifier:kind`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::benefit::BenefitCycle;
use crate::domain::foundation::{BenefitDefinitionId, CardId, ValidationError, KEY_SEPARATOR};

/// Errors parsing a persisted reminder key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("Reminder key '{0}' must have exactly four segments")]
    SegmentCount(String),

    #[error("Unknown reminder kind '{0}'")]
    UnknownKind(String),

    #[error("Invalid key segment: {0}")]
    InvalidSegment(#[from] ValidationError),
}

/// What a reminder is about.
///
/// Kinds that fire at several lead times carry the lead time, which keeps one
/// key per (reminder, lead-time) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReminderKind {
    Expiry { lead_days: u32 },
    Renewal { lead_days: u32 },
    ResetConfirmation,
    Digest,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::Expiry { lead_days } => write!(f, "expiry-{}", lead_days),
            ReminderKind::Renewal { lead_days } => write!(f, "renewal-{}", lead_days),
            ReminderKind::ResetConfirmation => write!(f, "resetConfirmation"),
            ReminderKind::Digest => write!(f, "digest"),
        }
    }
}

impl FromStr for ReminderKind {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || KeyParseError::UnknownKind(s.to_string());
        match s {
            "resetConfirmation" => Ok(ReminderKind::ResetConfirmation),
            "digest" => Ok(ReminderKind::Digest),
            _ => {
                let (name, days) = s.split_once('-').ok_or_else(unknown)?;
                let lead_days = days.parse::<u32>().map_err(|_| unknown())?;
                match name {
                    "expiry" => Ok(ReminderKind::Expiry { lead_days }),
                    "renewal" => Ok(ReminderKind::Renewal { lead_days }),
                    _ => Err(unknown()),
                }
            }
        }
    }
}

/// Names one cycle of whatever the reminder tracks.
///
/// `2024-03` for benefit cycles (month the cycle starts), `2025` for card
/// renewals, `2024-W09` for weekly digests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CycleIdentifier(String);

impl CycleIdentifier {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("cycle"));
        }
        if value.contains(KEY_SEPARATOR) {
            return Err(ValidationError::invalid_format(
                "cycle",
                format!("must not contain '{}'", KEY_SEPARATOR),
            ));
        }
        Ok(Self(value))
    }

    pub fn for_cycle(cycle: &BenefitCycle) -> Self {
        Self(cycle.start().format("%Y-%m").to_string())
    }

    pub fn for_renewal(renewal_date: NaiveDate) -> Self {
        Self(renewal_date.year().to_string())
    }

    pub fn for_iso_week(date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self(format!("{}-W{:02}", week.year(), week.week()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CycleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CycleIdentifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CycleIdentifier> for String {
    fn from(cycle: CycleIdentifier) -> Self {
        cycle.0
    }
}

/// Logical identity of a reminder. Two reminders with equal keys are the
/// same reminder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderKey {
    pub card_id: CardId,
    pub benefit_definition_id: BenefitDefinitionId,
    pub cycle: CycleIdentifier,
    pub kind: ReminderKind,
}

impl ReminderKey {
    pub fn new(
        card_id: CardId,
        benefit_definition_id: BenefitDefinitionId,
        cycle: CycleIdentifier,
        kind: ReminderKind,
    ) -> Self {
        Self {
            card_id,
            benefit_definition_id,
            cycle,
            kind,
        }
    }

    /// Returns true if the key belongs to this card, benefit and cycle.
    pub fn is_for(
        &self,
        card_id: &CardId,
        benefit_definition_id: &BenefitDefinitionId,
        cycle: &CycleIdentifier,
    ) -> bool {
        &self.card_id == card_id
            && &self.benefit_definition_id == benefit_definition_id
            && &self.cycle == cycle
    }
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.card_id,
            self.benefit_definition_id,
            self.cycle,
            self.kind,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for ReminderKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(KEY_SEPARATOR).collect();
        let [card, benefit, cycle, kind] = segments.as_slice() else {
            return Err(KeyParseError::SegmentCount(s.to_string()));
        };

        Ok(Self {
            card_id: CardId::new(*card)?,
            benefit_definition_id: BenefitDefinitionId::new(*benefit)?,
            cycle: CycleIdentifier::new(*cycle)?,
            kind: kind.parse()?,
        })
    }
}

impl TryFrom<String> for ReminderKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderKey> for String {
    fn from(key: ReminderKey) -> Self {
        key.to_string()
    }
}
