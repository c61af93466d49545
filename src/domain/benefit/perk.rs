//! Per-user perk instances and their lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BenefitDefinitionId, CardId, PerkId, StateMachine, ValidationError,
};

/// Lifecycle status of a perk within its current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerkStatus {
    #[default]
    Available,
    Used,
    Expired,
}

impl StateMachine for PerkStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PerkStatus::*;
        matches!(
            (self, target),
            (Available, Used) | (Available, Expired) | (Used, Available) | (Expired, Available)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PerkStatus::*;
        match self {
            Available => vec![Used, Expired],
            Used => vec![Available],
            Expired => vec![Available],
        }
    }
}

/// A user's instance of a benefit on one card, for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerkInstance {
    pub id: PerkId,
    pub card_id: CardId,
    pub benefit_definition_id: BenefitDefinitionId,

    #[serde(default)]
    pub status: PerkStatus,

    /// Consecutive cycles in which the perk was used.
    #[serde(default)]
    pub streak_count: u32,

    /// Consecutive cycles in which the perk expired unused.
    #[serde(default)]
    pub cold_streak_count: u32,

    /// Value left this cycle, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_value: Option<u64>,

    /// Card anniversary used by anniversary-reset benefits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_anchor: Option<NaiveDate>,
}

impl PerkInstance {
    pub fn new(id: PerkId, card_id: CardId, benefit_definition_id: BenefitDefinitionId) -> Self {
        Self {
            id,
            card_id,
            benefit_definition_id,
            status: PerkStatus::Available,
            streak_count: 0,
            cold_streak_count: 0,
            remaining_value: None,
            cycle_anchor: None,
        }
    }

    pub fn with_remaining_value(mut self, cents: u64) -> Self {
        self.remaining_value = Some(cents);
        self
    }

    pub fn with_cycle_anchor(mut self, anchor: NaiveDate) -> Self {
        self.cycle_anchor = Some(anchor);
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == PerkStatus::Available
    }

    /// Marks the perk as used for the current cycle.
    pub fn mark_used(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(PerkStatus::Used)?;
        self.remaining_value = Some(0);
        Ok(())
    }

    /// Marks the perk as expired unused at the end of its cycle.
    pub fn expire(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(PerkStatus::Expired)?;
        Ok(())
    }

    /// Starts a new cycle, updating the streak counters from the closing one.
    ///
    /// A perk still `available` at rollover is expired first.
    pub fn roll_over(&mut self, reset_value: Option<u64>) -> Result<(), ValidationError> {
        if self.status == PerkStatus::Available {
            self.expire()?;
        }

        match self.status {
            PerkStatus::Used => {
                self.streak_count = self.streak_count.saturating_add(1);
                self.cold_streak_count = 0;
            }
            PerkStatus::Expired => {
                self.cold_streak_count = self.cold_streak_count.saturating_add(1);
                self.streak_count = 0;
            }
            PerkStatus::Available => {}
        }

        self.status = self.status.transition_to(PerkStatus::Available)?;
        self.remaining_value = reset_value;
        Ok(())
    }
}
