//! Benefit definitions from the catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BenefitConfigError, BenefitCycle, BenefitPeriod, ResetType};
use crate::domain::foundation::BenefitDefinitionId;

/// Longest period a catalog entry may declare.
pub const MAX_PERIOD_MONTHS: u32 = 120;

/// A recurring benefit attached to a card product.
///
/// Immutable once loaded for a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitDefinition {
    pub id: BenefitDefinitionId,
    pub name: String,
    pub period: BenefitPeriod,

    /// Overrides the month count implied by `period`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_months: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_type: Option<ResetType>,

    /// Face value of one cycle, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_cents: Option<u64>,
}

impl BenefitDefinition {
    pub fn new(id: BenefitDefinitionId, name: impl Into<String>, period: BenefitPeriod) -> Self {
        Self {
            id,
            name: name.into(),
            period,
            period_months: None,
            reset_type: None,
            value_cents: None,
        }
    }

    pub fn with_period_months(mut self, months: u32) -> Self {
        self.period_months = Some(months);
        self
    }

    pub fn with_reset_type(mut self, reset_type: ResetType) -> Self {
        self.reset_type = Some(reset_type);
        self
    }

    pub fn with_value_cents(mut self, cents: u64) -> Self {
        self.value_cents = Some(cents);
        self
    }

    /// Resolves the number of months in one cycle.
    ///
    /// `period_months` wins when present; otherwise the named period decides.
    /// An unrecognized period name is an error even with an override.
    pub fn cycle_months(&self) -> Result<u32, BenefitConfigError> {
        let default_months = self.period.default_months().ok_or_else(|| {
            BenefitConfigError::UnrecognizedPeriod {
                benefit: self.id.clone(),
                period: self.period.as_str().to_string(),
            }
        })?;
        let months = self.period_months.unwrap_or(default_months);

        if months == 0 || months > MAX_PERIOD_MONTHS {
            return Err(BenefitConfigError::InvalidPeriodMonths {
                benefit: self.id.clone(),
                months,
            });
        }
        Ok(months)
    }

    /// Effective reset alignment.
    pub fn reset_type(&self) -> ResetType {
        self.reset_type.unwrap_or_default()
    }

    /// Finds the cycle containing `date`.
    ///
    /// Calendar cycles are aligned to January 1970 so every period that
    /// divides a year starts in January; anniversary cycles are aligned to
    /// the perk's anchor date.
    pub fn cycle_containing(
        &self,
        anchor: Option<NaiveDate>,
        date: NaiveDate,
    ) -> Result<BenefitCycle, BenefitConfigError> {
        let months = self.cycle_months()?;
        let alignment = match self.reset_type() {
            ResetType::Calendar => calendar_epoch(),
            ResetType::Anniversary => anchor.ok_or_else(|| BenefitConfigError::MissingCycleAnchor {
                benefit: self.id.clone(),
            })?,
        };

        BenefitCycle::containing(alignment, months, date).ok_or_else(|| {
            BenefitConfigError::DateOutOfRange {
                benefit: self.id.clone(),
            }
        })
    }
}

fn calendar_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(period: BenefitPeriod) -> BenefitDefinition {
        BenefitDefinition::new(
            BenefitDefinitionId::new("uber-cash").unwrap(),
            "Uber Cash",
            period,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cycle_months_uses_named_period_by_default() {
        assert_eq!(definition(BenefitPeriod::Quarterly).cycle_months(), Ok(3));
    }

    #[test]
    fn period_months_overrides_named_period() {
        let def = definition(BenefitPeriod::Annual).with_period_months(24);
        assert_eq!(def.cycle_months(), Ok(24));
    }

    #[test]
    fn unrecognized_period_is_a_config_error() {
        let def = definition(BenefitPeriod::Unrecognized("weekly".to_string()));
        assert!(matches!(
            def.cycle_months(),
            Err(BenefitConfigError::UnrecognizedPeriod { .. })
        ));
    }

    #[test]
    fn unrecognized_period_with_months_override_is_still_an_error() {
        let def = definition(BenefitPeriod::Unrecognized("fortnightly".to_string()))
            .with_period_months(1);
        assert!(matches!(
            def.cycle_months(),
            Err(BenefitConfigError::UnrecognizedPeriod { .. })
        ));
    }

    #[test]
    fn zero_period_months_is_rejected() {
        let def = definition(BenefitPeriod::Monthly).with_period_months(0);
        assert!(matches!(
            def.cycle_months(),
            Err(BenefitConfigError::InvalidPeriodMonths { months: 0, .. })
        ));
    }

    #[test]
    fn anniversary_without_anchor_is_a_config_error() {
        let def = definition(BenefitPeriod::Annual).with_reset_type(ResetType::Anniversary);
        assert!(matches!(
            def.cycle_containing(None, date(2024, 5, 1)),
            Err(BenefitConfigError::MissingCycleAnchor { .. })
        ));
    }

    #[test]
    fn anniversary_cycle_uses_anchor() {
        let def = definition(BenefitPeriod::Annual).with_reset_type(ResetType::Anniversary);
        let cycle = def
            .cycle_containing(Some(date(2019, 8, 20)), date(2024, 5, 1))
            .unwrap();
        assert_eq!(cycle.start(), date(2023, 8, 20));
    }

    #[test]
    fn deserializes_catalog_shape() {
        let json = r#"{
            "id": "saks-credit",
            "name": "Saks Credit",
            "period": "semiannual",
            "resetType": "calendar",
            "valueCents": 5000
        }"#;
        let def: BenefitDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.period, BenefitPeriod::Semiannual);
        assert_eq!(def.value_cents, Some(5000));
        assert_eq!(def.cycle_months(), Ok(6));
    }
}
