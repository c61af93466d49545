//! Benefit period and reset alignment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a benefit's value resets.
///
/// Unknown period names are preserved as `Unrecognized` instead of failing
/// deserialization, so a single bad catalog row only skips that benefit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BenefitPeriod {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
    Unrecognized(String),
}

impl BenefitPeriod {
    /// Number of months in one cycle for a recognized period.
    pub fn default_months(&self) -> Option<u32> {
        match self {
            BenefitPeriod::Monthly => Some(1),
            BenefitPeriod::Quarterly => Some(3),
            BenefitPeriod::Semiannual => Some(6),
            BenefitPeriod::Annual => Some(12),
            BenefitPeriod::Unrecognized(_) => None,
        }
    }

    /// Returns the catalog name of the period.
    pub fn as_str(&self) -> &str {
        match self {
            BenefitPeriod::Monthly => "monthly",
            BenefitPeriod::Quarterly => "quarterly",
            BenefitPeriod::Semiannual => "semiannual",
            BenefitPeriod::Annual => "annual",
            BenefitPeriod::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for BenefitPeriod {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "monthly" => BenefitPeriod::Monthly,
            "quarterly" => BenefitPeriod::Quarterly,
            "semiannual" | "semi_annual" | "semi-annual" => BenefitPeriod::Semiannual,
            "annual" | "annually" | "yearly" => BenefitPeriod::Annual,
            _ => BenefitPeriod::Unrecognized(raw),
        }
    }
}

impl From<BenefitPeriod> for String {
    fn from(period: BenefitPeriod) -> Self {
        period.as_str().to_string()
    }
}

impl fmt::Display for BenefitPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a benefit's cycles are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetType {
    /// Cycles start on calendar month boundaries (January-aligned).
    #[default]
    Calendar,
    /// Cycles start on the card's anniversary day-of-month.
    Anniversary,
}
