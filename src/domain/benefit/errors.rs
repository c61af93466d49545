//! Benefit configuration errors.

use thiserror::Error;

use crate::domain::foundation::BenefitDefinitionId;

/// Catalog data that prevents deriving a benefit's cycle.
///
/// These are configuration errors: the affected benefit is skipped and the
/// rest of the catalog is still processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenefitConfigError {
    #[error("Benefit '{benefit}' has unrecognized period '{period}'")]
    UnrecognizedPeriod {
        benefit: BenefitDefinitionId,
        period: String,
    },

    #[error("Benefit '{benefit}' has invalid period length of {months} months")]
    InvalidPeriodMonths {
        benefit: BenefitDefinitionId,
        months: u32,
    },

    #[error("Benefit '{benefit}' resets on the card anniversary but the perk has no anchor date")]
    MissingCycleAnchor { benefit: BenefitDefinitionId },

    #[error("Cycle for benefit '{benefit}' falls outside the supported date range")]
    DateOutOfRange { benefit: BenefitDefinitionId },
}

impl BenefitConfigError {
    /// Returns the benefit the error refers to.
    pub fn benefit(&self) -> &BenefitDefinitionId {
        match self {
            BenefitConfigError::UnrecognizedPeriod { benefit, .. }
            | BenefitConfigError::InvalidPeriodMonths { benefit, .. }
            | BenefitConfigError::MissingCycleAnchor { benefit }
            | BenefitConfigError::DateOutOfRange { benefit } => benefit,
        }
    }
}
