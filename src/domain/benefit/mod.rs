//! Benefit module - catalog definitions, perk instances and cycles.

mod card;
mod catalog_entry;
mod cycle;
mod definition;
mod errors;
mod perk;
mod period;

pub use card::CardRenewal;
pub use catalog_entry::CatalogEntry;
pub use cycle::BenefitCycle;
pub use definition::{BenefitDefinition, MAX_PERIOD_MONTHS};
pub use errors::BenefitConfigError;
pub use perk::{PerkInstance, PerkStatus};
pub use period::{BenefitPeriod, ResetType};
