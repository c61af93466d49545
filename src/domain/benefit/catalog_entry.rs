//! A perk paired with the definition it instantiates.

use serde::{Deserialize, Serialize};

use super::{BenefitDefinition, PerkInstance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub perk: PerkInstance,
    pub definition: BenefitDefinition,
}

impl CatalogEntry {
    pub fn new(perk: PerkInstance, definition: BenefitDefinition) -> Self {
        Self { perk, definition }
    }
}
