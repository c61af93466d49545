//! Catalog Adapters
//!
//! Implementations of the BenefitCatalog port.
//!
//! - **InMemoryBenefitCatalog** - perks and cards held in memory
//! - **YamlSnapshot** - perks, cards and preferences read from a YAML file

mod in_memory_benefit_catalog;
mod yaml_snapshot;

pub use in_memory_benefit_catalog::InMemoryBenefitCatalog;
pub use yaml_snapshot::{Snapshot, YamlSnapshot};
