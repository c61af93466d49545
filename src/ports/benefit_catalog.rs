//! BenefitCatalog port - the user's perks and cards.

use async_trait::async_trait;

use crate::domain::benefit::{CardRenewal, CatalogEntry};

/// Errors reading the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),
}

/// Port for reading active perks with their definitions.
#[async_trait]
pub trait BenefitCatalog: Send + Sync {
    /// Every perk instance in the user's collection, paired with its definition.
    async fn perks(&self) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Annual-fee renewal dates of the user's cards.
    async fn card_renewals(&self) -> Result<Vec<CardRenewal>, CatalogError>;
}
