//! In-Memory Benefit Catalog Adapter
//!
//! Holds perks, definitions and card renewals in memory. Useful for testing
//! and for hosts that keep their collection state in process.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::benefit::{CardRenewal, CatalogEntry, PerkStatus};
use crate::domain::foundation::{PerkId, StateMachine};
use crate::ports::{BenefitCatalog, CatalogError};

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryBenefitCatalog {
    entries: Arc<RwLock<Vec<CatalogEntry>>>,
    cards: Arc<RwLock<Vec<CardRenewal>>>,
}

impl InMemoryBenefitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(entries: Vec<CatalogEntry>, cards: Vec<CardRenewal>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            cards: Arc::new(RwLock::new(cards)),
        }
    }

    pub async fn add_entry(&self, entry: CatalogEntry) {
        self.entries.write().await.push(entry);
    }

    pub async fn add_card(&self, card: CardRenewal) {
        self.cards.write().await.push(card);
    }

    /// Moves a perk to `status`.
    ///
    /// Returns false if the perk is unknown or the transition is not allowed.
    pub async fn set_perk_status(&self, perk_id: &PerkId, status: PerkStatus) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|e| &e.perk.id == perk_id) else {
            return false;
        };
        match entry.perk.status.transition_to(status) {
            Ok(next) => {
                entry.perk.status = next;
                true
            }
            Err(_) => false,
        }
    }

    pub async fn remove_perk(&self, perk_id: &PerkId) {
        self.entries.write().await.retain(|e| &e.perk.id != perk_id);
    }
}

#[async_trait]
impl BenefitCatalog for InMemoryBenefitCatalog {
    async fn perks(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.entries.read().await.clone())
    }

    async fn card_renewals(&self) -> Result<Vec<CardRenewal>, CatalogError> {
        Ok(self.cards.read().await.clone())
    }
}
