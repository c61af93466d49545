//! YAML Snapshot Adapter
//!
//! Reads the user's collection (preferences, benefit definitions, perks and
//! card renewals) from one YAML document. Serves both the BenefitCatalog and
//! PreferenceReader ports, which is what the CLI runs against.
//!
//! ```yaml
//! preferences:
//!   monthlyPerkExpiryReminderDays: [3, 1]
//!   perkExpiryReminderTime: "08:30"
//! definitions:
//!   - id: uber-cash
//!     name: Uber Cash
//!     period: monthly
//!     valueCents: 1500
//! perks:
//!   - id: perk-1
//!     cardId: amex-plat
//!     benefitDefinitionId: uber-cash
//! cards:
//!   - cardId: amex-plat
//!     cardName: Platinum Card
//!     renewalDate: 2026-09-01
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

use crate::domain::benefit::{BenefitDefinition, CardRenewal, CatalogEntry, PerkInstance};
use crate::domain::preferences::NotificationPreferences;
use crate::ports::{BenefitCatalog, CatalogError, PreferenceReader};

/// The on-disk document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub preferences: NotificationPreferences,
    #[serde(default)]
    pub definitions: Vec<BenefitDefinition>,
    #[serde(default)]
    pub perks: Vec<PerkInstance>,
    #[serde(default)]
    pub cards: Vec<CardRenewal>,
}

impl Snapshot {
    /// Pairs each perk with its definition.
    ///
    /// A perk whose definition is missing cannot be scheduled; it is logged
    /// and left out.
    pub fn catalog_entries(&self) -> Vec<CatalogEntry> {
        let definitions: HashMap<_, _> = self.definitions.iter().map(|d| (&d.id, d)).collect();

        self.perks
            .iter()
            .filter_map(|perk| match definitions.get(&perk.benefit_definition_id) {
                Some(definition) => Some(CatalogEntry::new(perk.clone(), (*definition).clone())),
                None => {
                    tracing::warn!(
                        perk = %perk.id,
                        benefit = %perk.benefit_definition_id,
                        "Perk references unknown benefit definition"
                    );
                    None
                }
            })
            .collect()
    }
}

/// Catalog and preferences loaded from a YAML snapshot
#[derive(Debug, Clone)]
pub struct YamlSnapshot {
    snapshot: Snapshot,
}

impl YamlSnapshot {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let snapshot =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Ok(Self { snapshot })
    }

    /// Load a snapshot file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn document(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl From<Snapshot> for YamlSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl BenefitCatalog for YamlSnapshot {
    async fn perks(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.snapshot.catalog_entries())
    }

    async fn card_renewals(&self) -> Result<Vec<CardRenewal>, CatalogError> {
        Ok(self.snapshot.cards.clone())
    }
}

impl PreferenceReader for YamlSnapshot {
    fn snapshot(&self) -> NotificationPreferences {
        self.snapshot.preferences.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benefit::{BenefitPeriod, PerkStatus};
    use crate::domain::preferences::ReminderTime;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const DOC: &str = r#"
preferences:
  monthlyPerkExpiryReminderDays: [3, 1]
  perkExpiryReminderTime: "08:30"
  weeklyDigestEnabled: true
definitions:
  - id: uber-cash
    name: Uber Cash
    period: monthly
    valueCents: 1500
  - id: airline-fee
    name: Airline Fee Credit
    period: annual
perks:
  - id: perk-1
    cardId: amex-plat
    benefitDefinitionId: uber-cash
    remainingValue: 1500
  - id: perk-2
    cardId: amex-plat
    benefitDefinitionId: airline-fee
    status: used
  - id: perk-3
    cardId: amex-plat
    benefitDefinitionId: missing
cards:
  - cardId: amex-plat
    cardName: Platinum Card
    renewalDate: 2026-09-01
    annualFee: 69500
"#;

    #[tokio::test]
    async fn parses_full_document() {
        let snapshot = YamlSnapshot::from_yaml_str(DOC).unwrap();

        let prefs = PreferenceReader::snapshot(&snapshot);
        assert_eq!(prefs.monthly_perk_expiry_reminder_days, Some(vec![3, 1]));
        assert_eq!(prefs.perk_expiry_reminder_time, Some(ReminderTime::new(8, 30).unwrap()));
        assert!(prefs.weekly_digest_enabled);

        let cards = snapshot.card_renewals().await.unwrap();
        assert_eq!(cards[0].renewal_date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(cards[0].annual_fee, Some(69500));
    }

    #[tokio::test]
    async fn perks_join_definitions_and_skip_unknown() {
        let snapshot = YamlSnapshot::from_yaml_str(DOC).unwrap();

        let entries = snapshot.perks().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].definition.period, BenefitPeriod::Monthly);
        assert_eq!(entries[1].perk.status, PerkStatus::Used);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let snapshot = YamlSnapshot::from_yaml_str("{}").unwrap();
        assert!(snapshot.document().perks.is_empty());
        assert!(snapshot.document().preferences.perk_expiry_reminders_enabled);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let result = YamlSnapshot::from_yaml_str("perks: [ {");
        assert!(matches!(result, Err(CatalogError::ParseFailed(_))));
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.yaml");
        std::fs::write(&path, DOC).unwrap();

        let snapshot = YamlSnapshot::load(&path).await.unwrap();

        assert_eq!(snapshot.document().definitions.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let result = YamlSnapshot::load(dir.path().join("absent.yaml")).await;
        assert!(matches!(result, Err(CatalogError::Unavailable(_))));
    }
}
