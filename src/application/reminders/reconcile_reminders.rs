//! ReconcileRemindersHandler - one full reconciliation pass.

use chrono::FixedOffset;
use std::sync::Arc;

use super::{DispatchError, ReconciliationReport, ReminderDispatcher};
use crate::domain::benefit::BenefitConfigError;
use crate::domain::foundation::Timestamp;
use crate::domain::preferences::ReminderTime;
use crate::domain::reminder::{compute_catalog_reminders, ScheduleContext};
use crate::ports::{BenefitCatalog, CatalogError, PreferenceReader};

/// Errors that abort a pass.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Result of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRemindersResult {
    /// Number of reminders the scheduler asked for.
    pub desired: usize,
    /// Benefits left out because of configuration errors.
    pub skipped: Vec<BenefitConfigError>,
    pub report: ReconciliationReport,
}

/// Snapshots preferences, reads the catalog, computes the desired set and
/// dispatches it.
pub struct ReconcileRemindersHandler {
    preferences: Arc<dyn PreferenceReader>,
    catalog: Arc<dyn BenefitCatalog>,
    dispatcher: ReminderDispatcher,
    offset: FixedOffset,
    default_time: ReminderTime,
}

impl ReconcileRemindersHandler {
    pub fn new(
        preferences: Arc<dyn PreferenceReader>,
        catalog: Arc<dyn BenefitCatalog>,
        dispatcher: ReminderDispatcher,
        offset: FixedOffset,
    ) -> Self {
        Self {
            preferences,
            catalog,
            dispatcher,
            offset,
            default_time: ReminderTime::DEFAULT,
        }
    }

    pub fn with_default_time(mut self, time: ReminderTime) -> Self {
        self.default_time = time;
        self
    }

    pub async fn handle(&self, now: Timestamp) -> Result<ReconcileRemindersResult, ReconcileError> {
        // 1. Snapshot preferences once so the whole pass sees one version
        let preferences = self.preferences.snapshot();

        // 2. Read catalog
        let entries = self.catalog.perks().await?;
        let cards = self.catalog.card_renewals().await?;

        // 3. Compute desired set
        let ctx = ScheduleContext::new(now, self.offset).with_default_time(self.default_time);
        let plan = compute_catalog_reminders(&entries, &cards, &preferences, &ctx);

        // 4. Dispatch
        let report = self.dispatcher.reconcile(&plan.desired).await?;

        Ok(ReconcileRemindersResult {
            desired: plan.desired.len(),
            skipped: plan.skipped,
            report,
        })
    }
}
