//! Reconciliation planning.
//!
//! Diffs the desired reminder set against the persisted handle map. The
//! scheduling primitive only supports create and cancel, so a reminder whose
//! time or content changed is cancelled and created again, never updated.

use std::collections::{BTreeMap, HashMap};

use super::{DesiredReminder, HandleState, ReminderKey, ScheduledReminder};

/// Minimal set of platform calls that brings scheduled state to desired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// Handles to cancel, ordered by key.
    pub to_cancel: Vec<(ReminderKey, ScheduledReminder)>,
    /// Reminders to create, ordered by key.
    pub to_create: Vec<DesiredReminder>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.to_cancel.is_empty() && self.to_create.is_empty()
    }
}

/// Computes what to cancel and what to create.
///
/// - scheduled keys missing from `desired` are cancelled
/// - keys in both whose stored time or content differs are cancelled and
///   recreated
/// - records left `PendingCancel` by an interrupted pass are cancelled again
/// - desired reminders with no identical live record are created
///
/// Duplicate keys in `desired` collapse to the last occurrence.
pub fn plan_reconciliation(
    desired: &[DesiredReminder],
    scheduled: &HashMap<ReminderKey, ScheduledReminder>,
) -> ReconciliationPlan {
    let desired: BTreeMap<&ReminderKey, &DesiredReminder> =
        desired.iter().map(|reminder| (&reminder.key, reminder)).collect();
    let scheduled: BTreeMap<&ReminderKey, &ScheduledReminder> = scheduled.iter().collect();

    let to_cancel = scheduled
        .iter()
        .filter(|(key, record)| {
            record.state == HandleState::PendingCancel
                || desired
                    .get(*key)
                    .map_or(true, |wanted| !record.matches(wanted))
        })
        .map(|(key, record)| ((*key).clone(), (*record).clone()))
        .collect();

    let to_create = desired
        .iter()
        .filter(|(key, wanted)| {
            scheduled
                .get(*key)
                .map_or(true, |record| !record.matches(wanted))
        })
        .map(|(_, wanted)| (*wanted).clone())
        .collect();

    ReconciliationPlan {
        to_cancel,
        to_create,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BenefitDefinitionId, CardId, Timestamp};
    use crate::domain::navigation::DeepLink;
    use crate::domain::reminder::{
        CycleIdentifier, ReminderContent, ReminderKind, ScheduledHandle,
    };
    use chrono::{TimeZone, Utc};

    fn key(card: &str, lead_days: u32) -> ReminderKey {
        ReminderKey::new(
            CardId::new(card).unwrap(),
            BenefitDefinitionId::new("uber-cash").unwrap(),
            CycleIdentifier::new("2024-02").unwrap(),
            ReminderKind::Expiry { lead_days },
        )
    }

    fn desired(card: &str, lead_days: u32, day: u32) -> DesiredReminder {
        DesiredReminder {
            key: key(card, lead_days),
            fire_at: Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 2, day, 9, 0, 0).unwrap()),
            content: ReminderContent {
                title: format!("expires in {} days", lead_days),
                body: "Use it".to_string(),
                data: DeepLink::new("/(tabs)/01-dashboard"),
            },
        }
    }

    fn scheduled_from(reminders: &[DesiredReminder]) -> HashMap<ReminderKey, ScheduledReminder> {
        reminders
            .iter()
            .enumerate()
            .map(|(i, r)| {
                (
                    r.key.clone(),
                    ScheduledReminder::confirmed(ScheduledHandle::new(format!("h{}", i)), r),
                )
            })
            .collect()
    }

    #[test]
    fn empty_state_creates_everything() {
        let wanted = vec![desired("a", 3, 26), desired("a", 1, 28)];
        let plan = plan_reconciliation(&wanted, &HashMap::new());

        assert!(plan.to_cancel.is_empty());
        assert_eq!(plan.to_create.len(), 2);
    }

    #[test]
    fn identical_state_is_a_no_op() {
        let wanted = vec![desired("a", 3, 26), desired("a", 1, 28)];
        let plan = plan_reconciliation(&wanted, &scheduled_from(&wanted));

        assert!(plan.is_empty());
    }

    #[test]
    fn undesired_keys_are_cancelled() {
        let old = vec![desired("a", 3, 26), desired("a", 1, 28)];
        let wanted = vec![desired("a", 1, 28)];
        let plan = plan_reconciliation(&wanted, &scheduled_from(&old));

        assert_eq!(plan.to_cancel.len(), 1);
        assert_eq!(plan.to_cancel[0].0, key("a", 3));
        assert!(plan.to_create.is_empty());
    }

    #[test]
    fn changed_fire_time_is_cancelled_and_recreated() {
        let old = vec![desired("a", 1, 28)];
        let mut moved = desired("a", 1, 28);
        moved.fire_at = moved.fire_at.add_days(-1);
        let plan = plan_reconciliation(&[moved.clone()], &scheduled_from(&old));

        assert_eq!(plan.to_cancel.len(), 1);
        assert_eq!(plan.to_create, vec![moved]);
    }

    #[test]
    fn changed_content_is_cancelled_and_recreated() {
        let old = vec![desired("a", 1, 28)];
        let mut reworded = desired("a", 1, 28);
        reworded.content.body = "You still have $5.00 left".to_string();
        let plan = plan_reconciliation(&[reworded], &scheduled_from(&old));

        assert_eq!(plan.to_cancel.len(), 1);
        assert_eq!(plan.to_create.len(), 1);
    }

    #[test]
    fn pending_cancel_records_are_always_cancelled() {
        let wanted = vec![desired("a", 1, 28)];
        let mut scheduled = scheduled_from(&wanted);
        for record in scheduled.values_mut() {
            *record = record.pending_cancel();
        }
        let plan = plan_reconciliation(&wanted, &scheduled);

        assert_eq!(plan.to_cancel.len(), 1);
        assert_eq!(plan.to_create.len(), 1);
    }

    #[test]
    fn duplicate_desired_keys_collapse() {
        let wanted = vec![desired("a", 1, 27), desired("a", 1, 28)];
        let plan = plan_reconciliation(&wanted, &HashMap::new());

        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_create[0].fire_at, desired("a", 1, 28).fire_at);
    }

    #[test]
    fn plans_are_ordered_by_key() {
        let wanted = vec![desired("c", 1, 28), desired("a", 1, 28), desired("b", 1, 28)];
        let plan = plan_reconciliation(&wanted, &HashMap::new());

        let cards: Vec<&str> = plan.to_create.iter().map(|r| r.key.card_id.as_str()).collect();
        assert_eq!(cards, vec!["a", "b", "c"]);
    }
}
