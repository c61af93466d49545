//! Reminder scheduler.
//!
//! Pure functions that decide which reminders should exist right now for a
//! perk, a card renewal, or the weekly digest. Nothing here talks to the
//! platform; the dispatcher diffs the output against what is scheduled.

use chrono::{Datelike, Days, FixedOffset, Months, NaiveDate};

use super::content::{days_remaining_phrase, format_cents};
use super::{CycleIdentifier, DesiredReminder, ReminderContent, ReminderKey, ReminderKind};
use crate::domain::benefit::{
    BenefitConfigError, BenefitDefinition, CardRenewal, CatalogEntry, PerkInstance,
};
use crate::domain::foundation::{BenefitDefinitionId, CardId, Timestamp};
use crate::domain::navigation::{
    DeepLink, CARD_ID_PARAM, DASHBOARD_SCREEN, INSIGHTS_SCREEN, SHOW_RENEWAL_INFO_PARAM,
};
use crate::domain::preferences::{NotificationPreferences, ReminderTime};

/// The clock and calendar a scheduling pass runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleContext {
    pub now: Timestamp,
    /// Offset of the user's local time from UTC.
    pub offset: FixedOffset,
    /// Used when the user has not picked a reminder time.
    pub default_time: ReminderTime,
}

impl ScheduleContext {
    pub fn new(now: Timestamp, offset: FixedOffset) -> Self {
        Self {
            now,
            offset,
            default_time: ReminderTime::DEFAULT,
        }
    }

    pub fn with_default_time(mut self, time: ReminderTime) -> Self {
        self.default_time = time;
        self
    }

    /// Local calendar date of `now`.
    pub fn today(&self) -> NaiveDate {
        self.now.local_date(self.offset)
    }

    fn instant(&self, date: NaiveDate, time: ReminderTime) -> Timestamp {
        Timestamp::from_local(date.and_time(time.as_naive_time()), self.offset)
    }

    fn is_future(&self, instant: &Timestamp) -> bool {
        instant.is_after(&self.now)
    }
}

/// Output of a whole-catalog scheduling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPlan {
    pub desired: Vec<DesiredReminder>,
    /// Benefits left out because of configuration errors.
    pub skipped: Vec<BenefitConfigError>,
}

/// Reminders that should exist for one perk.
///
/// Expiry reminders fire `d` days before the last day of the current cycle
/// for every lead time `d` configured for the benefit's period, at the
/// user's reminder time. Instants that are not strictly in the future, or
/// that would fall before the cycle starts, are dropped. Only `available`
/// perks get expiry reminders.
///
/// The reset confirmation is keyed to the *next* cycle, so marking the perk
/// used does not cancel it.
///
/// # Errors
///
/// Returns `BenefitConfigError` when the definition's period cannot be
/// resolved into a cycle.
pub fn compute_desired_reminders(
    perk: &PerkInstance,
    definition: &BenefitDefinition,
    preferences: &NotificationPreferences,
    ctx: &ScheduleContext,
) -> Result<Vec<DesiredReminder>, BenefitConfigError> {
    let cycle = definition.cycle_containing(perk.cycle_anchor, ctx.today())?;
    let time = preferences.reminder_time_or(ctx.default_time);
    let mut reminders = Vec::new();

    if perk.is_available() {
        if let Some(lead_days) = preferences.expiry_lead_days(&definition.period) {
            let cycle_id = CycleIdentifier::for_cycle(&cycle);

            for days in lead_days {
                let Some(fire_date) = cycle.last_day().checked_sub_days(Days::new(u64::from(days)))
                else {
                    continue;
                };
                if fire_date < cycle.start() {
                    tracing::debug!(
                        benefit = %definition.id,
                        lead_days = days,
                        cycle_days = cycle.length_days(),
                        "Lead time exceeds cycle length"
                    );
                    continue;
                }

                let fire_at = ctx.instant(fire_date, time);
                if !ctx.is_future(&fire_at) {
                    continue;
                }

                reminders.push(DesiredReminder {
                    key: ReminderKey::new(
                        perk.card_id.clone(),
                        perk.benefit_definition_id.clone(),
                        cycle_id.clone(),
                        ReminderKind::Expiry { lead_days: days },
                    ),
                    fire_at,
                    content: expiry_content(perk, definition, days),
                });
            }
        }
    }

    if preferences.perk_reset_confirmation_enabled {
        let next_cycle = definition.cycle_containing(perk.cycle_anchor, cycle.next_start())?;
        let fire_at = ctx.instant(next_cycle.start(), time);

        if ctx.is_future(&fire_at) {
            reminders.push(DesiredReminder {
                key: ReminderKey::new(
                    perk.card_id.clone(),
                    perk.benefit_definition_id.clone(),
                    CycleIdentifier::for_cycle(&next_cycle),
                    ReminderKind::ResetConfirmation,
                ),
                fire_at,
                content: reset_content(perk, definition),
            });
        }
    }

    Ok(reminders)
}

/// Reminders ahead of a card's annual-fee renewal.
///
/// A renewal date already in the past is rolled forward by whole years.
pub fn compute_renewal_reminders(
    card: &CardRenewal,
    preferences: &NotificationPreferences,
    ctx: &ScheduleContext,
) -> Vec<DesiredReminder> {
    let Some(lead_days) = preferences.renewal_lead_days() else {
        return Vec::new();
    };
    let Some(renewal) = next_renewal_on_or_after(card.renewal_date, ctx.today()) else {
        return Vec::new();
    };
    let previous_renewal = renewal.checked_sub_months(Months::new(12));
    let cycle_id = CycleIdentifier::for_renewal(renewal);
    let time = preferences.reminder_time_or(ctx.default_time);

    lead_days
        .into_iter()
        .filter_map(|days| {
            let fire_date = renewal.checked_sub_days(Days::new(u64::from(days)))?;
            if previous_renewal.is_some_and(|previous| fire_date < previous) {
                return None;
            }
            let fire_at = ctx.instant(fire_date, time);
            ctx.is_future(&fire_at).then(|| DesiredReminder {
                key: ReminderKey::new(
                    card.card_id.clone(),
                    BenefitDefinitionId::any(),
                    cycle_id.clone(),
                    ReminderKind::Renewal { lead_days: days },
                ),
                fire_at,
                content: renewal_content(card, renewal, days),
            })
        })
        .collect()
}

/// The weekly digest, on the next configured weekday still ahead of `now`.
pub fn compute_digest_reminder(
    entries: &[CatalogEntry],
    preferences: &NotificationPreferences,
    ctx: &ScheduleContext,
) -> Option<DesiredReminder> {
    if !preferences.weekly_digest_enabled {
        return None;
    }
    let time = preferences.reminder_time_or(ctx.default_time);
    let today = ctx.today();

    let fire_date = (0..=7)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .find(|date| {
            date.weekday() == preferences.weekly_digest_day
                && ctx.is_future(&ctx.instant(*date, time))
        })?;

    Some(DesiredReminder {
        key: ReminderKey::new(
            CardId::any(),
            BenefitDefinitionId::any(),
            CycleIdentifier::for_iso_week(fire_date),
            ReminderKind::Digest,
        ),
        fire_at: ctx.instant(fire_date, time),
        content: digest_content(entries),
    })
}

/// Runs every scheduler over the catalog.
///
/// A benefit with a configuration error is skipped with a warning; the rest
/// of the catalog is still scheduled.
pub fn compute_catalog_reminders(
    entries: &[CatalogEntry],
    cards: &[CardRenewal],
    preferences: &NotificationPreferences,
    ctx: &ScheduleContext,
) -> CatalogPlan {
    let mut plan = CatalogPlan::default();

    for entry in entries {
        match compute_desired_reminders(&entry.perk, &entry.definition, preferences, ctx) {
            Ok(reminders) => plan.desired.extend(reminders),
            Err(e) => {
                tracing::warn!(
                    benefit = %e.benefit(),
                    perk = %entry.perk.id,
                    error = %e,
                    "Skipping benefit with invalid configuration"
                );
                plan.skipped.push(e);
            }
        }
    }

    for card in cards {
        plan.desired.extend(compute_renewal_reminders(card, preferences, ctx));
    }

    plan.desired.extend(compute_digest_reminder(entries, preferences, ctx));

    plan
}

fn next_renewal_on_or_after(renewal_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    if renewal_date >= today {
        return Some(renewal_date);
    }
    let years_behind = u32::try_from(today.year() - renewal_date.year()).ok()?;
    let candidate = renewal_date.checked_add_months(Months::new(years_behind * 12))?;
    if candidate >= today {
        Some(candidate)
    } else {
        renewal_date.checked_add_months(Months::new((years_behind + 1) * 12))
    }
}

fn perk_link(perk: &PerkInstance) -> DeepLink {
    DeepLink::new(DASHBOARD_SCREEN).with_param(CARD_ID_PARAM, perk.card_id.as_str())
}

fn expiry_content(
    perk: &PerkInstance,
    definition: &BenefitDefinition,
    days: u32,
) -> ReminderContent {
    let body = match perk.remaining_value.or(definition.value_cents) {
        Some(cents) if cents > 0 => format!(
            "You still have {} left. Use it before it resets.",
            format_cents(cents)
        ),
        _ => "Use it before it resets.".to_string(),
    };

    ReminderContent {
        title: format!("{} expires {}", definition.name, days_remaining_phrase(days)),
        body,
        data: perk_link(perk),
    }
}

fn reset_content(perk: &PerkInstance, definition: &BenefitDefinition) -> ReminderContent {
    ReminderContent {
        title: format!("{} has reset", definition.name),
        body: format!(
            "Your {} is available again for the new cycle.",
            definition.name
        ),
        data: perk_link(perk),
    }
}

fn renewal_content(card: &CardRenewal, renewal: NaiveDate, days: u32) -> ReminderContent {
    let fee = card
        .annual_fee
        .map(|cents| format!("The {} annual fee posts", format_cents(cents)))
        .unwrap_or_else(|| "Your card renews".to_string());

    ReminderContent {
        title: format!("{} renews {}", card.card_name, days_remaining_phrase(days)),
        body: format!(
            "{} on {}. Check whether the card still pays for itself.",
            fee,
            renewal.format("%B %-d")
        ),
        data: DeepLink::new(INSIGHTS_SCREEN)
            .with_param(CARD_ID_PARAM, card.card_id.as_str())
            .with_param(SHOW_RENEWAL_INFO_PARAM, "true"),
    }
}

fn digest_content(entries: &[CatalogEntry]) -> ReminderContent {
    let available: Vec<&CatalogEntry> = entries.iter().filter(|e| e.perk.is_available()).collect();
    let value: u64 = available
        .iter()
        .filter_map(|e| e.perk.remaining_value.or(e.definition.value_cents))
        .fold(0u64, u64::saturating_add);

    let body = match available.len() {
        0 => "Every perk is used for this cycle. Nice work!".to_string(),
        1 => format!("1 perk is still available, worth {}.", format_cents(value)),
        n => format!("{} perks are still available, worth {}.", n, format_cents(value)),
    };

    ReminderContent {
        title: "Your weekly perk digest".to_string(),
        body,
        data: DeepLink::new(DASHBOARD_SCREEN),
    }
}
