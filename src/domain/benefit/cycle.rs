//! Benefit cycle boundaries.

use chrono::{Datelike, Months, NaiveDate};

/// One instance of a benefit's period, as a half-open date range
/// `[start, next_start)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BenefitCycle {
    start: NaiveDate,
    next_start: NaiveDate,
}

impl BenefitCycle {
    /// Finds the cycle of `months` months that contains `date`.
    ///
    /// Cycle starts are computed as `anchor + k * months` from the anchor
    /// itself rather than chained from the previous start, so a day-of-month
    /// that does not exist in a shorter month clamps to that month's last day
    /// and recovers in the following cycle (Jan 31, Feb 29, Mar 31).
    ///
    /// Returns `None` for a zero-length period or dates chrono cannot represent.
    pub fn containing(anchor: NaiveDate, months: u32, date: NaiveDate) -> Option<Self> {
        if months == 0 {
            return None;
        }
        let step = i64::from(months);
        let mut index = months_between(anchor, date).div_euclid(step);

        let mut start = shift_months(anchor, index * step)?;
        if start > date {
            index -= 1;
            start = shift_months(anchor, index * step)?;
        }
        let mut next_start = shift_months(anchor, (index + 1) * step)?;
        if next_start <= date {
            index += 1;
            start = next_start;
            next_start = shift_months(anchor, (index + 1) * step)?;
        }

        Some(Self { start, next_start })
    }

    /// First day of the cycle.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day of the following cycle; the benefit resets at its midnight.
    pub fn next_start(&self) -> NaiveDate {
        self.next_start
    }

    /// Last day on which the benefit can still be used.
    pub fn last_day(&self) -> NaiveDate {
        self.next_start.pred_opt().unwrap_or(self.start)
    }

    /// Number of days in the cycle.
    pub fn length_days(&self) -> i64 {
        (self.next_start - self.start).num_days()
    }

    /// Returns true if `date` falls inside the cycle.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.next_start
    }
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month0()) - i64::from(from.month0())
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
