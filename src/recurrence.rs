use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::clock::Clock;
use crate::model::{
    validate_frequency, FrequencyError, FrequencyType, RecurringItem, RecurringKind, Status,
};

/// Signed whole days from `today` until `next_due_date`. Negative means
/// overdue, zero means due today. Both arguments are calendar dates, so the
/// midnight truncation the comparison needs is already done by the type.
pub fn days_until_due(next_due_date: NaiveDate, today: NaiveDate) -> i64 {
    next_due_date.signed_duration_since(today).num_days()
}

/// Where an item stands relative to today. Exactly one bucket holds for any
/// date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Dueness {
    Overdue,
    DueToday,
    Upcoming,
}

impl std::fmt::Display for Dueness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dueness::Overdue => write!(f, "overdue"),
            Dueness::DueToday => write!(f, "due_today"),
            Dueness::Upcoming => write!(f, "upcoming"),
        }
    }
}

pub fn classify_dueness(next_due_date: NaiveDate, today: NaiveDate) -> Dueness {
    match days_until_due(next_due_date, today) {
        days if days < 0 => Dueness::Overdue,
        0 => Dueness::DueToday,
        _ => Dueness::Upcoming,
    }
}

/// Next occurrence measured from `from`: the completion date, never the old
/// due date. Completing early or late shifts the whole cadence forward from
/// the completion moment; there is no catch-up to a fixed grid.
///
/// Monthly keeps the day-of-month and clamps to the last valid day when the
/// target month is shorter (Jan 31 -> Feb 29 in a leap year, Feb 28
/// otherwise). A malformed type/value combination is refused outright
/// rather than silently producing a wrong date.
pub fn next_due_date(
    frequency_type: FrequencyType,
    frequency_value: u32,
    from: NaiveDate,
) -> Result<NaiveDate, FrequencyError> {
    validate_frequency(frequency_type, frequency_value)?;
    let next = match frequency_type {
        FrequencyType::Daily => from.checked_add_days(Days::new(1)),
        FrequencyType::Weekly => from.checked_add_days(Days::new(7)),
        FrequencyType::Biweekly => from.checked_add_days(Days::new(14)),
        FrequencyType::Monthly => from.checked_add_months(Months::new(1)),
        FrequencyType::Custom => from.checked_add_days(Days::new(u64::from(frequency_value))),
    };
    next.ok_or(FrequencyError::DateOverflow {
        kind: frequency_type,
        from,
    })
}

/// Apply a completion event to a recurring item.
///
/// Stamps `last_completed_date` with the effective date (caller-supplied,
/// else today from `clock`), rolls `next_due_date` forward from it, and
/// resets `status` so the next occurrence starts pending; completion never
/// forces `Completed`. For habits the streak advances when the completion
/// landed on or before the old due date and restarts at one otherwise: the
/// completion itself always counts as day one of a streak.
pub fn complete(
    item: &RecurringItem,
    completion_date: Option<NaiveDate>,
    clock: &dyn Clock,
) -> Result<RecurringItem, FrequencyError> {
    let effective = completion_date.unwrap_or_else(|| clock.today());
    let on_time = days_until_due(item.next_due_date, effective) >= 0;

    let mut updated = item.clone();
    updated.last_completed_date = Some(effective);
    updated.next_due_date = next_due_date(item.frequency_type, item.frequency_value, effective)?;
    updated.status = Status::NotStarted;
    if item.kind == RecurringKind::Habit {
        let streak = item.streak_count.unwrap_or(0);
        updated.streak_count = Some(if on_time { streak + 1 } else { 1 });
    }

    info!(
        target: "paceline",
        event = "recurring_item_completed",
        id = item.id,
        kind = %item.kind,
        on_time,
        completed_on = %effective,
        next_due = %updated.next_due_date,
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_until_due_signs() {
        let today = day(2024, 6, 10);
        assert_eq!(days_until_due(day(2024, 6, 8), today), -2);
        assert_eq!(days_until_due(today, today), 0);
        assert_eq!(days_until_due(day(2024, 6, 13), today), 3);
    }

    #[test]
    fn dueness_buckets_are_exclusive() {
        let today = day(2024, 6, 10);
        assert_eq!(classify_dueness(day(2024, 6, 9), today), Dueness::Overdue);
        assert_eq!(classify_dueness(today, today), Dueness::DueToday);
        assert_eq!(classify_dueness(day(2024, 6, 11), today), Dueness::Upcoming);
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        assert_eq!(
            next_due_date(FrequencyType::Monthly, 1, day(2024, 1, 31)).unwrap(),
            day(2024, 2, 29)
        );
        assert_eq!(
            next_due_date(FrequencyType::Monthly, 1, day(2025, 1, 31)).unwrap(),
            day(2025, 2, 28)
        );
        assert_eq!(
            next_due_date(FrequencyType::Monthly, 1, day(2024, 4, 15)).unwrap(),
            day(2024, 5, 15)
        );
    }

    #[test]
    fn malformed_frequency_is_refused() {
        assert!(next_due_date(FrequencyType::Weekly, 2, day(2024, 6, 10)).is_err());
        assert!(next_due_date(FrequencyType::Custom, 0, day(2024, 6, 10)).is_err());
    }

    #[test]
    fn completion_defaults_to_clock_today() {
        let chore =
            RecurringItem::chore(1, "Hoover", FrequencyType::Weekly, 1, day(2024, 6, 10)).unwrap();
        let clock = FixedClock(day(2024, 6, 12));
        let updated = complete(&chore, None, &clock).unwrap();
        assert_eq!(updated.last_completed_date, Some(day(2024, 6, 12)));
        assert_eq!(updated.next_due_date, day(2024, 6, 19));
        assert_eq!(updated.status, Status::NotStarted);
        assert_eq!(updated.streak_count, None);
    }

    #[test]
    fn cadence_anchors_on_completion_not_old_due_date() {
        let chore =
            RecurringItem::chore(1, "Hoover", FrequencyType::Weekly, 1, day(2024, 6, 10)).unwrap();
        let clock = FixedClock(day(2024, 6, 1));
        // Completed three days early: the whole cadence shifts forward from
        // the 7th, it does not snap back to the old 10th + 7.
        let updated = complete(&chore, Some(day(2024, 6, 7)), &clock).unwrap();
        assert_eq!(updated.next_due_date, day(2024, 6, 14));
    }
}
