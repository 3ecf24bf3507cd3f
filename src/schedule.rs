use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{FrequencyError, RecurringItem, RecurringKind};
use crate::recurrence::{classify_dueness, days_until_due, next_due_date, Dueness};

/// Hard cap on projected occurrences per item; a daily item over a long
/// horizon must not balloon the calendar feed.
pub const MAX_PROJECTED_OCCURRENCES: usize = 366;

/// Items due on or before `today`, the dashboard's "needs attention" set.
pub fn due_filter<'a>(items: &'a [RecurringItem], today: NaiveDate) -> Vec<&'a RecurringItem> {
    items
        .iter()
        .filter(|item| item.next_due_date <= today)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuenessRecord {
    pub id: i64,
    pub name: String,
    pub kind: RecurringKind,
    pub next_due_date: NaiveDate,
    pub days_until_due: i64,
    pub dueness: Dueness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuenessReport {
    pub today: NaiveDate,
    pub total_items: usize,
    pub records: Vec<DuenessRecord>,
    pub counts_by_dueness: BTreeMap<Dueness, usize>,
}

/// Evaluate every item against `today`. Records come back ordered by due
/// date, then id, so the report reads soonest-first.
pub fn dueness_report(items: &[RecurringItem], today: NaiveDate) -> DuenessReport {
    let mut records: Vec<DuenessRecord> = items
        .iter()
        .map(|item| DuenessRecord {
            id: item.id,
            name: item.name.clone(),
            kind: item.kind,
            next_due_date: item.next_due_date,
            days_until_due: days_until_due(item.next_due_date, today),
            dueness: classify_dueness(item.next_due_date, today),
            streak_count: item.streak_count,
        })
        .collect();
    records.sort_by(|a, b| {
        a.next_due_date
            .cmp(&b.next_due_date)
            .then(a.id.cmp(&b.id))
    });

    let mut counts_by_dueness = BTreeMap::new();
    for record in &records {
        *counts_by_dueness.entry(record.dueness).or_insert(0) += 1;
    }

    DuenessReport {
        today,
        total_items: items.len(),
        records,
        counts_by_dueness,
    }
}

pub fn format_human_summary(report: &DuenessReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Schedule Dueness Report");
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out, "Date:          {}", report.today);
    let _ = writeln!(out, "Items checked: {}", report.total_items);
    for bucket in [Dueness::Overdue, Dueness::DueToday, Dueness::Upcoming] {
        let count = report.counts_by_dueness.get(&bucket).copied().unwrap_or(0);
        let _ = writeln!(out, "{:<14} {}", format!("{bucket}:"), count);
    }

    let _ = writeln!(out, "\nItems:");
    if report.records.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        for record in &report.records {
            let streak = match record.streak_count {
                Some(streak) => format!(", streak {streak}"),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "  #{} {} [{}] due {} ({:+} d{})",
                record.id,
                record.name,
                record.kind,
                record.next_due_date,
                record.days_until_due,
                streak
            );
        }
    }

    out
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceProjection {
    pub item_id: i64,
    pub occurrences: Vec<NaiveDate>,
    /// Set when the hard cap cut the series short of the horizon.
    pub truncated: bool,
}

/// Future due dates of `item` inside `[from, from + horizon_days]`, assuming
/// each occurrence is completed on its due date. This is the feed the
/// calendar view composes with ordinary events.
pub fn project_occurrences(
    item: &RecurringItem,
    from: NaiveDate,
    horizon_days: u32,
) -> Result<OccurrenceProjection, FrequencyError> {
    let end = from
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .ok_or(FrequencyError::DateOverflow {
            kind: item.frequency_type,
            from,
        })?;

    let mut occurrences = Vec::new();
    let mut truncated = false;
    let mut due = item.next_due_date;
    while due <= end {
        if due >= from {
            if occurrences.len() == MAX_PROJECTED_OCCURRENCES {
                truncated = true;
                break;
            }
            occurrences.push(due);
        }
        due = next_due_date(item.frequency_type, item.frequency_value, due)?;
    }

    Ok(OccurrenceProjection {
        item_id: item.id,
        occurrences,
        truncated,
    })
}
