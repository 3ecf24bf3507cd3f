use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sibling entry as seen by the validator: identity plus weekly-hour figure.
/// The validator never learns whether the parent is a project or a goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BudgetChild {
    #[ts(type = "number")]
    pub id: i64,
    pub weekly_hours: f64,
}

/// Derived view of how much of a parent's budget its children consume.
/// Computed transiently on every edit, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AllocationSummary {
    pub parent_hours: f64,
    pub allocated_hours: f64,
    /// Exact `parent_hours - allocated_hours`; only the percentage rounds.
    pub remaining_hours: f64,
    pub is_over_allocated: bool,
    #[ts(type = "number")]
    pub utilization_percentage: i64,
}

/// Outcome of an hours validation. A rejection is an expected result, not a
/// fault: `error` carries the message the editing form renders inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HoursCheck {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    /// Hours left under the budget once the proposed figure is applied.
    pub remaining_hours: f64,
    /// How far past the budget the proposal lands; 0 when valid.
    pub excess_hours: f64,
    /// Boundary for the figure being edited: the largest candidate that
    /// still fits, or for a parent shrink the smallest budget that still
    /// covers the children.
    pub limit_hours: f64,
}

impl HoursCheck {
    fn valid(remaining_hours: f64, limit_hours: f64) -> Self {
        HoursCheck {
            is_valid: true,
            error: None,
            remaining_hours,
            excess_hours: 0.0,
            limit_hours,
        }
    }
}

/// Capacity badge tier for an hours field, derived from a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum UtilizationTier {
    OverAllocated,
    NearlyFull,
    GoodProgress,
    Available,
}

impl UtilizationTier {
    /// Badge label shown next to the hours input.
    pub fn label(self) -> &'static str {
        match self {
            UtilizationTier::OverAllocated => "Over allocated",
            UtilizationTier::NearlyFull => "Nearly full",
            UtilizationTier::GoodProgress => "Good progress",
            UtilizationTier::Available => "Available",
        }
    }
}

impl fmt::Display for UtilizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationTier::OverAllocated => write!(f, "over-allocated"),
            UtilizationTier::NearlyFull => write!(f, "nearly-full"),
            UtilizationTier::GoodProgress => write!(f, "good-progress"),
            UtilizationTier::Available => write!(f, "available"),
        }
    }
}

fn allocated_hours<'a, I>(children: I) -> f64
where
    I: IntoIterator<Item = &'a BudgetChild>,
{
    children.into_iter().map(|child| child.weekly_hours).sum()
}

/// Rounded share of the parent budget its children consume.
///
/// A zero-hour parent has no meaningful percentage: 0 when nothing is
/// allocated, otherwise 100; in that case the over-allocation flag, derived
/// from the exact remainder, carries the real signal.
fn utilization_percentage(parent_hours: f64, allocated: f64) -> i64 {
    if parent_hours <= 0.0 {
        return if allocated > 0.0 { 100 } else { 0 };
    }
    (allocated / parent_hours * 100.0).round() as i64
}

/// Summarize how `children` consume `parent_hours`. Total on any numeric
/// input; O(children), no I/O, since it is queried on every keystroke of an
/// hours field.
pub fn summarize(parent_hours: f64, children: &[BudgetChild]) -> AllocationSummary {
    let allocated = allocated_hours(children);
    let remaining = parent_hours - allocated;
    AllocationSummary {
        parent_hours,
        allocated_hours: allocated,
        remaining_hours: remaining,
        is_over_allocated: remaining < 0.0,
        utilization_percentage: utilization_percentage(parent_hours, allocated),
    }
}

/// Check whether a proposed child figure fits under the parent budget.
///
/// `exclude_id` drops the edited sibling's stored figure from the running
/// total, so an edit is validated against everyone else's allocation rather
/// than double-counting its own pre-edit value. Equality with the budget is
/// valid.
pub fn validate_candidate(
    parent_hours: f64,
    siblings: &[BudgetChild],
    candidate_hours: f64,
    exclude_id: Option<i64>,
) -> HoursCheck {
    let current = allocated_hours(
        siblings
            .iter()
            .filter(|child| exclude_id != Some(child.id)),
    );
    let total = current + candidate_hours;
    let remaining = parent_hours - total;
    let limit = parent_hours - current;

    if total <= parent_hours {
        return HoursCheck::valid(remaining, limit);
    }

    let excess = total - parent_hours;
    HoursCheck {
        is_valid: false,
        error: Some(format!(
            "Requested {candidate_hours} h would exceed the budget by {excess} h: \
             {parent_hours} h total, {current} h already allocated, \
             at most {limit} h can be assigned."
        )),
        remaining_hours: remaining,
        excess_hours: excess,
        limit_hours: limit,
    }
}

/// Check whether a parent budget can shrink to `new_parent_hours` without
/// dropping below what its children already hold.
pub fn validate_parent_shrink(new_parent_hours: f64, children: &[BudgetChild]) -> HoursCheck {
    let allocated = allocated_hours(children);
    let remaining = new_parent_hours - allocated;

    if remaining >= 0.0 {
        return HoursCheck::valid(remaining, allocated);
    }

    HoursCheck {
        is_valid: false,
        error: Some(format!(
            "Cannot reduce the budget to {new_parent_hours} h: children already hold \
             {allocated} h. Reduce child allocations first."
        )),
        remaining_hours: remaining,
        excess_hours: -remaining,
        limit_hours: allocated,
    }
}

/// Map a summary to its badge tier. First match wins: over-allocation beats
/// any percentage, then the 90 and 50 thresholds.
pub fn classify(summary: &AllocationSummary) -> UtilizationTier {
    if summary.is_over_allocated {
        UtilizationTier::OverAllocated
    } else if summary.utilization_percentage >= 90 {
        UtilizationTier::NearlyFull
    } else if summary.utilization_percentage >= 50 {
        UtilizationTier::GoodProgress
    } else {
        UtilizationTier::Available
    }
}
