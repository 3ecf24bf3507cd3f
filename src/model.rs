use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::{AppError, AppResult};

/// Hours in a week; weekly-hour figures are capped here at input time.
pub const MAX_WEEKLY_HOURS: f64 = 168.0;

/// Lifecycle status shared by projects, goals, tasks and recurring items.
///
/// Serialized with the display strings the UI stores and renders, not the
/// variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "Not Started"),
            Status::InProgress => write!(f, "In Progress"),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

/// Recurrence cadence of a chore or habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FrequencyType {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    /// Every N days; the only cadence that reads `frequency_value`.
    Custom,
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyType::Daily => write!(f, "daily"),
            FrequencyType::Weekly => write!(f, "weekly"),
            FrequencyType::Biweekly => write!(f, "biweekly"),
            FrequencyType::Monthly => write!(f, "monthly"),
            FrequencyType::Custom => write!(f, "custom"),
        }
    }
}

/// A frequency policy the engine refuses to compute dates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrequencyError {
    #[error("custom frequency requires an interval of at least 1 day (got {0})")]
    CustomIntervalTooSmall(u32),
    #[error("{kind} frequency does not take an interval (got {value}, expected 1)")]
    IntervalNotApplicable { kind: FrequencyType, value: u32 },
    #[error("next due date from {from} overflows the supported calendar range")]
    DateOverflow { kind: FrequencyType, from: NaiveDate },
}

impl From<FrequencyError> for AppError {
    fn from(error: FrequencyError) -> Self {
        AppError::new("RECURRENCE/FREQUENCY", error.to_string())
    }
}

/// Rejects the frequency-type/value combinations the engine assumes away:
/// `custom` with an interval below 1, or any other cadence with an interval
/// other than 1. Called at construction and edit time.
pub fn validate_frequency(kind: FrequencyType, value: u32) -> Result<(), FrequencyError> {
    match kind {
        FrequencyType::Custom if value < 1 => Err(FrequencyError::CustomIntervalTooSmall(value)),
        FrequencyType::Custom => Ok(()),
        _ if value != 1 => Err(FrequencyError::IntervalNotApplicable { kind, value }),
        _ => Ok(()),
    }
}

/// A weekly-hours figure outside the range forms may submit.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HoursError {
    #[error("weekly hours must be a finite number")]
    NotFinite,
    #[error("weekly hours must not be negative (got {0})")]
    Negative(f64),
    #[error("weekly hours must not exceed {MAX_WEEKLY_HOURS} (got {0})")]
    ExceedsWeek(f64),
}

impl From<HoursError> for AppError {
    fn from(error: HoursError) -> Self {
        AppError::new("ALLOCATION/HOURS", error.to_string())
    }
}

/// Input guard for weekly-hour figures, shared by every budget-holder form.
/// The allocation engine itself stays total on any numeric input; callers
/// run this before submitting.
pub fn validate_weekly_hours(hours: f64) -> Result<(), HoursError> {
    if !hours.is_finite() {
        Err(HoursError::NotFinite)
    } else if hours < 0.0 {
        Err(HoursError::Negative(hours))
    } else if hours > MAX_WEEKLY_HOURS {
        Err(HoursError::ExceedsWeek(hours))
    } else {
        Ok(())
    }
}

/// Whether a recurring item tracks a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RecurringKind {
    Chore,
    Habit,
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurringKind::Chore => write!(f, "chore"),
            RecurringKind::Habit => write!(f, "habit"),
        }
    }
}

/// A chore or habit as round-tripped by the API layer.
///
/// Chores and habits share one body; `streak_count` is present exactly when
/// `kind` is `Habit`. `validate` re-checks that coherence for records that
/// arrive from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RecurringItem {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub kind: RecurringKind,
    pub status: Status,
    pub frequency_type: FrequencyType,
    pub frequency_value: u32,
    #[ts(type = "string")]
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, type = "string")]
    pub last_completed_date: Option<NaiveDate>,
    /// Estimated effort per occurrence, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub eta_hours: Option<f64>,
    /// Consecutive on-time completions. Habits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub streak_count: Option<u32>,
}

impl RecurringItem {
    /// A chore: recurring upkeep with no streak tracking.
    pub fn chore(
        id: i64,
        name: impl Into<String>,
        frequency_type: FrequencyType,
        frequency_value: u32,
        next_due_date: NaiveDate,
    ) -> Result<Self, FrequencyError> {
        validate_frequency(frequency_type, frequency_value)?;
        Ok(RecurringItem {
            id,
            name: name.into(),
            kind: RecurringKind::Chore,
            status: Status::NotStarted,
            frequency_type,
            frequency_value,
            next_due_date,
            last_completed_date: None,
            eta_hours: None,
            streak_count: None,
        })
    }

    /// A habit: recurring routine whose consecutive on-time completions are
    /// tracked as a streak, starting at zero.
    pub fn habit(
        id: i64,
        name: impl Into<String>,
        frequency_type: FrequencyType,
        frequency_value: u32,
        next_due_date: NaiveDate,
    ) -> Result<Self, FrequencyError> {
        let mut item = Self::chore(id, name, frequency_type, frequency_value, next_due_date)?;
        item.kind = RecurringKind::Habit;
        item.streak_count = Some(0);
        Ok(item)
    }

    pub fn has_streak(&self) -> bool {
        self.kind == RecurringKind::Habit
    }

    /// Re-checks the invariants the constructors enforce, for records that
    /// arrive from outside (deserialized payloads, imports).
    pub fn validate(&self) -> AppResult<()> {
        validate_frequency(self.frequency_type, self.frequency_value)
            .map_err(|err| AppError::from(err).with_context("id", self.id.to_string()))?;
        match (self.kind, self.streak_count) {
            (RecurringKind::Habit, None) => Err(AppError::new(
                "RECURRING/STREAK_MISSING",
                "Habit is missing its streak counter",
            )
            .with_context("id", self.id.to_string())),
            (RecurringKind::Chore, Some(_)) => Err(AppError::new(
                "RECURRING/STREAK_UNEXPECTED",
                "Chore must not carry a streak counter",
            )
            .with_context("id", self.id.to_string())),
            _ => Ok(()),
        }?;
        if let Some(eta) = self.eta_hours {
            if !eta.is_finite() || eta <= 0.0 {
                return Err(AppError::new(
                    "RECURRING/ETA_INVALID",
                    "Estimated hours must be greater than zero",
                )
                .with_context("id", self.id.to_string())
                .with_context("eta_hours", eta.to_string()));
            }
        }
        Ok(())
    }
}
