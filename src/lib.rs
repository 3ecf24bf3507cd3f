//! Core engine for the Paceline productivity tracker.
//!
//! Two independent subsystems: the allocation validator, which checks that
//! child weekly-hour budgets fit under their parent's budget across the
//! Project -> Goal -> Task hierarchy, and the recurrence engine, which rolls
//! due dates forward for chores and habits and advances habit streaks.
//! Persistence, HTTP and UI all live upstream; this crate only computes
//! over plain records handed to it.

pub mod allocation;
pub mod clock;
pub mod error;
pub mod logging;
pub mod model;
pub mod recurrence;
pub mod schedule;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, AppResult};
