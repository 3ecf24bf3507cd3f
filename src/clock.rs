use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Source of "now" for dueness and recurrence computations.
///
/// No pure function in this crate reads the ambient clock; callers hand in
/// a `Clock` so tests can pin time to a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now`, truncated to midnight.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to midnight of a fixed date, for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_reasonable() {
        let now = SystemClock.now().timestamp_millis();
        assert!(now > 1_500_000_000_000); // after 2017
        assert!(now < 4_100_000_000_000); // before year ~2100
    }

    #[test]
    fn fixed_clock_reports_its_date() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().time(), NaiveTime::MIN);
    }
}
