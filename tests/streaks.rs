use chrono::NaiveDate;
use paceline::clock::FixedClock;
use paceline::model::{FrequencyType, RecurringItem, Status};
use paceline::recurrence::complete;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_habit(due: NaiveDate, streak: u32) -> RecurringItem {
    let mut habit = RecurringItem::habit(1, "Stretch", FrequencyType::Daily, 1, due).unwrap();
    habit.streak_count = Some(streak);
    habit
}

#[test]
fn on_time_completion_extends_the_streak() {
    let habit = daily_habit(day(2024, 6, 10), 5);
    let clock = FixedClock(day(2024, 6, 10));

    let updated = complete(&habit, Some(day(2024, 6, 10)), &clock).unwrap();
    assert_eq!(updated.streak_count, Some(6));

    // Completing early counts as on time too.
    let updated = complete(&habit, Some(day(2024, 6, 9)), &clock).unwrap();
    assert_eq!(updated.streak_count, Some(6));
}

#[test]
fn late_completion_restarts_the_streak_at_one() {
    let habit = daily_habit(day(2024, 6, 10), 9);
    let clock = FixedClock(day(2024, 6, 12));
    let updated = complete(&habit, Some(day(2024, 6, 12)), &clock).unwrap();
    // The completion itself is day one of the new streak, never zero.
    assert_eq!(updated.streak_count, Some(1));
}

#[test]
fn first_completion_starts_at_one_either_way() {
    let fresh = daily_habit(day(2024, 6, 10), 0);
    let clock = FixedClock(day(2024, 6, 10));
    let on_time = complete(&fresh, Some(day(2024, 6, 10)), &clock).unwrap();
    assert_eq!(on_time.streak_count, Some(1));
    let late = complete(&fresh, Some(day(2024, 6, 13)), &clock).unwrap();
    assert_eq!(late.streak_count, Some(1));
}

#[test]
fn every_third_day_habit_scenario() {
    let mut habit =
        RecurringItem::habit(42, "Long run", FrequencyType::Custom, 3, day(2024, 1, 10)).unwrap();
    habit.streak_count = Some(5);
    let clock = FixedClock(day(2024, 1, 9));

    let on_time = complete(&habit, Some(day(2024, 1, 9)), &clock).unwrap();
    assert_eq!(on_time.next_due_date, day(2024, 1, 12));
    assert_eq!(on_time.streak_count, Some(6));
    assert_eq!(on_time.last_completed_date, Some(day(2024, 1, 9)));

    let late = complete(&habit, Some(day(2024, 1, 15)), &clock).unwrap();
    assert_eq!(late.next_due_date, day(2024, 1, 18));
    assert_eq!(late.streak_count, Some(1));
}

#[test]
fn chores_never_grow_a_streak() {
    let chore =
        RecurringItem::chore(7, "Descale kettle", FrequencyType::Monthly, 1, day(2024, 1, 31))
            .unwrap();
    let clock = FixedClock(day(2024, 1, 31));
    let updated = complete(&chore, None, &clock).unwrap();
    assert_eq!(updated.streak_count, None);
    assert_eq!(updated.next_due_date, day(2024, 2, 29));
}

#[test]
fn completion_resets_status_for_the_next_occurrence() {
    let mut habit = daily_habit(day(2024, 6, 10), 2);
    habit.status = Status::InProgress;
    let clock = FixedClock(day(2024, 6, 10));
    let updated = complete(&habit, None, &clock).unwrap();
    assert_eq!(updated.status, Status::NotStarted);
    assert_eq!(updated.last_completed_date, Some(day(2024, 6, 10)));
    assert_eq!(updated.next_due_date, day(2024, 6, 11));
}
