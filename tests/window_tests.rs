// Tests for the named dashboard windows.
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use syllabus_radar::model::window::{last_day_of_month, start_of_week};
use syllabus_radar::model::{DateRange, View};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_whole_days(range: &DateRange) {
    assert_eq!(range.start.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    assert_eq!(
        (range.end.hour(), range.end.minute(), range.end.second()),
        (23, 59, 59)
    );
    assert_eq!(range.end.nanosecond(), 999_000_000);
}

#[test]
fn test_week_starts_monday_for_every_day() {
    // 2025-10-13 is a Monday
    for offset in 0..7 {
        let now = at(2025, 10, 13 + offset, 15);
        let range = DateRange::for_view(View::Week, now);
        assert_eq!(range.start.date(), date(2025, 10, 13), "offset {}", offset);
        assert_eq!(range.end.date(), date(2025, 10, 19), "offset {}", offset);
        assert_eq!(range.start.weekday(), Weekday::Mon);
        assert_whole_days(&range);
    }
}

#[test]
fn test_sunday_belongs_to_previous_monday() {
    assert_eq!(start_of_week(date(2025, 10, 19)), date(2025, 10, 13));
    // Week crossing a year boundary
    assert_eq!(start_of_week(date(2026, 1, 4)), date(2025, 12, 29));
}

#[test]
fn test_tomorrow_is_a_single_day() {
    let range = DateRange::for_view(View::Tomorrow, at(2025, 12, 31, 22));
    assert_eq!(range.start.date(), date(2026, 1, 1));
    assert_eq!(range.end.date(), date(2026, 1, 1));
    assert_whole_days(&range);
}

#[test]
fn test_month_bounds() {
    let range = DateRange::for_view(View::Month, at(2024, 2, 10, 8));
    assert_eq!(range.start.date(), date(2024, 2, 1));
    assert_eq!(range.end.date(), date(2024, 2, 29));
    assert_whole_days(&range);

    assert_eq!(last_day_of_month(date(2025, 12, 5)), date(2025, 12, 31));
    assert_eq!(last_day_of_month(date(2025, 4, 30)), date(2025, 4, 30));
}

#[test]
fn test_all_runs_to_end_of_next_year() {
    let range = DateRange::for_view(View::All, at(2025, 10, 15, 12));
    assert_eq!(range.start.date(), date(2025, 10, 15));
    assert_eq!(range.end.date(), date(2026, 12, 31));
    assert_whole_days(&range);
}

#[test]
fn test_contains_is_inclusive() {
    let range = DateRange::for_view(View::Tomorrow, at(2025, 10, 15, 12));
    assert!(range.contains(&range.start));
    assert!(range.contains(&range.end));
    assert!(range.contains(&at(2025, 10, 16, 23)));
    assert!(!range.contains(&at(2025, 10, 15, 23)));
    assert!(!range.contains(&at(2025, 10, 17, 0)));
}

#[test]
fn test_view_names() {
    assert_eq!("month".parse::<View>().unwrap(), View::Month);
    assert_eq!("TOMORROW".parse::<View>().unwrap(), View::Tomorrow);
    assert!("decade".parse::<View>().is_err());
    assert_eq!(View::default(), View::Week);
    assert_eq!(View::Week.label(), "Due This Week");
    assert_eq!(View::All.label(), "All Upcoming");
}
