// Tests for interpreting stored due text as a local date-time.
use chrono::{Datelike, Local, NaiveDate, Timelike};
use syllabus_radar::model::{extract, resolve_due, resolve_due_in_year};

fn at_2359(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap()
}

#[test]
fn test_month_name_uses_current_year() {
    let dt = resolve_due("Oct 3").unwrap();
    assert_eq!(dt.year(), Local::now().year());
    assert_eq!((dt.month(), dt.day()), (10, 3));
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (23, 59, 0));
}

#[test]
fn test_month_forms() {
    assert_eq!(resolve_due_in_year("Oct 3", 2025), Some(at_2359(2025, 10, 3)));
    assert_eq!(resolve_due_in_year("october 03", 2025), Some(at_2359(2025, 10, 3)));
    assert_eq!(resolve_due_in_year("Sept. 14", 2025), Some(at_2359(2025, 9, 14)));
    assert_eq!(resolve_due_in_year("SEP 14", 2025), Some(at_2359(2025, 9, 14)));
    assert_eq!(resolve_due_in_year("Dec 31", 2026), Some(at_2359(2026, 12, 31)));
}

#[test]
fn test_numeric_forms() {
    assert_eq!(resolve_due_in_year("12/15", 2025), Some(at_2359(2025, 12, 15)));
    assert_eq!(resolve_due_in_year("3-07", 2025), Some(at_2359(2025, 3, 7)));
    assert_eq!(resolve_due_in_year("4.1", 2025), Some(at_2359(2025, 4, 1)));
}

#[test]
fn test_unparseable_is_absent() {
    assert_eq!(resolve_due("13/40"), None);
    assert_eq!(resolve_due(""), None);
    assert_eq!(resolve_due("   "), None);
    assert_eq!(resolve_due("end of term"), None);
}

#[test]
fn test_impossible_days_roll_over() {
    assert_eq!(resolve_due_in_year("Feb 30", 2025), Some(at_2359(2025, 3, 2)));
    assert_eq!(resolve_due_in_year("2/30", 2024), Some(at_2359(2024, 3, 1)));
    assert_eq!(resolve_due_in_year("Apr 31", 2025), Some(at_2359(2025, 5, 1)));
}

#[test]
fn test_every_extracted_due_resolves() {
    let text = "Exam Oct 3\nQuiz 12/15\nEssay due Sept. 9\nProject 4-1\nReading ch.2 Jan 31";
    let events = extract(text);
    assert_eq!(events.len(), 5);
    for e in &events {
        assert!(
            resolve_due_in_year(&e.due, 2025).is_some(),
            "'{}' did not resolve",
            e.due
        );
    }
}
