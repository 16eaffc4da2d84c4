// Tests for narrowing stored deadlines to a dashboard view.
use chrono::{NaiveDate, NaiveDateTime, Utc};
use syllabus_radar::model::display::{EMPTY_VIEW_MESSAGE, EventDisplay, format_window_header};
use syllabus_radar::model::matcher::resolve_all;
use syllabus_radar::model::{
    DateRange, EventType, FilterOptions, PersistedEvent, TypeFilter, View, filter_and_sort,
};

fn now() -> NaiveDateTime {
    // Wednesday
    NaiveDate::from_ymd_opt(2025, 10, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn event(title: &str, kind: Option<EventType>, due: &str) -> PersistedEvent {
    PersistedEvent {
        id: format!("id-{}", title),
        owner_id: "owner".to_string(),
        document_id: "doc".to_string(),
        title: title.to_string(),
        kind,
        due_text: due.to_string(),
        created_at: Utc::now(),
    }
}

fn sample() -> Vec<PersistedEvent> {
    vec![
        event("Essay 2", Some(EventType::Assignment), "Oct 17"),
        event("Midterm", Some(EventType::Exam), "10/14"),
        event("Chapter 4 reading", Some(EventType::Reading), "Oct 16"),
        event("Lab report", None, "Oct 15"),
        event("Mystery", Some(EventType::Quiz), "sometime soon"),
        event("Final project", Some(EventType::Project), "Dec 8"),
        event("Spring quiz", Some(EventType::Quiz), "Feb 3"),
    ]
}

fn run(view: View, type_filter: TypeFilter, query: &str) -> Vec<String> {
    let opts = FilterOptions {
        range: DateRange::for_view(view, now()),
        type_filter,
        query,
        year: 2025,
    };
    filter_and_sort(&sample(), &opts)
        .into_iter()
        .map(|r| r.event.title)
        .collect()
}

#[test]
fn test_week_is_chronological() {
    assert_eq!(
        run(View::Week, TypeFilter::All, ""),
        vec!["Midterm", "Lab report", "Chapter 4 reading", "Essay 2"]
    );
}

#[test]
fn test_tomorrow_only() {
    assert_eq!(
        run(View::Tomorrow, TypeFilter::All, ""),
        vec!["Chapter 4 reading"]
    );
}

#[test]
fn test_all_skips_past_and_unresolvable() {
    // Midterm was yesterday; Feb 3 is read as Feb 3 2025, already past
    assert_eq!(
        run(View::All, TypeFilter::All, ""),
        vec!["Lab report", "Chapter 4 reading", "Essay 2", "Final project"]
    );
}

#[test]
fn test_missing_type_counts_as_other() {
    assert_eq!(
        run(View::Month, TypeFilter::Only(EventType::Other), ""),
        vec!["Lab report"]
    );
    assert_eq!(
        run(View::Month, TypeFilter::Only(EventType::Exam), ""),
        vec!["Midterm"]
    );
}

#[test]
fn test_query_matches_title_due_and_type() {
    assert_eq!(run(View::Month, TypeFilter::All, "ESSAY"), vec!["Essay 2"]);
    assert_eq!(run(View::Month, TypeFilter::All, "10/14"), vec!["Midterm"]);
    assert_eq!(
        run(View::Month, TypeFilter::All, "reading"),
        vec!["Chapter 4 reading"]
    );
    assert_eq!(run(View::Month, TypeFilter::All, "exam"), vec!["Midterm"]);
    // A missing type is not searchable as "other"
    assert!(run(View::Month, TypeFilter::All, "other").is_empty());
    assert_eq!(run(View::Month, TypeFilter::All, "  ").len(), 4);
}

#[test]
fn test_filters_combine() {
    assert_eq!(
        run(View::All, TypeFilter::Only(EventType::Assignment), "2"),
        vec!["Essay 2"]
    );
    assert!(run(View::Tomorrow, TypeFilter::Only(EventType::Exam), "").is_empty());
}

#[test]
fn test_resolution_never_adds_events() {
    let events = sample();
    let resolved = resolve_all(&events, 2025);
    assert_eq!(resolved.len(), events.len());
    let unresolved: Vec<&str> = resolved
        .iter()
        .filter(|r| r.due_date.is_none())
        .map(|r| r.event.title.as_str())
        .collect();
    assert_eq!(unresolved, vec!["Mystery"]);
}

#[test]
fn test_display_lines() {
    let opts = FilterOptions {
        range: DateRange::for_view(View::Week, now()),
        type_filter: TypeFilter::All,
        query: "lab",
        year: 2025,
    };
    let shown = filter_and_sort(&sample(), &opts);
    assert_eq!(
        shown[0].to_display_line(),
        "Wed Oct 15 2025, 23:59 — Lab report (other)"
    );
    assert_eq!(
        format_window_header(View::Week, &opts.range),
        "Due This Week: Mon Oct 13 2025 → Sun Oct 19 2025"
    );
    assert_eq!(EMPTY_VIEW_MESSAGE, "No deadlines found for this view.");
}
