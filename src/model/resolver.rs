// File: ./src/model/resolver.rs
//! Interprets stored due text ("Oct 3", "12/15") as a concrete local date-time.
//!
//! Syllabi rarely state a time, so every deadline lands at 23:59:00. No year is
//! stored either: the calendar year at resolution time is assumed.

use crate::model::patterns;
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};

/// Resolves against the current local year.
pub fn resolve_due(due_text: &str) -> Option<NaiveDateTime> {
    resolve_due_in_year(due_text, Local::now().year())
}

pub fn resolve_due_in_year(due_text: &str, year: i32) -> Option<NaiveDateTime> {
    let s = due_text.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = patterns::month_day().captures(s) {
        let month0 = patterns::month_index(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        return end_of_day_deadline(year, month0, day);
    }

    if let Some(caps) = patterns::numeric_date().captures(s) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        return end_of_day_deadline(year, month - 1, day);
    }

    None
}

/// Builds `year-month-day 23:59:00`. A day past the end of the month rolls into
/// the next one ("Feb 30" is March 1st or 2nd).
fn end_of_day_deadline(year: i32, month0: u32, day: u32) -> Option<NaiveDateTime> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(day.saturating_sub(1))))?;
    date.and_hms_opt(23, 59, 0)
}
