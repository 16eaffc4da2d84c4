// File: ./src/model/window.rs
//! Named dashboard windows and the inclusive date ranges they cover.
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    Tomorrow,
    #[default]
    Week,
    Month,
    All,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Tomorrow => "Due Tomorrow",
            View::Week => "Due This Week",
            View::Month => "Due This Month",
            View::All => "All Upcoming",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Tomorrow => write!(f, "Tomorrow"),
            View::Week => write!(f, "This Week"),
            View::Month => write!(f, "This Month"),
            View::All => write!(f, "All Upcoming"),
        }
    }
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, dt: &NaiveDateTime) -> bool {
        *dt >= self.start && *dt <= self.end
    }

    /// Range covered by `view`, relative to the local wall-clock time `now`.
    pub fn for_view(view: View, now: NaiveDateTime) -> Self {
        let today = now.date();
        match view {
            View::Tomorrow => {
                let t = today + Days::new(1);
                Self::days(t, t)
            }
            View::Week => {
                let monday = start_of_week(today);
                Self::days(monday, monday + Days::new(6))
            }
            View::Month => {
                let first = today.with_day(1).unwrap_or(today);
                Self::days(first, last_day_of_month(today))
            }
            View::All => {
                let horizon =
                    NaiveDate::from_ymd_opt(today.year() + 1, 12, 31).unwrap_or(NaiveDate::MAX);
                Self::days(today, horizon)
            }
        }
    }

    fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::default()),
            end: last.and_time(end_of_day()),
        }
    }
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
}
