// Logic for narrowing stored deadlines down to what a dashboard view shows.
//
// Order of operations matters only for readability; every step is a plain
// filter, and the final sort is chronological on the resolved date (unlike the
// extractor, which orders by due text).

use crate::model::item::{EventType, PersistedEvent, ResolvedEvent};
use crate::model::resolver::resolve_due_in_year;
use crate::model::window::DateRange;
use chrono::Datelike;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

impl TypeFilter {
    pub fn accepts(&self, event: &PersistedEvent) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => event.effective_type() == *kind,
        }
    }

    /// all -> exam -> quiz -> ... -> other -> all
    pub fn next(self) -> Self {
        let kinds: Vec<EventType> = EventType::iter().collect();
        match self {
            TypeFilter::All => TypeFilter::Only(kinds[0]),
            TypeFilter::Only(kind) => match kinds.iter().position(|k| *k == kind) {
                Some(i) if i + 1 < kinds.len() => TypeFilter::Only(kinds[i + 1]),
                _ => TypeFilter::All,
            },
        }
    }

    pub fn previous(self) -> Self {
        let kinds: Vec<EventType> = EventType::iter().collect();
        match self {
            TypeFilter::All => TypeFilter::Only(kinds[kinds.len() - 1]),
            TypeFilter::Only(kind) => match kinds.iter().position(|k| *k == kind) {
                Some(i) if i > 0 => TypeFilter::Only(kinds[i - 1]),
                _ => TypeFilter::All,
            },
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "All types"),
            TypeFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        EventType::from_str(s)
            .map(TypeFilter::Only)
            .map_err(|_| format!("Unknown event type: '{}'", s))
    }
}

pub struct FilterOptions<'a> {
    pub range: DateRange,
    pub type_filter: TypeFilter,
    pub query: &'a str,
    /// Year assumed for due text, normally the current local year.
    pub year: i32,
}

impl<'a> FilterOptions<'a> {
    pub fn new(range: DateRange, type_filter: TypeFilter, query: &'a str) -> Self {
        Self {
            range,
            type_filter,
            query,
            year: chrono::Local::now().year(),
        }
    }
}

/// Pairs every event with its interpreted due date. Nothing is dropped here.
pub fn resolve_all(events: &[PersistedEvent], year: i32) -> Vec<ResolvedEvent> {
    events
        .iter()
        .map(|e| ResolvedEvent {
            event: e.clone(),
            due_date: resolve_due_in_year(&e.due_text, year),
        })
        .collect()
}

pub fn filter_and_sort(events: &[PersistedEvent], opts: &FilterOptions) -> Vec<ResolvedEvent> {
    let query = opts.query.trim().to_lowercase();

    let mut shown: Vec<ResolvedEvent> = resolve_all(events, opts.year)
        .into_iter()
        .filter(|r| r.due_date.is_some_and(|dt| opts.range.contains(&dt)))
        .filter(|r| opts.type_filter.accepts(&r.event))
        .filter(|r| query.is_empty() || matches_query(&r.event, &query))
        .collect();

    shown.sort_by_key(|r| r.due_date);
    shown
}

/// `query` must already be lowercased.
fn matches_query(event: &PersistedEvent, query: &str) -> bool {
    let kind = event.kind.map(|k| k.as_ref().to_string()).unwrap_or_default();
    event.title.to_lowercase().contains(query)
        || event.due_text.to_lowercase().contains(query)
        || kind.contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_filter_cycles_through_every_kind() {
        let mut f = TypeFilter::All;
        let mut seen = Vec::new();
        loop {
            f = f.next();
            if f == TypeFilter::All {
                break;
            }
            seen.push(f);
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], TypeFilter::Only(EventType::Exam));
        assert_eq!(seen[5], TypeFilter::Only(EventType::Other));
        assert_eq!(TypeFilter::All.previous(), TypeFilter::Only(EventType::Other));
    }

    #[test]
    fn type_filter_parses() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "Quiz".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(EventType::Quiz)
        );
        assert!("lecture".parse::<TypeFilter>().is_err());
    }
}
