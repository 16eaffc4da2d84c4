// File: ./src/model/extractor.rs
//! Turns raw document text into deadline candidates.
//!
//! A line becomes a deadline only when it mentions one of the category keywords
//! AND carries a recognisable date fragment. The result is deduplicated on
//! `title + due`, sorted by the due text as a plain string (so "12/25" sorts
//! before "3/1", and month names sort alphabetically) and capped.

use crate::model::item::{CandidateEvent, EventType};
use crate::model::patterns;
use std::collections::HashSet;

/// Upper bound on the number of deadlines returned for one document.
pub const MAX_EVENTS: usize = 60;

/// Longest title kept before truncation, in characters.
pub const MAX_TITLE_CHARS: usize = 140;

const ELLIPSIS: char = '…';

pub fn extract(text: &str) -> Vec<CandidateEvent> {
    let mut events = Vec::new();

    for line in text.lines().map(trim_line).filter(|l| !l.is_empty()) {
        // Keyword first: lines without one are never inspected for a date.
        let Some(kind) = classify(line) else {
            continue;
        };
        let Some(due) = find_due(line) else {
            continue;
        };

        events.push(CandidateEvent {
            title: clean_title(line),
            kind,
            due,
            source_line: line.to_string(),
        });
    }

    let mut seen = HashSet::new();
    events.retain(|e| seen.insert(e.dedup_key()));

    // Stable, so equal due strings keep input order.
    events.sort_by(|a, b| a.due.cmp(&b.due));
    events.truncate(MAX_EVENTS);
    events
}

/// Trims whitespace and byte-order marks from both ends.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// First matching keyword category, in precedence order.
pub fn classify(line: &str) -> Option<EventType> {
    patterns::categories()
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| *kind)
}

/// Date fragment as written in the line. Month-name form wins over numeric.
pub fn find_due(line: &str) -> Option<String> {
    let found = patterns::month_day()
        .find(line)
        .or_else(|| patterns::numeric_date().find(line))?;
    let due = found.as_str().trim();
    (!due.is_empty()).then(|| due.to_string())
}

fn clean_title(line: &str) -> String {
    let stripped = patterns::due_marker().replace_all(line, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > MAX_TITLE_CHARS {
        let mut title: String = collapsed.chars().take(MAX_TITLE_CHARS).collect();
        title.push(ELLIPSIS);
        title
    } else {
        collapsed
    }
}
