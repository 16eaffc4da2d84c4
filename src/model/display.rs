// File: ./src/model/display.rs
use crate::model::item::{CandidateEvent, PersistedEvent, ResolvedEvent};
use crate::model::window::{DateRange, View};
use chrono::NaiveDateTime;

pub const EMPTY_VIEW_MESSAGE: &str = "No deadlines found for this view.";

pub trait EventDisplay {
    fn type_label(&self) -> String;
    fn to_display_line(&self) -> String;
}

impl EventDisplay for CandidateEvent {
    fn type_label(&self) -> String {
        self.kind.as_ref().to_string()
    }

    fn to_display_line(&self) -> String {
        format!("{} — {} ({})", self.due, self.title, self.type_label())
    }
}

impl EventDisplay for PersistedEvent {
    fn type_label(&self) -> String {
        self.effective_type().as_ref().to_string()
    }

    fn to_display_line(&self) -> String {
        format!("{} — {} ({})", self.due_text, self.title, self.type_label())
    }
}

impl EventDisplay for ResolvedEvent {
    fn type_label(&self) -> String {
        self.event.type_label()
    }

    fn to_display_line(&self) -> String {
        let when = match &self.due_date {
            Some(dt) => format_due_date(dt),
            None => self.event.due_text.clone(),
        };
        format!("{} — {} ({})", when, self.event.title, self.type_label())
    }
}

/// "Sat Oct 03 2026, 23:59"
pub fn format_due_date(dt: &NaiveDateTime) -> String {
    dt.format("%a %b %d %Y, %H:%M").to_string()
}

/// "Due This Week: Mon Oct 12 2026 → Sun Oct 18 2026"
pub fn format_window_header(view: View, range: &DateRange) -> String {
    format!(
        "{}: {} → {}",
        view.label(),
        range.start.format("%a %b %d %Y"),
        range.end.format("%a %b %d %Y")
    )
}

/// Clips `text` to `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
