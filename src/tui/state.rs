// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::model::window::DateRange;
use crate::model::{FilterOptions, PersistedEvent, ResolvedEvent, TypeFilter, View, filter_and_sort};
use crate::session::Identity;
use chrono::{Datelike, Local, NaiveDateTime};
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
}

pub struct AppState {
    // Data
    pub identity: Identity,
    pub events: Vec<PersistedEvent>,
    pub shown: Vec<ResolvedEvent>,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub message: String,
    pub loading: bool,
    pub show_full_help: bool,

    // Filter State
    pub view: View,
    pub type_filter: TypeFilter,
    pub range: DateRange,
    /// Fixed clock for tests; `None` means local now on every refresh.
    pub now_override: Option<NaiveDateTime>,

    // Input Buffers
    pub input_buffer: String,
    pub active_search_query: String,
}

impl AppState {
    pub fn new(identity: Identity, view: View) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        let now = Local::now().naive_local();

        Self {
            identity,
            events: vec![],
            shown: vec![],
            list_state: l_state,
            mode: InputMode::Normal,
            message: "Loading...".to_string(),
            loading: true,
            show_full_help: false,
            view,
            type_filter: TypeFilter::All,
            range: DateRange::for_view(view, now),
            now_override: None,
            input_buffer: String::new(),
            active_search_query: String::new(),
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.now_override
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// While typing a search the live buffer is used, so results follow each keystroke.
    pub fn current_query(&self) -> &str {
        if self.mode == InputMode::Searching {
            &self.input_buffer
        } else {
            &self.active_search_query
        }
    }

    /// Recomputes the window and the visible rows from `events`.
    /// Runs on every draw so "today" never goes stale.
    pub fn refresh_filtered_view(&mut self) {
        let now = self.now();
        self.range = DateRange::for_view(self.view, now);

        let query = self.current_query().to_string();
        let mut opts = FilterOptions::new(self.range, self.type_filter, &query);
        opts.year = now.year();
        self.shown = filter_and_sort(&self.events, &opts);

        let len = self.shown.len();
        if len == 0 {
            self.list_state.select(Some(0));
        } else if let Some(sel) = self.list_state.selected()
            && sel >= len
        {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn set_events(&mut self, events: Vec<PersistedEvent>) {
        self.events = events;
        self.loading = false;
        self.refresh_filtered_view();
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.list_state.select(Some(0));
        self.refresh_filtered_view();
        self.message = format!("{} ({} shown)", view.label(), self.shown.len());
    }

    pub fn get_selected(&self) -> Option<&ResolvedEvent> {
        self.list_state.selected().and_then(|idx| self.shown.get(idx))
    }

    pub fn next(&mut self) {
        if self.shown.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.shown.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.shown.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.shown.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
    }
}
