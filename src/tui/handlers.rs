// File: src/tui/handlers.rs
// Handles keyboard input and loader events for the TUI.
use crate::model::View;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::EventsLoaded(events) => {
            let total = events.len();
            state.set_events(events);
            state.message = format!(
                "{} stored deadline(s), {} in {}.",
                total,
                state.shown.len(),
                state.view
            );
        }
        AppEvent::Error(s) => {
            state.message = format!("Error: {}", s);
            state.loading = false;
        }
    }
}

/// Returns an action for the loader when the key asks for one.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match state.mode {
        InputMode::Searching => {
            match key.code {
                KeyCode::Enter => {
                    state.active_search_query = state.input_buffer.trim().to_string();
                    state.mode = InputMode::Normal;
                    state.reset_input();
                    state.message = if state.active_search_query.is_empty() {
                        "Search cleared.".to_string()
                    } else {
                        format!("Search: {}", state.active_search_query)
                    };
                }
                KeyCode::Esc => {
                    state.mode = InputMode::Normal;
                    state.reset_input();
                }
                KeyCode::Backspace => {
                    state.input_buffer.pop();
                }
                KeyCode::Char(c) => state.input_buffer.push(c),
                _ => {}
            }
            state.list_state.select(Some(0));
            state.refresh_filtered_view();
            None
        }
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => {
                state.loading = true;
                state.message = "Reloading...".to_string();
                Some(Action::Reload)
            }
            KeyCode::Char('?') => {
                state.show_full_help = !state.show_full_help;
                None
            }
            KeyCode::Char('t') => {
                state.set_view(View::Tomorrow);
                None
            }
            KeyCode::Char('w') => {
                state.set_view(View::Week);
                None
            }
            KeyCode::Char('m') => {
                state.set_view(View::Month);
                None
            }
            KeyCode::Char('a') => {
                state.set_view(View::All);
                None
            }
            KeyCode::Char('f') => {
                state.type_filter = state.type_filter.next();
                state.list_state.select(Some(0));
                state.refresh_filtered_view();
                state.message = format!("Filter: {}", state.type_filter);
                None
            }
            KeyCode::Char('F') => {
                state.type_filter = state.type_filter.previous();
                state.list_state.select(Some(0));
                state.refresh_filtered_view();
                state.message = format!("Filter: {}", state.type_filter);
                None
            }
            KeyCode::Char('/') => {
                state.mode = InputMode::Searching;
                state.input_buffer = state.active_search_query.clone();
                None
            }
            KeyCode::Esc => {
                if !state.active_search_query.is_empty() {
                    state.active_search_query.clear();
                    state.refresh_filtered_view();
                    state.message = "Search cleared.".to_string();
                }
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                state.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.previous();
                None
            }
            _ => None,
        },
    }
}
