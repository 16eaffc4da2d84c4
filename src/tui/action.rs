// Requests from the UI loop to the loader task, and what comes back.
use crate::model::PersistedEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Reload,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    EventsLoaded(Vec<PersistedEvent>),
    Error(String),
}
