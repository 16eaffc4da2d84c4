// File: ./src/model/mod.rs
pub mod display;
pub mod extractor;
pub mod item;
pub mod matcher;
pub mod patterns;
pub mod resolver;
pub mod window;

pub use extractor::extract;
pub use item::{
    Account, CandidateEvent, DocumentRecord, EventType, NewEvent, PersistedEvent, ResolvedEvent,
};
pub use matcher::{FilterOptions, TypeFilter, filter_and_sort};
pub use resolver::{resolve_due, resolve_due_in_year};
pub use window::{DateRange, View};
