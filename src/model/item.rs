// File: ./src/model/item.rs
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

fn default_id() -> String {
    Uuid::new_v4().to_string()
}

/// Closed set of deadline categories.
///
/// The extractor only ever assigns the first five; `Other` exists for rows whose
/// category is missing and for the dashboard's type filter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventType {
    Exam,
    Quiz,
    Assignment,
    Project,
    Reading,
    Other,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Exam => write!(f, "Exam"),
            EventType::Quiz => write!(f, "Quiz"),
            EventType::Assignment => write!(f, "Assignment"),
            EventType::Project => write!(f, "Project"),
            EventType::Reading => write!(f, "Reading"),
            EventType::Other => write!(f, "Other"),
        }
    }
}

/// A deadline found in one line of document text, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub due: String,
    pub source_line: String,
}

impl CandidateEvent {
    /// Key used to drop repeated deadlines: title and due text, concatenated as-is.
    pub fn dedup_key(&self) -> String {
        format!("{}{}", self.title, self.due)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default = "default_id")]
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One uploaded document. Events reference it through `document_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default = "default_id")]
    pub id: String,
    pub owner_id: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Row shape handed to the store for a batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub owner_id: String,
    pub document_id: String,
    pub title: String,
    pub kind: EventType,
    pub due_text: String,
}

impl NewEvent {
    pub fn from_candidate(owner_id: &str, document_id: &str, candidate: &CandidateEvent) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            document_id: document_id.to_string(),
            title: candidate.title.clone(),
            kind: candidate.kind,
            due_text: candidate.due.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEvent {
    #[serde(default = "default_id")]
    pub id: String,
    pub owner_id: String,
    pub document_id: String,
    pub title: String,
    // Rows written by older builds or other tools may lack a category.
    #[serde(rename = "type", default)]
    pub kind: Option<EventType>,
    pub due_text: String,
    pub created_at: DateTime<Utc>,
}

impl PersistedEvent {
    /// Category used for filtering and display: absent means `Other`.
    pub fn effective_type(&self) -> EventType {
        self.kind.unwrap_or(EventType::Other)
    }
}

/// Presentation-only pairing of a stored event with its interpreted due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    pub event: PersistedEvent,
    pub due_date: Option<NaiveDateTime>,
}
