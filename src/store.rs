// File: src/store.rs
//! Storage boundary used by the upload flow and the dashboard.
//!
//! Implementations only need to honour row ownership: every read and delete is
//! scoped to one owner id. Inserts are one-shot; a failure aborts the request and
//! nothing is retried here.
use crate::model::{Account, DocumentRecord, NewEvent, PersistedEvent};
use anyhow::Result;

/// Rows fetched for one dashboard render.
pub const DEFAULT_FETCH_LIMIT: usize = 500;

pub trait EventStore: Send + Sync {
    /// Creates the parent row for one upload and returns it with its id.
    fn insert_document(&self, owner_id: &str, filename: &str) -> Result<DocumentRecord>;

    /// Batch insert. Every row must reference an existing document owned by the
    /// same owner; otherwise nothing is written.
    fn insert_events(&self, rows: &[NewEvent]) -> Result<Vec<PersistedEvent>>;

    /// At most `limit` rows for `owner_id`, newest created first.
    fn fetch_events(&self, owner_id: &str, limit: usize) -> Result<Vec<PersistedEvent>>;

    fn list_documents(&self, owner_id: &str) -> Result<Vec<DocumentRecord>>;

    /// Removes the document and, with it, all of its events.
    /// Returns how many events went away.
    fn delete_document(&self, owner_id: &str, document_id: &str) -> Result<usize>;

    fn find_or_create_account(&self, email: &str) -> Result<Account>;
}
