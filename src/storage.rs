// Manages local file storage for accounts, documents and deadlines.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to DocumentRecord, PersistedEvent or Account serialization require
// incrementing STORE_VERSION below and adding a migration arm.
use crate::context::AppContext;
use crate::model::{Account, DocumentRecord, NewEvent, PersistedEvent};
use crate::store::EventStore;
use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// Version history:
// - v1: accounts, documents, events in a single file
const STORE_VERSION: u32 = 1;

/// Wrapper struct for versioned local storage
#[derive(Serialize, Deserialize, Default)]
struct StoreData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    documents: Vec<DocumentRecord>,
    #[serde(default)]
    events: Vec<PersistedEvent>,
}

/// JSON-file backed [`EventStore`].
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self {
            path: ctx.get_store_path()?,
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on the sidecar lock file.
    /// Not reentrant: `f` must not call back into `with_lock` for the same path.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn read_unlocked(path: &Path) -> Result<StoreData> {
        if !path.exists() {
            return Ok(StoreData {
                version: STORE_VERSION,
                ..StoreData::default()
            });
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file '{}'", path.display()))?;
        let data: StoreData = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse store file '{}'", path.display()))?;
        Self::check_version(data)
    }

    fn check_version(mut data: StoreData) -> Result<StoreData> {
        if data.version > STORE_VERSION {
            return Err(anyhow::anyhow!(
                "Store version {} is newer than supported version {}. Please upgrade syllabus-radar.",
                data.version,
                STORE_VERSION
            ));
        }
        if data.version < STORE_VERSION {
            log::info!(
                "Migrating local store from v{} to v{}",
                data.version,
                STORE_VERSION
            );
            // v0 files predate the version field; the layout is otherwise identical.
            data.version = STORE_VERSION;
        }
        Ok(data)
    }

    fn write_unlocked(path: &Path, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        Self::atomic_write(path, json)
    }

    fn read(&self) -> Result<StoreData> {
        Self::with_lock(&self.path, || Self::read_unlocked(&self.path))
    }

    /// Read-modify-write under one lock. Nothing is written if `f` fails.
    fn update<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreData) -> Result<T>,
    {
        Self::with_lock(&self.path, || {
            let mut data = Self::read_unlocked(&self.path)?;
            let out = f(&mut data)?;
            Self::write_unlocked(&self.path, &data)?;
            Ok(out)
        })
    }
}

impl EventStore for LocalStorage {
    fn insert_document(&self, owner_id: &str, filename: &str) -> Result<DocumentRecord> {
        self.update(|data| {
            let doc = DocumentRecord {
                id: Uuid::new_v4().to_string(),
                owner_id: owner_id.to_string(),
                filename: filename.to_string(),
                created_at: Utc::now(),
            };
            data.documents.push(doc.clone());
            Ok(doc)
        })
    }

    fn insert_events(&self, rows: &[NewEvent]) -> Result<Vec<PersistedEvent>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        self.update(|data| {
            for row in rows {
                let parent_ok = data
                    .documents
                    .iter()
                    .any(|d| d.id == row.document_id && d.owner_id == row.owner_id);
                if !parent_ok {
                    anyhow::bail!(
                        "Event '{}' references unknown document {}",
                        row.title,
                        row.document_id
                    );
                }
            }

            let created_at = Utc::now();
            let inserted: Vec<PersistedEvent> = rows
                .iter()
                .map(|row| PersistedEvent {
                    id: Uuid::new_v4().to_string(),
                    owner_id: row.owner_id.clone(),
                    document_id: row.document_id.clone(),
                    title: row.title.clone(),
                    kind: Some(row.kind),
                    due_text: row.due_text.clone(),
                    created_at,
                })
                .collect();
            data.events.extend(inserted.iter().cloned());
            Ok(inserted)
        })
    }

    fn fetch_events(&self, owner_id: &str, limit: usize) -> Result<Vec<PersistedEvent>> {
        let data = self.read()?;
        let mut events: Vec<PersistedEvent> = data
            .events
            .into_iter()
            .filter(|e| e.owner_id == owner_id)
            .collect();
        // Stable: rows from the same batch keep their insertion order.
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }

    fn list_documents(&self, owner_id: &str) -> Result<Vec<DocumentRecord>> {
        let data = self.read()?;
        let mut docs: Vec<DocumentRecord> = data
            .documents
            .into_iter()
            .filter(|d| d.owner_id == owner_id)
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    fn delete_document(&self, owner_id: &str, document_id: &str) -> Result<usize> {
        self.update(|data| {
            let before = data.documents.len();
            data.documents
                .retain(|d| !(d.id == document_id && d.owner_id == owner_id));
            if data.documents.len() == before {
                anyhow::bail!("No document with id {}", document_id);
            }

            let live: HashSet<&str> = data.documents.iter().map(|d| d.id.as_str()).collect();
            let events_before = data.events.len();
            data.events.retain(|e| live.contains(e.document_id.as_str()));
            Ok(events_before - data.events.len())
        })
    }

    fn find_or_create_account(&self, email: &str) -> Result<Account> {
        let email = email.trim().to_lowercase();
        self.update(|data| {
            if let Some(existing) = data.accounts.iter().find(|a| a.email == email) {
                return Ok(existing.clone());
            }
            let account = Account {
                id: Uuid::new_v4().to_string(),
                email: email.clone(),
                created_at: Utc::now(),
            };
            log::info!("Created account for {}", email);
            data.accounts.push(account.clone());
            Ok(account)
        })
    }
}
