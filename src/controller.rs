// File: src/controller.rs
//! Upload boundary: one document in, deadlines persisted, a summary out.
//!
//! Every failure aborts the request with an [`UploadError`]. The two storage
//! writes are not transactional: if the document row succeeds and the event
//! batch fails, the document stays behind with no events.
use crate::config::Config;
use crate::model::display::truncate_chars;
use crate::model::{CandidateEvent, NewEvent, extract};
use crate::session::Identity;
use crate::store::EventStore;
use crate::text::TextExtractor;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const FALLBACK_FILENAME: &str = "syllabus.pdf";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please log in first (syllabus-radar login <email>).")]
    Unauthenticated,
    #[error("No file received.")]
    MissingInput,
    #[error(
        "This document looks scanned/image-only (no selectable text). Try a text-based PDF or a plain text file."
    )]
    UnreadableContent,
    #[error("{0}")]
    Persistence(String),
    #[error("Server error: {0}")]
    Unexpected(String),
}

impl UploadError {
    /// HTTP-style status for the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            UploadError::Unauthenticated => 401,
            UploadError::MissingInput | UploadError::UnreadableContent => 400,
            UploadError::Persistence(_) | UploadError::Unexpected(_) => 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub identity: Option<Identity>,
    pub file: Option<UploadedFile>,
}

impl UploadRequest {
    /// Reads `path` into a request. A path that does not exist counts as no file.
    pub async fn from_path(identity: Option<Identity>, path: &Path) -> Result<Self, UploadError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    identity,
                    file: None,
                });
            }
            Err(e) => {
                return Err(unexpected(format!(
                    "could not read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            identity,
            file: Some(UploadedFile { name, bytes }),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub preview: String,
    pub document_id: String,
    pub events: Vec<CandidateEvent>,
}

#[derive(Clone)]
pub struct UploadController {
    pub store: Arc<dyn EventStore>,
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}

impl UploadController {
    pub fn new(
        store: Arc<dyn EventStore>,
        extractor: Arc<dyn TextExtractor>,
        config: Config,
    ) -> Self {
        Self {
            store,
            extractor,
            config,
        }
    }

    pub async fn handle(&self, request: UploadRequest) -> Result<UploadResponse, UploadError> {
        let identity = request.identity.ok_or(UploadError::Unauthenticated)?;
        let file = request.file.ok_or(UploadError::MissingInput)?;
        let safe_name = sanitize_filename(&file.name);

        // Text extraction is CPU bound and may be slow on large PDFs.
        let extractor = Arc::clone(&self.extractor);
        let name = safe_name.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&name, &file.bytes))
            .await
            .map_err(|e| unexpected(format!("text extraction task failed: {}", e)))?
            .map_err(|e| unexpected(e.to_string()))?;

        log::debug!(
            "Extracted {} characters from {} page(s) of {}",
            extracted.usable_chars(),
            extracted.pages_read,
            safe_name
        );
        if extracted.usable_chars() < self.config.min_text_chars {
            log::info!("Rejected {}: no usable text", safe_name);
            return Err(UploadError::UnreadableContent);
        }

        let events = extract(&extracted.text);

        let document = self
            .store
            .insert_document(&identity.user_id, &safe_name)
            .map_err(|e| {
                log::error!("DOCUMENT INSERT ERROR: {:#}", e);
                UploadError::Persistence(e.to_string())
            })?;

        if !events.is_empty() {
            let rows: Vec<NewEvent> = events
                .iter()
                .map(|e| NewEvent::from_candidate(&identity.user_id, &document.id, e))
                .collect();
            self.store.insert_events(&rows).map_err(|e| {
                log::error!("EVENTS INSERT ERROR: {:#}", e);
                UploadError::Persistence(e.to_string())
            })?;
        }

        log::info!(
            "Saved {} deadline(s) from {} as document {}",
            events.len(),
            safe_name,
            document.id
        );

        Ok(UploadResponse {
            message: format!("Saved! Found {} deadlines.", events.len()),
            preview: truncate_chars(&extracted.text, self.config.preview_chars).to_string(),
            document_id: document.id,
            events,
        })
    }
}

/// Keeps `[A-Za-z0-9_.-]`, replacing everything else with `_`.
pub fn sanitize_filename(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unexpected(msg: String) -> UploadError {
    log::error!("UPLOAD ERROR: {}", msg);
    UploadError::Unexpected(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("CS 101 (Fall).pdf"), "CS_101__Fall_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("été.pdf"), "_t_.pdf");
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(UploadError::Unauthenticated.status_code(), 401);
        assert_eq!(UploadError::MissingInput.status_code(), 400);
        assert_eq!(UploadError::UnreadableContent.status_code(), 400);
        assert_eq!(UploadError::Persistence("x".into()).status_code(), 500);
        assert_eq!(UploadError::Unexpected("x".into()).status_code(), 500);
    }
}
