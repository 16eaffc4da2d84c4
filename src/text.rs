//! Text extraction from uploaded documents.
//!
//! PDFs are read page by page and only the first few pages are kept; plain
//! text files pass through. Scanned, image-only PDFs come back (nearly) empty,
//! which the upload flow reports as unusable.

use std::path::Path;
use thiserror::Error;

/// Pages read from a PDF unless configured otherwise.
pub const DEFAULT_MAX_PAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    /// .pdf
    Pdf,
    /// .txt, .text, .md
    PlainText,
    Unsupported,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported format: .{0}")]
    UnsupportedFormat(String),
    #[error("Extraction failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    pub text: String,
    pub pages_read: usize,
}

impl ExtractedText {
    /// Characters left once surrounding whitespace is ignored.
    pub fn usable_chars(&self) -> usize {
        crate::model::extractor::trim_line(&self.text).chars().count()
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedText, ExtractError>;
}

pub fn detect_format(file_name: &str) -> SupportedFormat {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => SupportedFormat::Pdf,
        "txt" | "text" | "md" => SupportedFormat::PlainText,
        _ => SupportedFormat::Unsupported,
    }
}

/// Extractor used by the real upload path.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    pub max_pages: usize,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl DocumentExtractor {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        // pdf-extract can panic on malformed PDFs
        let owned = bytes.to_vec();
        let result =
            std::panic::catch_unwind(move || pdf_extract::extract_text_from_mem_by_pages(&owned));

        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(ExtractError::Failed(format!("PDF: {}", e))),
            Err(_) => {
                return Err(ExtractError::Failed(
                    "PDF extraction panicked (malformed file)".to_string(),
                ));
            }
        };

        Ok(join_pages(pages, self.max_pages))
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        match detect_format(file_name) {
            SupportedFormat::Pdf => self.extract_pdf(bytes),
            SupportedFormat::PlainText => Ok(ExtractedText {
                text: String::from_utf8_lossy(bytes).into_owned(),
                pages_read: 1,
            }),
            SupportedFormat::Unsupported => {
                let ext = Path::new(file_name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string();
                Err(ExtractError::UnsupportedFormat(ext))
            }
        }
    }
}

/// Keeps the first `max_pages` pages, separated by a blank line.
fn join_pages(pages: Vec<String>, max_pages: usize) -> ExtractedText {
    let kept: Vec<String> = pages.into_iter().take(max_pages).collect();
    ExtractedText {
        pages_read: kept.len(),
        text: kept.join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(detect_format("Syllabus.PDF"), SupportedFormat::Pdf);
        assert_eq!(detect_format("notes.md"), SupportedFormat::PlainText);
        assert_eq!(detect_format("scan.png"), SupportedFormat::Unsupported);
        assert_eq!(detect_format("noext"), SupportedFormat::Unsupported);
    }

    #[test]
    fn page_limit_applies() {
        let pages: Vec<String> = (1..=8).map(|i| format!("page {}", i)).collect();
        let out = join_pages(pages, 5);
        assert_eq!(out.pages_read, 5);
        assert!(out.text.starts_with("page 1\n\npage 2"));
        assert!(out.text.ends_with("page 5"));
        assert!(!out.text.contains("page 6"));
    }

    #[test]
    fn plain_text_passes_through() {
        let x = DocumentExtractor::default();
        let out = x.extract("week1.txt", b"  Quiz 1 on 9/12  ").unwrap();
        assert_eq!(out.text, "  Quiz 1 on 9/12  ");
        assert_eq!(out.usable_chars(), 14);
    }

    #[test]
    fn byte_order_mark_is_not_usable_text() {
        let x = DocumentExtractor::default();
        let out = x.extract("week1.txt", "\u{FEFF}Quiz 1\n".as_bytes()).unwrap();
        assert_eq!(out.usable_chars(), 6);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let x = DocumentExtractor::default();
        let err = x.extract("photo.jpg", b"\xff\xd8").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref e) if e == "jpg"));
    }

    #[test]
    fn garbage_pdf_fails_cleanly() {
        let x = DocumentExtractor::default();
        assert!(x.extract("broken.pdf", b"not a pdf at all").is_err());
    }
}
