//! Document loader — turns an uploaded resume into one text blob.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::document::{MediaKind, RawDocument};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Resume is not valid UTF-8 text: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("Resume is not a readable PDF: {0}")]
    Pdf(String),
}

/// Source of per-page text for a PDF payload.
///
/// Pages must come back in page order. Implementations must not insert separators;
/// the loader owns how pages are joined.
pub trait PdfBackend: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, LoadError>;
}

const PAGE_BREAK: &str = "\n\n";

/// Production backend built on `pdf-extract`.
pub struct PdfExtractBackend;

impl PdfBackend for PdfExtractBackend {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
        // pdf-extract panics on some malformed files instead of returning an error.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));
        match outcome {
            Ok(Ok(pages)) => Ok(pages.into_iter().map(strip_page_break).collect()),
            Ok(Err(e)) => Err(LoadError::Pdf(e.to_string())),
            Err(_) => {
                warn!("PDF parser panicked on a {} byte upload", bytes.len());
                Err(LoadError::Pdf("the PDF structure is corrupt".to_string()))
            }
        }
    }
}

/// pdf-extract opens every page with a blank line; the page text proper follows it.
fn strip_page_break(page: String) -> String {
    match page.strip_prefix(PAGE_BREAK) {
        Some(text) => text.to_string(),
        None => page,
    }
}

/// Loads a raw document into text.
///
/// Plain text is decoded as UTF-8 verbatim. PDF pages are concatenated in page order with
/// nothing inserted between them, so a word split across a page break stays glued together.
pub fn load_document(document: &RawDocument, pdf: &dyn PdfBackend) -> Result<String, LoadError> {
    match document.kind {
        MediaKind::PlainText => {
            let text = String::from_utf8(document.payload.to_vec())?;
            debug!("Decoded plain-text resume ({} bytes)", document.payload.len());
            Ok(text)
        }
        MediaKind::Pdf => {
            if document.payload.is_empty() {
                return Err(LoadError::Pdf("the file is empty".to_string()));
            }
            let pages = pdf.page_texts(&document.payload)?;
            debug!("Extracted text from {} PDF page(s)", pages.len());
            Ok(pages.concat())
        }
    }
}
