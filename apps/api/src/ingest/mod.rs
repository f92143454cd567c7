// Upload ingestion: raw bytes in, one text blob out.

pub mod loader;

pub use loader::{load_document, LoadError, PdfBackend, PdfExtractBackend};
