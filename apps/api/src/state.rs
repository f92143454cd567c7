use std::sync::Arc;

use crate::classification::ClassificationService;
use crate::config::Config;
use crate::ingest::PdfBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Both model pairs, loaded once in `main` and read concurrently without locks.
    pub classifier: Arc<ClassificationService>,
    /// PDF text backend. Default: `PdfExtractBackend`.
    pub pdf: Arc<dyn PdfBackend>,
    pub config: Config,
}
