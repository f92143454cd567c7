// Resume analysis: the end-to-end pipeline and the HTTP handlers that drive it.
// The pipeline is synchronous; handlers move it onto the blocking pool.

pub mod handlers;
pub mod pipeline;

pub use pipeline::{analyze_document, analyze_text};
