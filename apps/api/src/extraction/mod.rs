// Text normalization and pattern-based field extraction.
// Cleaning feeds the classifiers only; field rules always run on the raw text.

pub mod catalog;
pub mod cleaner;
pub mod fields;

pub use cleaner::NormalizedText;
pub use fields::extract_fields;
