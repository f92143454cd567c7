// Resume classification: two independent (vectorizer, classifier) pairs evaluated from
// fitted artifacts loaded once at startup. Prediction is CPU-bound and synchronous.

pub mod artifacts;
pub mod forest;
pub mod linear;
pub mod service;
pub mod vectorizer;

pub use service::ClassificationService;
pub use vectorizer::{FeatureVector, Vectorizer};

/// A fitted classifier mapping a feature vector to one label.
///
/// Implementations are immutable after loading and shared across requests.
pub trait Classifier: Send + Sync {
    /// Width of the feature vectors the model was fitted on.
    fn n_features(&self) -> usize;
    fn classes(&self) -> &[String];
    /// The single top label.
    fn predict(&self, features: &FeatureVector) -> &str;
}
