//! Model artifact loading. Four JSON files, read once at startup; any failure is fatal.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::classification::forest::{RandomForestArtifact, RandomForestClassifier};
use crate::classification::linear::{LinearArtifact, LinearClassifier};
use crate::classification::vectorizer::{TfidfArtifact, TfidfVectorizer};
use crate::classification::Classifier;

pub const CATEGORIZATION_VECTORIZER: &str = "tfidf_vectorizer_categorization.json";
pub const CATEGORIZATION_CLASSIFIER: &str = "rf_classifier_categorization.json";
pub const JOB_RECOMMENDATION_VECTORIZER: &str = "tfidf_vectorizer_job_recommendation.json";
pub const JOB_RECOMMENDATION_CLASSIFIER: &str = "rf_classifier_job_recommendation.json";

/// The models cannot be served. Raised only while loading.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact {} could not be read: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model artifact {} is inconsistent: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("{pair} classifier expects {classifier} features but its vectorizer produces {vectorizer}")]
    WidthMismatch {
        pair: &'static str,
        vectorizer: usize,
        classifier: usize,
    },
}

/// Classifier artifacts are tagged by model family.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    RandomForest(RandomForestArtifact),
    Linear(LinearArtifact),
}

impl ClassifierArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, String> {
        let classifier: Box<dyn Classifier> = match self {
            ClassifierArtifact::RandomForest(artifact) => {
                Box::new(RandomForestClassifier::from_artifact(artifact)?)
            }
            ClassifierArtifact::Linear(artifact) => {
                Box::new(LinearClassifier::from_artifact(artifact)?)
            }
        };
        Ok(classifier)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, ModelError> {
    let artifact: TfidfArtifact = read_json(path)?;
    let vectorizer = TfidfVectorizer::from_artifact(artifact).map_err(|reason| {
        ModelError::Invalid {
            path: path.to_path_buf(),
            reason,
        }
    })?;
    debug!("Loaded vectorizer {}", path.display());
    Ok(vectorizer)
}

pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let artifact: ClassifierArtifact = read_json(path)?;
    let classifier = artifact.into_classifier().map_err(|reason| ModelError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        "Loaded classifier {} ({} classes)",
        path.display(),
        classifier.classes().len()
    );
    Ok(classifier)
}
