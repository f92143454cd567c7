//! The two prediction pipelines: résumé category and recommended job title.
//!
//! Both pairs see the same cleaned text and share nothing else. The service is built once
//! in `main` and handed to handlers behind an `Arc`.

use std::path::Path;

use tracing::info;

use crate::classification::artifacts::{
    load_classifier, load_vectorizer, ModelError, CATEGORIZATION_CLASSIFIER,
    CATEGORIZATION_VECTORIZER, JOB_RECOMMENDATION_CLASSIFIER, JOB_RECOMMENDATION_VECTORIZER,
};
use crate::classification::{Classifier, Vectorizer};
use crate::extraction::NormalizedText;
use crate::models::analysis::ClassificationResult;

/// A vectorizer and the classifier fitted on its output.
pub struct ModelPair {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl ModelPair {
    /// Rejects a classifier fitted on a different feature width than the vectorizer emits.
    pub fn new(
        pair: &'static str,
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ModelError> {
        if vectorizer.width() != classifier.n_features() {
            return Err(ModelError::WidthMismatch {
                pair,
                vectorizer: vectorizer.width(),
                classifier: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    fn load(
        pair: &'static str,
        model_dir: &Path,
        vectorizer_file: &str,
        classifier_file: &str,
    ) -> Result<Self, ModelError> {
        let vectorizer = load_vectorizer(&model_dir.join(vectorizer_file))?;
        let classifier = load_classifier(&model_dir.join(classifier_file))?;
        Self::new(pair, Box::new(vectorizer), classifier)
    }

    pub fn predict(&self, text: &NormalizedText) -> String {
        let features = self.vectorizer.transform(text.as_str());
        self.classifier.predict(&features).to_string()
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }
}

pub struct ClassificationService {
    categorization: ModelPair,
    job_recommendation: ModelPair,
}

impl ClassificationService {
    pub fn new(categorization: ModelPair, job_recommendation: ModelPair) -> Self {
        Self {
            categorization,
            job_recommendation,
        }
    }

    /// Reads all four artifacts from `model_dir`. Any failure means the service cannot start.
    pub fn load(model_dir: &Path) -> Result<Self, ModelError> {
        let categorization = ModelPair::load(
            "categorization",
            model_dir,
            CATEGORIZATION_VECTORIZER,
            CATEGORIZATION_CLASSIFIER,
        )?;
        let job_recommendation = ModelPair::load(
            "job recommendation",
            model_dir,
            JOB_RECOMMENDATION_VECTORIZER,
            JOB_RECOMMENDATION_CLASSIFIER,
        )?;

        let service = Self::new(categorization, job_recommendation);
        info!(
            "Models loaded from {}: {} categories, {} job titles",
            model_dir.display(),
            service.categories().len(),
            service.job_titles().len()
        );
        Ok(service)
    }

    pub fn categorize(&self, text: &str) -> String {
        self.categorization.predict(&NormalizedText::from_raw(text))
    }

    pub fn recommend(&self, text: &str) -> String {
        self.job_recommendation
            .predict(&NormalizedText::from_raw(text))
    }

    /// Runs both pairs over one cleaning pass of `text`.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let cleaned = NormalizedText::from_raw(text);
        ClassificationResult {
            category: self.categorization.predict(&cleaned),
            recommended_job: self.job_recommendation.predict(&cleaned),
        }
    }

    pub fn categories(&self) -> &[String] {
        self.categorization.labels()
    }

    pub fn job_titles(&self) -> &[String] {
        self.job_recommendation.labels()
    }
}
