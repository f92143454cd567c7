use serde::Deserialize;

use crate::classification::forest::argmax;
use crate::classification::vectorizer::FeatureVector;
use crate::classification::Classifier;

/// On-disk form of a fitted linear model (logistic regression, linear SVM, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct LinearArtifact {
    pub classes: Vec<String>,
    /// One row per class, or a single row for a binary model.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, String> {
        let n_classes = artifact.classes.len();
        let n_rows = artifact.coef.len();
        let binary = n_classes == 2 && n_rows == 1;
        if n_classes < 2 {
            return Err(format!("linear model needs at least 2 classes, got {n_classes}"));
        }
        if !binary && n_rows != n_classes {
            return Err(format!(
                "{n_rows} coefficient rows do not fit {n_classes} classes"
            ));
        }
        if artifact.intercept.len() != n_rows {
            return Err(format!(
                "{} intercepts for {n_rows} coefficient rows",
                artifact.intercept.len()
            ));
        }
        let n_features = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err("coefficient rows have different widths".to_string());
        }
        Ok(Self {
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            n_features,
        })
    }

    /// Raw decision scores, one per coefficient row.
    pub fn decision_function(&self, features: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| {
                features
                    .entries()
                    .iter()
                    .filter(|(i, _)| *i < row.len())
                    .map(|&(i, x)| row[i] * x)
                    .sum::<f64>()
                    + b
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> &str {
        let scores = self.decision_function(features);
        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        };
        &self.classes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn linear(value: serde_json::Value) -> LinearClassifier {
        LinearClassifier::from_artifact(serde_json::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn test_multiclass_picks_highest_score() {
        let model = linear(json!({
            "classes": ["HR", "Data Science", "Web Dev"],
            "coef": [[0.0, 0.0], [2.0, -1.0], [-1.0, 2.0]],
            "intercept": [0.1, 0.0, 0.0]
        }));
        let ds = FeatureVector::from_entries(2, vec![(0, 1.0)]);
        let web = FeatureVector::from_entries(2, vec![(1, 1.0)]);
        let none = FeatureVector::from_entries(2, vec![]);
        assert_eq!(model.predict(&ds), "Data Science");
        assert_eq!(model.predict(&web), "Web Dev");
        assert_eq!(model.predict(&none), "HR");
    }

    #[test]
    fn test_binary_uses_sign_of_single_row() {
        let model = linear(json!({
            "classes": ["Other", "Engineer"],
            "coef": [[1.5]],
            "intercept": [-0.5]
        }));
        assert_eq!(
            model.predict(&FeatureVector::from_entries(1, vec![(0, 1.0)])),
            "Engineer"
        );
        assert_eq!(
            model.predict(&FeatureVector::from_entries(1, vec![(0, 0.2)])),
            "Other"
        );
    }

    #[test]
    fn test_binary_zero_score_is_negative_class() {
        let model = linear(json!({
            "classes": ["Other", "Engineer"],
            "coef": [[2.0]],
            "intercept": [-1.0]
        }));
        assert_eq!(
            model.predict(&FeatureVector::from_entries(1, vec![(0, 0.5)])),
            "Other"
        );
    }

    #[test]
    fn test_single_class_model_rejected() {
        let artifact: LinearArtifact = serde_json::from_value(json!({
            "classes": ["Only"],
            "coef": [[1.0]],
            "intercept": [0.0]
        }))
        .unwrap();
        let err = LinearClassifier::from_artifact(artifact).unwrap_err();
        assert!(err.contains("at least 2 classes"));
    }

    #[test]
    fn test_row_count_must_match_classes() {
        let artifact: LinearArtifact = serde_json::from_value(json!({
            "classes": ["a", "b", "c"],
            "coef": [[1.0], [2.0]],
            "intercept": [0.0, 0.0]
        }))
        .unwrap();
        assert!(LinearClassifier::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let artifact: LinearArtifact = serde_json::from_value(json!({
            "classes": ["a", "b"],
            "coef": [[1.0, 2.0], [2.0]],
            "intercept": [0.0, 0.0]
        }))
        .unwrap();
        let err = LinearClassifier::from_artifact(artifact).unwrap_err();
        assert!(err.contains("widths"));
    }
}
