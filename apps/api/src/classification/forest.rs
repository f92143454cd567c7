//! Random-forest classifier evaluated from exported decision-tree arrays.

use serde::Deserialize;

use crate::classification::vectorizer::FeatureVector;
use crate::classification::Classifier;

/// Child index marking a leaf node.
const LEAF: i64 = -1;

/// One fitted tree in parallel-array form. Node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (sample counts or fractions), one column per class.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n_nodes
            || self.feature.len() != n_nodes
            || self.threshold.len() != n_nodes
            || self.value.len() != n_nodes
        {
            return Err("tree arrays have mismatched lengths".to_string());
        }

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if self.value[node].len() != n_classes {
                    return Err(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        self.value[node].len()
                    ));
                }
                continue;
            }
            // Children always come after their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child as usize >= n_nodes {
                    return Err(format!("node {node} has invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {node} splits on invalid feature {feature}"));
            }
        }
        Ok(())
    }

    /// Class probabilities at the leaf reached by `features`.
    fn leaf_distribution(&self, features: &FeatureVector) -> Vec<f64> {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            // Thresholds were fitted on f32 inputs.
            let x = features.get(self.feature[node] as usize) as f32 as f64;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let weights = &self.value[node];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            weights.clone()
        }
    }
}

/// On-disk form of a fitted random forest.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForestArtifact {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug)]
pub struct RandomForestClassifier {
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    pub fn from_artifact(artifact: RandomForestArtifact) -> Result<Self, String> {
        if artifact.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if artifact.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate(artifact.n_features, artifact.classes.len())
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(Self {
            classes: artifact.classes,
            n_features: artifact.n_features,
            trees: artifact.trees,
        })
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }
}

impl Classifier for RandomForestClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> &str {
        let proba = self.predict_proba(features);
        &self.classes[argmax(&proba)]
    }
}

/// Index of the first maximum.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Splits on feature 0 at 0.5: left leaf favours "Data Science", right leaf "Web Dev".
    fn stump(left: [f64; 2], right: [f64; 2]) -> serde_json::Value {
        json!({
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [0, -2, -2],
            "threshold": [0.5, -2.0, -2.0],
            "value": [[0.0, 0.0], left, right]
        })
    }

    fn forest(trees: Vec<serde_json::Value>) -> RandomForestClassifier {
        let artifact: RandomForestArtifact = serde_json::from_value(json!({
            "classes": ["Data Science", "Web Dev"],
            "n_features": 2,
            "trees": trees
        }))
        .unwrap();
        RandomForestClassifier::from_artifact(artifact).unwrap()
    }

    fn features(x0: f64) -> FeatureVector {
        FeatureVector::from_entries(2, vec![(0, x0)])
    }

    #[test]
    fn test_single_tree_routes_on_threshold() {
        let f = forest(vec![stump([8.0, 2.0], [1.0, 9.0])]);
        assert_eq!(f.predict(&features(0.2)), "Data Science");
        assert_eq!(f.predict(&features(0.9)), "Web Dev");
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let f = forest(vec![stump([1.0, 0.0], [0.0, 1.0])]);
        assert_eq!(f.predict(&features(0.5)), "Data Science");
    }

    #[test]
    fn test_missing_feature_counts_as_zero() {
        let f = forest(vec![stump([1.0, 0.0], [0.0, 1.0])]);
        let empty = FeatureVector::from_entries(2, vec![]);
        assert_eq!(f.predict(&empty), "Data Science");
    }

    #[test]
    fn test_probabilities_are_averaged_over_normalized_leaves() {
        // counts differ in scale; each leaf is normalized before averaging
        let f = forest(vec![
            stump([30.0, 10.0], [0.0, 1.0]),
            stump([1.0, 3.0], [0.0, 1.0]),
        ]);
        let proba = f.predict_proba(&features(0.0));
        assert!((proba[0] - 0.5).abs() < 1e-12);
        assert!((proba[1] - 0.5).abs() < 1e-12);
        // tie goes to the first class
        assert_eq!(f.predict(&features(0.0)), "Data Science");
    }

    #[test]
    fn test_majority_of_trees_wins() {
        let f = forest(vec![
            stump([0.0, 1.0], [0.0, 1.0]),
            stump([0.0, 1.0], [0.0, 1.0]),
            stump([1.0, 0.0], [1.0, 0.0]),
        ]);
        assert_eq!(f.predict(&features(0.1)), "Web Dev");
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let artifact: RandomForestArtifact = serde_json::from_value(json!({
            "classes": ["a", "b"],
            "n_features": 1,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            }]
        }))
        .unwrap();
        let err = RandomForestClassifier::from_artifact(artifact).unwrap_err();
        assert!(err.starts_with("tree 0"));
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        let artifact: RandomForestArtifact = serde_json::from_value(json!({
            "classes": ["Data Science", "Web Dev"],
            "n_features": 0,
            "trees": [stump([1.0, 0.0], [0.0, 1.0])]
        }))
        .unwrap();
        assert!(RandomForestClassifier::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_backward_child_rejected() {
        let artifact: RandomForestArtifact = serde_json::from_value(json!({
            "classes": ["a"],
            "n_features": 1,
            "trees": [{
                "children_left": [0],
                "children_right": [0],
                "feature": [0],
                "threshold": [0.5],
                "value": [[1.0]]
            }]
        }))
        .unwrap();
        assert!(RandomForestClassifier::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_argmax_first_of_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[0.0]), 0);
    }
}
