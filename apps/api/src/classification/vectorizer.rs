//! TF-IDF vectorizer evaluated from a fitted artifact.
//!
//! Mirrors the fitted transform: lowercase -> regex tokens -> stop words -> word n-grams ->
//! counts -> (binary | sublinear) tf -> idf weighting -> normalization.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

/// Sparse feature vector of fixed width. Indices are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    width: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from unordered `(index, value)` pairs. Zero values are dropped.
    pub fn from_entries(width: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, v)| v != 0.0);
        entries.sort_by_key(|&(i, _)| i);
        Self { width, entries }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Value at `index`; anything not stored is zero.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }
}

/// Turns normalized text into a fixed-width feature vector.
pub trait Vectorizer: Send + Sync {
    fn width(&self) -> usize;
    fn transform(&self, text: &str) -> FeatureVector;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    width: usize,
    lowercase: bool,
    token_re: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    /// Validates an artifact and compiles its token pattern.
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, String> {
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }
        if artifact.vocabulary.is_empty() {
            return Err("vocabulary is empty".to_string());
        }

        let max_index = artifact.vocabulary.values().copied().max().unwrap_or(0);
        let width = match &artifact.idf {
            Some(idf) => idf.len(),
            None => max_index + 1,
        };
        if max_index >= width {
            return Err(format!(
                "vocabulary index {max_index} is out of range for {width} idf weights"
            ));
        }

        let token_re = Regex::new(&artifact.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {e}"))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            width,
            lowercase: artifact.lowercase,
            token_re,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.unwrap_or_default().into_iter().collect(),
            binary: artifact.binary,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect()
    }

    fn count_terms(&self, tokens: &[&str]) -> HashMap<usize, f64> {
        let (min_n, max_n) = self.ngram_range;
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }
        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn width(&self) -> usize {
        self.width
    }

    fn transform(&self, text: &str) -> FeatureVector {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let tokens = self.tokens(text);
        let mut weights: Vec<(usize, f64)> = self
            .count_terms(&tokens)
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                let idf = self.idf.as_ref().map_or(1.0, |idf| idf[index]);
                (index, tf * idf)
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }

        FeatureVector::from_entries(self.width, weights)
    }
}
