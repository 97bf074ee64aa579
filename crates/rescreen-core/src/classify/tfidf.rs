//! TF-IDF vectorizer loaded from a JSON export.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

use super::{FeatureTransformer, FeatureVector};
use crate::error::{ModelError, Result};

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// On-disk layout of a fitted TF-IDF vectorizer.
#[derive(Debug, Deserialize)]
struct TfidfArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    binary: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default = "default_token_pattern")]
    token_pattern: String,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
}

/// Term-weighting vectorizer replaying a fitted TF-IDF model.
///
/// Every parameter comes from the artifact; nothing is refit. Terms outside the
/// vocabulary are ignored, so the output length is always `idf.len()`.
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    sublinear_tf: bool,
    binary: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
    token_pattern: Regex,
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    /// Load a vectorizer from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::Missing(path.to_path_buf()));
        }

        debug!("Loading TF-IDF vectorizer from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Deserialize {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json_at(&content, path)
    }

    /// Load a vectorizer from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, ModelError> {
        Self::from_json_at(json, Path::new("<memory>"))
    }

    fn from_json_at(json: &str, path: &Path) -> std::result::Result<Self, ModelError> {
        let deserialize_error = |reason: String| ModelError::Deserialize {
            path: PathBuf::from(path),
            reason,
        };

        let artifact: TfidfArtifact =
            serde_json::from_str(json).map_err(|e| deserialize_error(e.to_string()))?;

        if artifact.idf.is_empty() {
            return Err(ModelError::Inconsistent("vectorizer has an empty idf vector".to_string()));
        }

        let dimension = artifact.idf.len();
        if let Some((term, &col)) = artifact.vocabulary.iter().find(|(_, col)| **col >= dimension) {
            return Err(ModelError::Inconsistent(format!(
                "term '{}' maps to column {} but the vectorizer has {} columns",
                term, col, dimension
            )));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::Inconsistent(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern)
            .map_err(|e| deserialize_error(format!("token_pattern: {}", e)))?;

        debug!(
            "Vectorizer: {} terms, {} columns, ngram_range=({}, {}), sublinear_tf={}",
            artifact.vocabulary.len(),
            dimension,
            min_n,
            max_n,
            artifact.sublinear_tf
        );

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
            token_pattern,
            ngram_range: artifact.ngram_range,
        })
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary hit counts per column.
    fn term_counts(&self, text: &str) -> HashMap<usize, f64> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;

        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&col) = self.vocabulary.get(&term) {
                    *counts.entry(col).or_default() += 1.0;
                }
            }
        }

        trace!("{} tokens, {} distinct vocabulary hits", tokens.len(), counts.len());
        counts
    }
}

impl FeatureTransformer for TfidfVectorizer {
    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn vectorize(&self, text: &str) -> Result<FeatureVector> {
        let mut weights = vec![0.0f64; self.idf.len()];

        for (col, count) in self.term_counts(text) {
            let tf = if self.binary { 1.0 } else { count };
            let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
            weights[col] = tf * self.idf[col];
        }

        let scale = match self.norm {
            Some(Norm::L2) => weights.iter().map(|w| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|w| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            weights.iter_mut().for_each(|w| *w /= scale);
        }

        Ok(FeatureVector::new(weights.into_iter().map(|w| w as f32).collect()))
    }
}
