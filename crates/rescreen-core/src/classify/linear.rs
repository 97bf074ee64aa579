//! One-vs-rest linear classifier loaded from a JSON export.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{Classifier, FeatureVector};
use crate::error::{ModelError, Result, ScreenError};

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// Linear decision functions, one row per class.
///
/// A two-class model may carry a single row, in which case a positive
/// decision value selects the second class.
#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    dimension: usize,
}

impl LinearClassifier {
    /// Load a classifier from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::Missing(path.to_path_buf()));
        }

        debug!("Loading linear classifier from: {}", path.display());
        let deserialize_error = |reason: String| ModelError::Deserialize {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| deserialize_error(e.to_string()))?;
        let artifact: LinearArtifact =
            serde_json::from_str(&content).map_err(|e| deserialize_error(e.to_string()))?;

        Self::from_parts(artifact.classes, artifact.coef, artifact.intercept)
    }

    /// Build a classifier from its weights, checking that the shapes agree.
    pub fn from_parts(
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> std::result::Result<Self, ModelError> {
        let binary = classes.len() == 2 && coef.len() == 1;
        if classes.is_empty() || (!binary && coef.len() != classes.len()) {
            return Err(ModelError::Inconsistent(format!(
                "{} classes but {} coefficient rows",
                classes.len(),
                coef.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(ModelError::Inconsistent(format!(
                "{} coefficient rows but {} intercepts",
                coef.len(),
                intercept.len()
            )));
        }

        let dimension = coef[0].len();
        if let Some(row) = coef.iter().position(|r| r.len() != dimension) {
            return Err(ModelError::Inconsistent(format!(
                "coefficient row {} has {} columns, expected {}",
                row,
                coef[row].len(),
                dimension
            )));
        }

        debug!("Linear classifier: {} classes, {} features", classes.len(), dimension);

        Ok(Self {
            classes,
            coef,
            intercept,
            dimension,
        })
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Decision value per coefficient row.
    pub fn decision_function(&self, features: &[f32]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| {
                row.iter()
                    .zip(features)
                    .map(|(w, x)| w * f64::from(*x))
                    .sum::<f64>()
                    + b
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn input_dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }

    fn classify(&self, features: &FeatureVector) -> Result<i64> {
        if features.dimension() != self.dimension {
            return Err(ScreenError::Inference(
                rescreen_inference::InferenceError::InvalidInput(format!(
                    "expected {} features, got {}",
                    self.dimension,
                    features.dimension()
                )),
            ));
        }

        let scores = self.decision_function(features.as_slice());

        if scores.len() == 1 {
            return Ok(if scores[0] > 0.0 { self.classes[1] } else { self.classes[0] });
        }

        // first maximum wins on ties
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}
