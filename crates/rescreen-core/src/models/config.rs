//! Configuration structures for the screening pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ScreenError;

/// Main configuration for rescreen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Model artifact locations.
    pub models: ModelConfig,

    /// Document reading configuration.
    pub reader: ReaderConfig,
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Vectorizer artifact file name (TF-IDF JSON export).
    pub vectorizer: String,

    /// Classifier artifact file name (`.onnx` or linear `.json` export).
    pub classifier: String,

    /// Number of CPU threads for ONNX inference.
    pub num_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            vectorizer: "tfidf.json".to_string(),
            classifier: "clf.onnx".to_string(),
            num_threads: 4,
        }
    }
}

impl ModelConfig {
    /// Full path to the vectorizer artifact.
    pub fn vectorizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.vectorizer)
    }

    /// Full path to the classifier artifact.
    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join(&self.classifier)
    }
}

/// Document reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Retry encrypted PDFs with an empty password before giving up.
    pub decrypt_empty_password: bool,

    /// Reject uploads larger than this many megabytes (0 = unlimited).
    pub max_file_size_mb: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            max_file_size_mb: 200,
        }
    }
}

impl ReaderConfig {
    /// Size limit in bytes, if any.
    pub fn max_bytes(&self) -> Option<usize> {
        (self.max_file_size_mb > 0).then(|| self.max_file_size_mb * 1024 * 1024)
    }
}

impl ScreenConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ScreenError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ScreenError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ScreenError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ScreenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
