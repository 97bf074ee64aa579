//! Loading the vectorizer and classifier pair.

use std::path::Path;

use tracing::{debug, info};

#[cfg(feature = "native")]
use rescreen_inference::OrtBackend;
#[cfg(all(feature = "tract", not(feature = "native")))]
use rescreen_inference::TractBackend;

use super::{Classifier, FeatureTransformer, FeatureVector, LinearClassifier, OnnxClassifier, TfidfVectorizer};
use crate::error::{ModelError, Result};
use crate::models::config::ModelConfig;

/// Classifier artifact, selected by file extension at load time.
pub enum LoadedClassifier {
    /// ONNX graph run by ONNX Runtime.
    #[cfg(feature = "native")]
    Onnx(OnnxClassifier<OrtBackend>),

    /// ONNX graph run by tract.
    #[cfg(all(feature = "tract", not(feature = "native")))]
    Tract(OnnxClassifier<TractBackend>),

    /// Linear model exported as JSON.
    Linear(LinearClassifier),
}

impl LoadedClassifier {
    /// Short name of the artifact kind, for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "native")]
            Self::Onnx(_) => "onnx (ort)",
            #[cfg(all(feature = "tract", not(feature = "native")))]
            Self::Tract(_) => "onnx (tract)",
            Self::Linear(_) => "linear (json)",
        }
    }

    /// Load a classifier artifact. `dimension` is the vectorizer's output length.
    pub fn load(path: &Path, dimension: usize, num_threads: usize) -> std::result::Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Missing(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Linear(LinearClassifier::from_file(path)?)),
            Some("onnx") => Self::load_onnx(path, dimension, num_threads),
            _ => Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    #[cfg(feature = "native")]
    fn load_onnx(path: &Path, dimension: usize, num_threads: usize) -> std::result::Result<Self, ModelError> {
        debug!("Loading ONNX classifier with ort from: {}", path.display());
        let backend = OrtBackend::from_file_with_threads(path, num_threads).map_err(|e| {
            ModelError::Deserialize {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::Onnx(OnnxClassifier::new(backend).with_dimension(dimension)))
    }

    #[cfg(all(feature = "tract", not(feature = "native")))]
    fn load_onnx(path: &Path, dimension: usize, _num_threads: usize) -> std::result::Result<Self, ModelError> {
        debug!("Loading ONNX classifier with tract from: {}", path.display());
        let backend = TractBackend::from_file(path, dimension).map_err(|e| ModelError::Deserialize {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::Tract(OnnxClassifier::new(backend).with_dimension(dimension)))
    }

    #[cfg(not(any(feature = "native", feature = "tract")))]
    fn load_onnx(path: &Path, _dimension: usize, _num_threads: usize) -> std::result::Result<Self, ModelError> {
        Err(ModelError::UnsupportedFormat(path.to_path_buf()))
    }
}

impl Classifier for LoadedClassifier {
    fn input_dimension(&self) -> Option<usize> {
        match self {
            #[cfg(feature = "native")]
            Self::Onnx(c) => c.input_dimension(),
            #[cfg(all(feature = "tract", not(feature = "native")))]
            Self::Tract(c) => c.input_dimension(),
            Self::Linear(c) => c.input_dimension(),
        }
    }

    fn classify(&self, features: &FeatureVector) -> Result<i64> {
        match self {
            #[cfg(feature = "native")]
            Self::Onnx(c) => c.classify(features),
            #[cfg(all(feature = "tract", not(feature = "native")))]
            Self::Tract(c) => c.classify(features),
            Self::Linear(c) => c.classify(features),
        }
    }
}

/// The two artifacts, loaded once at startup and shared by every request.
pub struct ModelBundle {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LoadedClassifier,
}

impl ModelBundle {
    /// Load both artifacts named by the configuration.
    ///
    /// Fails if either file is missing or corrupt, or if the classifier was
    /// trained on a different feature length than the vectorizer produces.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer = TfidfVectorizer::from_file(config.vectorizer_path())?;
        let dimension = vectorizer.dimension();

        let classifier = LoadedClassifier::load(&config.classifier_path(), dimension, config.num_threads)?;

        if let Some(expected) = classifier.input_dimension() {
            if expected != dimension {
                return Err(ModelError::Inconsistent(format!(
                    "vectorizer produces {} features but classifier expects {}",
                    dimension, expected
                ))
                .into());
            }
        }

        info!(
            "Models loaded: vectorizer {} columns, classifier {}",
            dimension,
            classifier.kind()
        );

        Ok(Self { vectorizer, classifier })
    }
}
