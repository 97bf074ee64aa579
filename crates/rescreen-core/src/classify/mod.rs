//! Job-category classification with externally trained artifacts.
//!
//! Both artifacts are black boxes behind two traits:
//! - [`FeatureTransformer`]: normalized text to a fixed-length vector
//! - [`Classifier`]: vector to an integer category id
//!
//! The id is turned into a label by [`resolve_category`].

mod bundle;
mod category;
mod linear;
mod onnx;
mod tfidf;

pub use bundle::{LoadedClassifier, ModelBundle};
pub use category::{CATEGORIES, UNKNOWN_CATEGORY, categories, is_category_label, resolve_category};
pub use linear::LinearClassifier;
pub use onnx::OnnxClassifier;
pub use tfidf::{Norm, TfidfVectorizer};

use crate::error::Result;

/// Dense feature vector produced by a [`FeatureTransformer`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.0.iter().filter(|v| **v != 0.0).count()
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Maps normalized text to a vector whose length is fixed at load time.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait FeatureTransformer: Send + Sync {
    /// Length of every vector this transformer produces.
    fn dimension(&self) -> usize;

    /// Vectorize normalized text.
    fn vectorize(&self, text: &str) -> Result<FeatureVector>;
}

/// Maps a feature vector to a category id.
pub trait Classifier: Send + Sync {
    /// Input length the artifact was trained on, when the artifact records it.
    fn input_dimension(&self) -> Option<usize>;

    /// Predict a category id. Ids outside the category table are returned as-is.
    fn classify(&self, features: &FeatureVector) -> Result<i64>;
}

impl<T: FeatureTransformer + ?Sized> FeatureTransformer for Box<T> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn vectorize(&self, text: &str) -> Result<FeatureVector> {
        (**self).vectorize(text)
    }
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    fn input_dimension(&self) -> Option<usize> {
        (**self).input_dimension()
    }

    fn classify(&self, features: &FeatureVector) -> Result<i64> {
        (**self).classify(features)
    }
}
