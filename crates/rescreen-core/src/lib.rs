//! Core library for resume screening.
//!
//! This crate provides:
//! - Document reading (plain text, PDF, DOCX) behind a closed [`DocumentKind`]
//! - Contact field extraction (name, email, phone) over raw text
//! - Deterministic text normalization ahead of vectorization
//! - Job-category classification with externally trained artifacts

pub mod error;
pub mod models;
pub mod document;
pub mod extract;
pub mod classify;
pub mod screener;

pub use error::{ScreenError, Result};
pub use models::config::ScreenConfig;
pub use models::result::{ContactInfo, ScreeningResult};
pub use document::{Document, DocumentKind, read_document};
pub use extract::{ContactExtractor, TextNormalizer, extract_contacts, normalize};
pub use classify::{
    Classifier, FeatureTransformer, FeatureVector, LinearClassifier, ModelBundle,
    OnnxClassifier, TfidfVectorizer, resolve_category,
};
pub use screener::ResumeScreener;

/// Re-export inference types.
pub use rescreen_inference::{InferenceBackend, InputTensor, OutputTensor};

#[cfg(feature = "native")]
pub use rescreen_inference::OrtBackend;

#[cfg(feature = "tract")]
pub use rescreen_inference::TractBackend;
