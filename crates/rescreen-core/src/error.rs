//! Error types for the rescreen-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the rescreen library.
///
/// [`ScreenError::ModelLoad`] is fatal at startup. Every other variant is scoped
/// to the single document being screened.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The declared document type is not one we can read.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The document library failed while reading.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// A model artifact is missing or corrupt.
    #[error("model load error: {0}")]
    ModelLoad(#[from] ModelError),

    /// Inference error from the inference layer.
    #[error("inference error: {0}")]
    Inference(#[from] rescreen_inference::InferenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an uploaded document into text.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Plain text upload is not valid UTF-8.
    #[error("plain text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// PDF parsing failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// DOCX container or XML could not be parsed.
    #[error("DOCX error: {0}")]
    Docx(String),

    /// Upload exceeds the configured size limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the vectorizer and classifier artifacts.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact file does not exist.
    #[error("model file not found: {}", .0.display())]
    Missing(PathBuf),

    /// Artifact exists but could not be deserialized.
    #[error("failed to deserialize {}: {reason}", path.display())]
    Deserialize { path: PathBuf, reason: String },

    /// Artifact deserialized but its contents do not fit together.
    #[error("inconsistent model: {0}")]
    Inconsistent(String),

    /// No loader is known for this file extension.
    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Result type for the rescreen library.
pub type Result<T> = std::result::Result<T, ScreenError>;
