//! Error types for the inference layer.

use thiserror::Error;

/// Errors that can occur while loading or running an ONNX graph.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The ONNX graph could not be parsed.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The runtime session could not be built.
    #[error("failed to create session: {0}")]
    SessionCreate(String),

    /// Input tensor shape or type rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Graph execution failed.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// An output could not be converted into an [`crate::OutputTensor`].
    #[error("failed to extract output: {0}")]
    OutputExtraction(String),

    /// I/O error when reading model files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
