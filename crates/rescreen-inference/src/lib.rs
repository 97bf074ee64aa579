//! ONNX inference abstraction layer for rescreen.
//!
//! Trained classifiers are shipped as ONNX graphs. This crate hides the runtime
//! that executes them behind [`InferenceBackend`]:
//! - `ort` (ONNX Runtime with XNNPACK) for native builds
//! - `tract` for a dependency-free pure Rust build

mod backend;
mod error;
mod tensor;

pub use backend::InferenceBackend;
pub use error::InferenceError;
pub use tensor::{InputTensor, OutputTensor};

#[cfg(feature = "native")]
pub use backend::ort::OrtBackend;

#[cfg(feature = "tract")]
pub use backend::tract::TractBackend;

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
