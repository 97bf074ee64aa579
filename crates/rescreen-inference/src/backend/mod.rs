//! Inference backend implementations.

#[cfg(feature = "native")]
pub mod ort;

#[cfg(feature = "tract")]
pub mod tract;

use crate::{InputTensor, OutputTensor, Result};

/// Trait for ONNX inference backends.
///
/// Implementations must be shareable across threads: a loaded classifier is
/// used read-only by every screening request for the lifetime of the process.
pub trait InferenceBackend: Send + Sync {
    /// Run inference with the given named inputs.
    ///
    /// Outputs that are not plain tensors (e.g. sequences of maps) are skipped,
    /// so the result may hold fewer entries than [`Self::output_names`].
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>>;

    /// Input names expected by the model.
    fn input_names(&self) -> &[String];

    /// Output names produced by the model.
    fn output_names(&self) -> &[String];
}
