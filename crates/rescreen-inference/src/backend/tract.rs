//! Tract backend for pure Rust ONNX inference.

use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use tract_onnx::prelude::*;
use tracing::debug;

use crate::error::InferenceError;
use crate::tensor::{InputTensor, OutputTensor};
use crate::{InferenceBackend, Result};

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Backend using Tract.
///
/// Tract needs concrete input shapes, so a classifier graph is always loaded
/// for a single `[1, dimension]` feature row.
pub struct TractBackend {
    model: RunnableModel,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl TractBackend {
    /// Load a classifier graph that consumes `[1, dimension]` f32 rows.
    pub fn from_file<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading ONNX model with Tract from: {}", path.display());

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to load model: {}", e)))?;

        Self::finish(model, dimension)
    }

    fn finish(mut model: InferenceModel, dimension: usize) -> Result<Self> {
        let input_shape = [1, dimension];
        model
            .set_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), &input_shape[..]))
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to set input shape: {}", e)))?;

        let model = model
            .into_typed()
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to type model: {}", e)))?
            .into_optimized()
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to optimize: {}", e)))?
            .into_runnable()
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?;

        // Tract does not expose graph names through the runnable plan
        Ok(Self {
            model,
            input_names: vec!["input".to_string()],
            output_names: vec!["label".to_string()],
        })
    }

    fn convert_input(tensor: &InputTensor) -> Result<TValue> {
        let shape: Vec<usize> = tensor.shape().to_vec();
        match tensor {
            InputTensor::Float32(arr) => {
                let data: Vec<f32> = arr.iter().copied().collect();
                tract_ndarray::ArrayD::from_shape_vec(tract_ndarray::IxDyn(&shape), data)
                    .map(|a| a.into_tvalue())
                    .map_err(|e| InferenceError::InvalidInput(e.to_string()))
            }
        }
    }
}

fn to_array<T: Datum + Clone>(value: &TValue) -> Option<Result<ArrayD<T>>> {
    let view = value.to_array_view::<T>().ok()?;
    let shape: Vec<usize> = view.shape().to_vec();
    let data: Vec<T> = view.iter().cloned().collect();
    Some(
        ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|e| InferenceError::OutputExtraction(e.to_string())),
    )
}

impl InferenceBackend for TractBackend {
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>> {
        let tract_inputs: TVec<TValue> = inputs
            .iter()
            .map(|(_, tensor)| Self::convert_input(tensor))
            .collect::<Result<TVec<_>>>()?;

        let outputs = self
            .model
            .run(tract_inputs)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let mut results = Vec::with_capacity(outputs.len());

        for (idx, output) in outputs.iter().enumerate() {
            let name = self.output_names.get(idx)
                .cloned()
                .unwrap_or_else(|| format!("output_{}", idx));

            let tensor = if let Some(arr) = to_array::<i64>(output) {
                OutputTensor::Int64(arr?)
            } else if let Some(arr) = to_array::<f32>(output) {
                OutputTensor::Float32(arr?)
            } else if let Some(arr) = to_array::<i32>(output) {
                OutputTensor::Int32(arr?)
            } else {
                debug!("Skipping output '{}' with unsupported type", name);
                continue;
            };

            results.push((name, tensor));
        }

        Ok(results)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
