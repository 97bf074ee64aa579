//! Classifier backed by an ONNX graph.

use tracing::debug;

use rescreen_inference::{InferenceBackend, InferenceError, InputTensor};

use super::{Classifier, FeatureVector};
use crate::error::Result;

/// Runs a classifier graph on one feature row.
///
/// The label is the first integer output (the `label` output of skl2onnx
/// exports). Graphs without one fall back to the arg-max of the first float
/// output, which assumes classes are numbered by column.
pub struct OnnxClassifier<B: InferenceBackend> {
    backend: B,
    input_name: String,
    dimension: Option<usize>,
}

impl<B: InferenceBackend> OnnxClassifier<B> {
    /// Wrap a loaded backend, feeding its first declared input.
    pub fn new(backend: B) -> Self {
        let input_name = backend
            .input_names()
            .first()
            .cloned()
            .unwrap_or_else(|| "input".to_string());

        Self {
            backend,
            input_name,
            dimension: None,
        }
    }

    /// Declare the feature length the graph expects.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: InferenceBackend> Classifier for OnnxClassifier<B> {
    fn input_dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn classify(&self, features: &FeatureVector) -> Result<i64> {
        if let Some(expected) = self.dimension {
            if features.dimension() != expected {
                return Err(InferenceError::InvalidInput(format!(
                    "expected {} features, got {}",
                    expected,
                    features.dimension()
                ))
                .into());
            }
        }

        let input = InputTensor::row(features.as_slice());
        let outputs = self.backend.run(&[(self.input_name.as_str(), input)])?;

        if let Some((name, label)) = outputs
            .iter()
            .find_map(|(name, t)| t.first_label().map(|l| (name, l)))
        {
            debug!("Classifier output '{}' -> {}", name, label);
            return Ok(label);
        }

        if let Some((name, column)) = outputs
            .iter()
            .find_map(|(name, t)| t.argmax().map(|c| (name, c)))
        {
            debug!("Classifier scores '{}' -> column {}", name, column);
            return Ok(column as i64);
        }

        Err(InferenceError::OutputExtraction("classifier produced no label or scores".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};
    use rescreen_inference::OutputTensor;
    use std::sync::Mutex;

    struct FakeBackend {
        inputs: Vec<String>,
        outputs: Vec<(String, OutputTensor)>,
        seen_shape: Mutex<Vec<usize>>,
    }

    impl FakeBackend {
        fn new(outputs: Vec<(String, OutputTensor)>) -> Self {
            Self {
                inputs: vec!["float_input".to_string()],
                outputs,
                seen_shape: Mutex::new(Vec::new()),
            }
        }
    }

    impl InferenceBackend for FakeBackend {
        fn run(&self, inputs: &[(&str, InputTensor)]) -> rescreen_inference::Result<Vec<(String, OutputTensor)>> {
            assert_eq!(inputs[0].0, "float_input");
            *self.seen_shape.lock().unwrap() = inputs[0].1.shape().to_vec();
            Ok(self.outputs.clone())
        }

        fn input_names(&self) -> &[String] {
            &self.inputs
        }

        fn output_names(&self) -> &[String] {
            &[]
        }
    }

    fn int64(values: Vec<i64>) -> OutputTensor {
        OutputTensor::Int64(ArrayD::from_shape_vec(IxDyn(&[values.len()]), values).unwrap())
    }

    fn float32(values: Vec<f32>) -> OutputTensor {
        OutputTensor::Float32(ArrayD::from_shape_vec(IxDyn(&[1, values.len()]), values).unwrap())
    }

    #[test]
    fn test_label_output_preferred() {
        let backend = FakeBackend::new(vec![
            ("probabilities".to_string(), float32(vec![0.9, 0.1])),
            ("label".to_string(), int64(vec![20])),
        ]);
        let clf = OnnxClassifier::new(backend);

        let id = clf.classify(&FeatureVector::new(vec![0.0; 7])).unwrap();
        assert_eq!(id, 20);
        assert_eq!(*clf.backend().seen_shape.lock().unwrap(), vec![1, 7]);
    }

    #[test]
    fn test_argmax_fallback() {
        let backend = FakeBackend::new(vec![("scores".to_string(), float32(vec![0.1, 0.2, 0.7]))]);
        let clf = OnnxClassifier::new(backend);
        assert_eq!(clf.classify(&FeatureVector::new(vec![1.0])).unwrap(), 2);
    }

    #[test]
    fn test_no_usable_output() {
        let clf = OnnxClassifier::new(FakeBackend::new(vec![]));
        assert!(clf.classify(&FeatureVector::new(vec![1.0])).is_err());
    }

    #[test]
    fn test_dimension_checked_before_run() {
        let clf = OnnxClassifier::new(FakeBackend::new(vec![("label".to_string(), int64(vec![1]))]))
            .with_dimension(3);
        assert!(clf.classify(&FeatureVector::new(vec![1.0, 2.0])).is_err());
        assert_eq!(clf.classify(&FeatureVector::new(vec![1.0, 2.0, 3.0])).unwrap(), 1);
    }
}
