//! Tensor types exchanged with a backend.

use ndarray::{Array1, ArrayD, Axis};

/// Input tensor for inference. Feature vectors are always dense `f32` rows.
#[derive(Debug, Clone)]
pub enum InputTensor {
    Float32(ArrayD<f32>),
}

impl InputTensor {
    /// Build a `[1, n]` row tensor from a single feature vector.
    pub fn row(features: &[f32]) -> Self {
        let arr = Array1::from(features.to_vec()).insert_axis(Axis(0));
        InputTensor::Float32(arr.into_dyn())
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            InputTensor::Float32(arr) => arr.shape(),
        }
    }
}

/// Output tensor from inference.
#[derive(Debug, Clone)]
pub enum OutputTensor {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
}

impl OutputTensor {
    /// First element as an integer label, if this is an integer tensor.
    pub fn first_label(&self) -> Option<i64> {
        match self {
            OutputTensor::Int64(arr) => arr.iter().next().copied(),
            OutputTensor::Int32(arr) => arr.iter().next().map(|&v| v as i64),
            _ => None,
        }
    }

    /// Index of the largest score, if this is a floating point tensor.
    ///
    /// Scores are read in row-major order, so for a `[1, n]` tensor this is the
    /// winning column.
    pub fn argmax(&self) -> Option<usize> {
        let scores: Vec<f64> = match self {
            OutputTensor::Float32(arr) => arr.iter().map(|&v| v as f64).collect(),
            OutputTensor::Float64(arr) => arr.iter().copied().collect(),
            _ => return None,
        };

        scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_shape() {
        let t = InputTensor::row(&[0.1, 0.2, 0.3]);
        assert_eq!(t.shape(), &[1, 3]);
    }

    #[test]
    fn test_first_label() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[1]), vec![13i64]).unwrap();
        assert_eq!(OutputTensor::Int64(arr).first_label(), Some(13));

        let arr = ArrayD::from_shape_vec(IxDyn(&[1, 2]), vec![0.3f32, 0.7]).unwrap();
        assert_eq!(OutputTensor::Float32(arr).first_label(), None);
    }

    #[test]
    fn test_argmax_keeps_first_on_tie() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[1, 4]), vec![0.1f32, 0.5, 0.5, 0.2]).unwrap();
        assert_eq!(OutputTensor::Float32(arr).argmax(), Some(1));

        let arr = ArrayD::from_shape_vec(IxDyn(&[1]), vec![4i64]).unwrap();
        assert_eq!(OutputTensor::Int64(arr).argmax(), None);
    }
}
