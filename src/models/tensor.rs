use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, Result};

/// Dense row-major f32 tensor exchanged with the inference backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Style-encoder output for one bitmap.
pub type LatentEmbedding = Tensor;

/// Convex combination of two latent embeddings.
pub type FusedLatent = Tensor;

impl Tensor {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(GlyphError::InternalError(format!(
                "tensor shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `(1 - alpha) * self + alpha * other`, elementwise.
    pub fn lerp(&self, other: &Tensor, alpha: f32) -> Result<FusedLatent> {
        if self.shape != other.shape || self.data.len() != other.data.len() {
            return Err(GlyphError::InferenceError(format!(
                "latent shapes differ: {:?} vs {:?}",
                self.shape, other.shape
            )));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (1.0 - alpha) * a + alpha * b)
            .collect();
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_shape() {
        assert!(Tensor::new(vec![1, 2, 2], vec![0.0; 4]).is_ok());
        assert!(Tensor::new(vec![1, 2, 2], vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Tensor::new(vec![1, 3], vec![0.0, 1.0, -2.0]).unwrap();
        let b = Tensor::new(vec![1, 3], vec![4.0, 1.0, 2.0]).unwrap();

        assert_eq!(a.lerp(&b, 0.0).unwrap(), a);
        assert_eq!(a.lerp(&b, 1.0).unwrap(), b);
        assert_eq!(a.lerp(&b, 0.5).unwrap().data, vec![2.0, 1.0, 0.0]);

        let fused = a.lerp(&b, 0.25).unwrap();
        assert!((fused.data[0] - 1.0).abs() < 1e-6);
        assert!((fused.data[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_rejects_mismatched_shapes() {
        let a = Tensor::new(vec![2], vec![0.0, 1.0]).unwrap();
        let b = Tensor::new(vec![1, 2], vec![0.0, 1.0]).unwrap();
        assert!(matches!(a.lerp(&b, 0.5), Err(GlyphError::InferenceError(_))));
    }
}
