use serde::{Deserialize, Serialize};

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Fully connected layer: `a = σ(x·W + b)` with `W` shaped `input_size × size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activation: ActivationFunction,
}

impl Layer {
    /// Builds a layer from explicit weights; used by tests and tooling that
    /// emit model files.
    pub fn new(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Layer {
        Layer { size: weights.cols, weights, biases, activation }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Checks that stored shapes agree with each other.
    pub fn shape_error(&self) -> Option<String> {
        if !self.weights.is_consistent() {
            return Some(format!(
                "weights declare {}x{} but hold {} values",
                self.weights.rows, self.weights.cols, self.weights.data.len()
            ));
        }
        if self.weights.cols != self.size {
            return Some(format!("size {} but weights have {} columns", self.size, self.weights.cols));
        }
        if self.biases.len() != self.size {
            return Some(format!("size {} but {} biases", self.size, self.biases.len()));
        }
        None
    }

    /// Inference-only forward pass; the layer is never mutated.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.left_mul(input);
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        self.activation.apply(&mut z);
        z
    }
}
