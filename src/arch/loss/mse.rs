use ndarray::ArrayView1;

use super::LossFn;

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, error: ArrayView1<f64>) -> f64 {
        error.mapv(|e| e.powi(2)).mean().unwrap_or_default()
    }

    fn grad_scale(&self, len: usize) -> f64 {
        2.0 / len as f64
    }
}
