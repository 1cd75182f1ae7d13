use ndarray::ArrayView1;

pub trait LossFn {
    /// Computes the loss from the residuals `y_pred - y`.
    fn loss(&self, error: ArrayView1<f64>) -> f64;

    /// The factor the residual sums are multiplied by to get the gradient, for a batch of
    /// `len` samples.
    fn grad_scale(&self, len: usize) -> f64;
}
