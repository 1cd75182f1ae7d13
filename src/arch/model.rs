use ndarray::{Array1, ArrayView1};

use super::loss::LossFn;

/// A one-variable linear model, `y = w * x + b`.
///
/// The parameters are kept contiguous (`[w, b]`) so optimizers can treat them as a flat slice.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LinearModel {
    params: [f64; 2],
}

impl LinearModel {
    /// Returns a new `LinearModel` with the given slope and intercept.
    pub fn new(w: f64, b: f64) -> Self {
        Self { params: [w, b] }
    }

    /// The slope.
    pub fn w(&self) -> f64 {
        self.params[0]
    }

    /// The intercept.
    pub fn b(&self) -> f64 {
        self.params[1]
    }

    pub fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    /// Evaluates the model on a single point.
    pub fn predict(&self, x: f64) -> f64 {
        self.w() * x + self.b()
    }

    /// Evaluates the model on every input.
    pub fn forward(&self, xs: ArrayView1<f64>) -> Array1<f64> {
        let (w, b) = (self.w(), self.b());
        xs.mapv(|x| w * x + b)
    }

    /// Computes the gradient of `loss` with respect to `[w, b]`.
    ///
    /// # Arguments
    /// * `xs` - The inputs the residuals were computed on.
    /// * `error` - The residuals, `y_pred - y`.
    /// * `loss` - The loss function being minimized.
    pub fn gradient<L: LossFn>(
        &self,
        xs: ArrayView1<f64>,
        error: ArrayView1<f64>,
        loss: &L,
    ) -> [f64; 2] {
        let scale = loss.grad_scale(xs.len());
        let dw = scale * error.dot(&xs);
        let db = scale * error.sum();
        [dw, db]
    }

    /// Returns `true` if any parameter is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        self.params.iter().any(|p| !p.is_finite())
    }
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::*;
    use crate::arch::loss::Mse;

    #[test]
    fn test_defaults_to_zero() {
        let model = LinearModel::default();
        assert_eq!((model.w(), model.b()), (0.0, 0.0));
    }

    #[test]
    fn test_forward_and_predict() {
        let model = LinearModel::new(2., 1.);
        let xs = array![0., 1., 2.];
        assert_eq!(model.forward(xs.view()), array![1., 3., 5.]);
        assert_eq!(model.predict(7.), 15.);
    }

    #[test]
    fn test_gradient_from_origin() {
        let model = LinearModel::default();
        let xs = array![1., 2., 3., 4., 5.];
        let ys = array![2., 4., 6., 8., 10.];
        let error = &model.forward(xs.view()) - &ys;

        let [dw, db] = model.gradient(xs.view(), error.view(), &Mse);

        assert!((dw + 44.).abs() < 1e-12, "dw: {dw}");
        assert!((db + 12.).abs() < 1e-12, "db: {db}");
    }

    #[test]
    fn test_degenerate() {
        assert!(!LinearModel::new(1., 2.).is_degenerate());
        assert!(LinearModel::new(f64::NAN, 2.).is_degenerate());
        assert!(LinearModel::new(1., f64::NEG_INFINITY).is_degenerate());
    }
}
