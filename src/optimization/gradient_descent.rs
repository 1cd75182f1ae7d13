use super::Optimizer;

/// Plain gradient descent with a fixed step size.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent` taking steps scaled by `learning_rate`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Moves every parameter against its gradient component, `p -= learning_rate * g`.
    ///
    /// `grad` must hold one component per parameter and be computed before the call, so all
    /// parameters move together from the same point.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]) {
        params
            .iter_mut()
            .zip(grad)
            .for_each(|(p, g)| *p -= self.learning_rate * g);
    }
}
