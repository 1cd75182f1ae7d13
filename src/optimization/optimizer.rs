pub trait Optimizer {
    /// Takes one step on `params` given the gradient computed from their current values.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]);
}
