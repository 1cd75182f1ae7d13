use log::{debug, warn};

use super::{Progress, ProgressSink};
use crate::{
    arch::{
        loss::{LossFn, Mse},
        LinearModel,
    },
    config::TrainConfig,
    dataset::Dataset,
    error::Result,
    optimization::{GradientDescent, Optimizer},
};

/// Fits a `LinearModel` with full-batch gradient descent.
///
/// The trainer holds no model state between calls, every `train` starts again from `(0, 0)`.
#[derive(Debug, Clone)]
pub struct Trainer<L: LossFn = Mse> {
    config: TrainConfig,
    loss_fn: L,
}

impl Trainer<Mse> {
    /// Returns a new `Trainer` minimizing the mean squared error.
    ///
    /// # Errors
    /// `InvalidLearningRate` if the configured learning rate is not positive and finite.
    pub fn new(config: TrainConfig) -> Result<Self> {
        Self::with_loss(config, Mse::new())
    }
}

impl<L: LossFn> Trainer<L> {
    /// Returns a new `Trainer` minimizing `loss_fn`.
    pub fn with_loss(config: TrainConfig, loss_fn: L) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, loss_fn })
    }

    /// Runs exactly `epochs` epochs over the whole `dataset`.
    ///
    /// If `verbose` is set, every `log_every` epochs a `Progress` is handed to `sink`.
    ///
    /// # Returns
    /// The trained model. NaN or infinite parameters are returned as is.
    pub fn train<S: ProgressSink>(&self, dataset: &Dataset, sink: &mut S) -> LinearModel {
        let TrainConfig {
            learning_rate,
            epochs,
            verbose,
            log_every,
            ..
        } = self.config;

        let xs = dataset.xs();
        let ys = dataset.ys();
        let mut model = LinearModel::default();
        let mut optimizer = GradientDescent::new(learning_rate);

        for epoch in 1..=epochs {
            let y_pred = model.forward(xs);
            let error = &y_pred - &ys;
            let grad = model.gradient(xs, error.view(), &self.loss_fn);
            optimizer.update_params(model.params_mut(), &grad);

            if verbose && epoch % log_every.get() == 0 {
                let mse = self.loss_fn.loss(error.view());
                let progress = Progress {
                    epoch,
                    mse,
                    w: model.w(),
                    b: model.b(),
                };

                debug!(epoch = epoch, mse = mse, w = model.w(), b = model.b(); "progress");
                sink.on_progress(&progress);
            }
        }

        if model.is_degenerate() {
            warn!(
                "training diverged after {epochs} epochs (w={}, b={}), try a smaller learning rate",
                model.w(),
                model.b()
            );
        }

        model
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn doubling() -> Dataset {
        Dataset::from_slices(&[1., 2., 3., 4., 5.], &[2., 4., 6., 8., 10.]).unwrap()
    }

    fn trainer(epochs: usize, learning_rate: f64) -> Trainer {
        Trainer::new(TrainConfig {
            learning_rate,
            epochs,
            ..TrainConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_converges_on_exact_linear_data() {
        let model = trainer(1000, 0.01).train(&doubling(), &mut ());

        assert!((model.w() - 2.).abs() < 0.01, "w: {}", model.w());
        assert!(model.b().abs() < 0.05, "b: {}", model.b());
    }

    #[test]
    fn test_first_epoch_update() {
        let model = trainer(1, 0.01).train(&doubling(), &mut ());

        assert!((model.w() - 0.44).abs() < 1e-12, "w: {}", model.w());
        assert!((model.b() - 0.12).abs() < 1e-12, "b: {}", model.b());
    }

    #[test]
    fn test_zero_epochs_keeps_initial_params() {
        let mut reports = Vec::new();
        let model = trainer(0, 0.01).train(&doubling(), &mut reports);

        assert_eq!(model, LinearModel::new(0.0, 0.0));
        assert!(reports.is_empty());
    }

    #[test]
    fn test_reports_every_200_epochs_with_decreasing_mse() {
        let mut reports: Vec<Progress> = Vec::new();
        let model = trainer(1000, 0.01).train(&doubling(), &mut reports);

        let epochs: Vec<_> = reports.iter().map(|p| p.epoch).collect();
        assert_eq!(epochs, [200, 400, 600, 800, 1000]);
        assert!(
            reports.windows(2).all(|w| w[1].mse <= w[0].mse),
            "mse went up: {reports:?}"
        );

        let last = reports.last().unwrap();
        assert_eq!((last.w, last.b), (model.w(), model.b()));
    }

    #[test]
    fn test_reported_mse_uses_pre_update_residuals() {
        let config = TrainConfig {
            epochs: 1,
            log_every: std::num::NonZeroUsize::new(1).unwrap(),
            ..TrainConfig::default()
        };
        let mut reports = Vec::new();
        Trainer::new(config).unwrap().train(&doubling(), &mut reports);

        // residuals at (0, 0) are -ys, so the mse is mean(ys^2) = 220 / 5
        assert_eq!(reports[0].mse, 44.);
        assert!((reports[0].w - 0.44).abs() < 1e-12);
    }

    #[test]
    fn test_quiet_run_reports_nothing() {
        let config = TrainConfig {
            verbose: false,
            ..TrainConfig::default()
        };
        let mut reports = Vec::new();
        Trainer::new(config).unwrap().train(&doubling(), &mut reports);
        assert!(reports.is_empty());
    }

    #[test]
    fn test_is_deterministic() {
        let trainer = trainer(1000, 0.01);
        let a = trainer.train(&doubling(), &mut ());
        let b = trainer.train(&doubling(), &mut ());

        assert_eq!(a.w().to_bits(), b.w().to_bits());
        assert_eq!(a.b().to_bits(), b.b().to_bits());
    }

    #[test]
    fn test_divergence_is_not_an_error() {
        let model = trainer(1000, 1.0).train(&doubling(), &mut ());
        assert!(model.is_degenerate(), "w: {}, b: {}", model.w(), model.b());
    }

    #[test]
    fn test_rejects_non_positive_learning_rate() {
        let res = Trainer::new(TrainConfig {
            learning_rate: 0.0,
            ..TrainConfig::default()
        });
        assert!(res.is_err());
    }
}
