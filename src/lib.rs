pub mod arch;
pub mod bench;
pub mod config;
pub mod dataset;
pub mod error;
pub mod optimization;
pub mod profiling;
pub mod training;

pub use arch::LinearModel;
pub use bench::{train_measured, BenchReport};
pub use config::TrainConfig;
pub use dataset::Dataset;
pub use error::{FitErr, Result};
pub use training::{ConsoleProgress, Progress, ProgressSink, Trainer};

/// Fits `y = w * x + b` to `xs`/`ys` starting from `(0, 0)`.
///
/// Progress is printed to stdout every 200 epochs with 4 decimals if `verbose` is set.
///
/// # Errors
/// * `SizeMismatch` if `xs` and `ys` have different lengths.
/// * `EmptyDataset` if they are empty.
/// * `NonFiniteSample` if they hold NaN or infinite values.
/// * `InvalidLearningRate` if `learning_rate` is not positive and finite.
pub fn train(
    xs: &[f64],
    ys: &[f64],
    learning_rate: f64,
    epochs: usize,
    verbose: bool,
) -> Result<LinearModel> {
    let config = TrainConfig {
        learning_rate,
        epochs,
        verbose,
        ..TrainConfig::default()
    };

    let trainer = Trainer::new(config)?;
    let dataset = Dataset::from_slices(xs, ys)?;
    let mut console = ConsoleProgress::new(config.precision);

    Ok(trainer.train(&dataset, &mut console))
}
