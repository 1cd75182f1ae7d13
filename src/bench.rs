use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::{
    config::TrainConfig,
    dataset::Dataset,
    error::Result,
    profiling::{MeasurementProvider, TraceGuard},
    training::{ConsoleProgress, Trainer},
};

/// Outcome of a measured training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchReport {
    pub w: f64,
    pub b: f64,
    /// Wall-clock seconds spent validating the input and training.
    pub elapsed_s: f64,
    pub traced_peak_bytes: usize,
    /// `traced_peak_bytes` in kibibytes, truncated.
    pub traced_peak_kb: u64,
    /// Peak resident set of the whole process up to the end of the run, `0` if unknown.
    pub peak_rss_kb: u64,
}

/// Trains on `xs`/`ys` once, measuring elapsed time and allocations with `provider`.
///
/// The trace is open for the whole call, including input validation, and is always stopped
/// before returning, also when the input is rejected.
///
/// # Arguments
/// * `xs` - The inputs.
/// * `ys` - The expected outputs.
/// * `config` - The hyperparameters. Progress is printed with `config.precision` decimals.
/// * `provider` - The source of the memory measurements.
///
/// # Errors
/// Any of the input validation errors of `Trainer::new` and `Dataset::new`.
pub fn train_measured<P>(
    xs: &[f64],
    ys: &[f64],
    config: TrainConfig,
    provider: &mut P,
) -> Result<BenchReport>
where
    P: MeasurementProvider + ?Sized,
{
    let guard = TraceGuard::start(&mut *provider);
    let start = Instant::now();

    let trainer = Trainer::new(config)?;
    let dataset = Dataset::from_slices(xs, ys)?;
    let model = trainer.train(&dataset, &mut ConsoleProgress::new(config.precision));

    let elapsed_s = start.elapsed().as_secs_f64();
    let trace = guard.finish();

    let peak_rss_kb = provider.peak_rss_kb().unwrap_or_else(|| {
        warn!("peak resident set size unavailable on this platform, reporting 0");
        0
    });

    let report = BenchReport {
        w: model.w(),
        b: model.b(),
        elapsed_s,
        traced_peak_bytes: trace.peak_bytes,
        traced_peak_kb: trace.peak_kb(),
        peak_rss_kb,
    };

    info!(
        elapsed_s = report.elapsed_s,
        traced_peak_kb = report.traced_peak_kb,
        peak_rss_kb = report.peak_rss_kb;
        "measured training run"
    );

    Ok(report)
}
