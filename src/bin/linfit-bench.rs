use anyhow::Context;
use linfit::{
    profiling::{ProcessProfiler, TracingAllocator},
    train_measured, TrainConfig,
};
use log::info;

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator;

const XS: [f64; 5] = [1., 2., 3., 4., 5.];
const YS: [f64; 5] = [2., 4., 6., 8., 10.];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TrainConfig {
        precision: 6,
        ..TrainConfig::from_env().context("loading training config")?
    };

    let mut profiler = ProcessProfiler::new();
    let report = train_measured(&XS, &YS, config, &mut profiler)?;

    println!("\nBenchmark result:");
    println!("w ≈ {:.6}, b ≈ {:.6}", report.w, report.b);
    println!("time_s: {:.6}s", report.elapsed_s);
    println!("traced_peak_kb: {} KB", report.traced_peak_kb);
    println!("peak_rss_kb: {} KB", report.peak_rss_kb);

    info!("report: {}", serde_json::to_string(&report)?);

    Ok(())
}
