use anyhow::Context;
use linfit::{ConsoleProgress, Dataset, TrainConfig, Trainer};
use log::info;

const XS: [f64; 5] = [1., 2., 3., 4., 5.];
const YS: [f64; 5] = [2., 4., 6., 8., 10.];
const X_NEW: f64 = 7.;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TrainConfig::from_env().context("loading training config")?;
    info!(
        "training with learning_rate={} epochs={}",
        config.learning_rate, config.epochs
    );

    let trainer = Trainer::new(config)?;
    let dataset = Dataset::from_slices(&XS, &YS)?;
    let model = trainer.train(&dataset, &mut ConsoleProgress::new(config.precision));

    let prec = config.precision;
    println!("\nTrained model:");
    println!("w ≈ {:.prec$}, b ≈ {:.prec$}", model.w(), model.b());
    println!("For x = {X_NEW}, y_pred ≈ {:.prec$}", model.predict(X_NEW));

    Ok(())
}
