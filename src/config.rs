use std::{env, fs, num::NonZeroUsize, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{FitErr, Result};

/// Environment variable naming an optional JSON file with `TrainConfig` overrides.
pub const CONFIG_ENV: &str = "LINFIT_CONFIG";

const DEFAULT_LOG_EVERY: NonZeroUsize = match NonZeroUsize::new(200) {
    Some(n) => n,
    None => panic!("log interval must be non zero"),
};

/// Hyperparameters and reporting options for one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub verbose: bool,
    /// Report progress every `log_every` epochs.
    pub log_every: NonZeroUsize,
    /// Decimal places used when printing progress.
    pub precision: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            verbose: true,
            log_every: DEFAULT_LOG_EVERY,
            precision: 4,
        }
    }
}

impl TrainConfig {
    /// Checks the hyperparameters before any training happens.
    ///
    /// # Errors
    /// `InvalidLearningRate` if the learning rate is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        let lr = self.learning_rate;
        if !lr.is_finite() || lr <= 0.0 {
            return Err(FitErr::InvalidLearningRate(lr));
        }

        Ok(())
    }

    /// Loads a `TrainConfig` from a JSON file. Missing fields keep their defaults.
    ///
    /// # Errors
    /// `Io` if the file can't be read, `InvalidConfig` if it can't be parsed or it holds invalid
    /// hyperparameters.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| FitErr::InvalidConfig(format!("'{}': {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `LINFIT_CONFIG` if it is set, the defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => {
                info!("loading config from {}", path.to_string_lossy());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
