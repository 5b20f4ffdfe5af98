//! Experiment configuration.
//!
//! Every hyperparameter of a run lives in [`ExperimentConfig`] and is handed
//! to the component that needs it. Missing JSON fields fall back to the
//! defaults below.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::data::{BlobConfig, SplitConfig};
use crate::error::{BlobError, Result};
use crate::network::ModelConfig;
use crate::train::TrainSettings;
use crate::viz::PlotOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives plots, history and the optional model file.
    pub dir: PathBuf,
    pub plots: bool,
    pub save_model: bool,
    pub plot: PlotOptions,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("runs"),
            plots: true,
            save_model: false,
            plot: PlotOptions::default(),
        }
    }
}

/// Full description of one generate → split → train → evaluate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Master seed. Data generation, the split and weight initialisation each
    /// get a distinct seed derived from it (see `pipeline::StageSeeds`).
    pub seed: u64,
    pub data: BlobConfig,
    pub split: SplitConfig,
    pub model: ModelConfig,
    pub train: TrainSettings,
    pub output: OutputConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            seed: 42,
            data: BlobConfig::default(),
            split: SplitConfig::default(),
            model: ModelConfig::default(),
            train: TrainSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        self.data.validate()?;
        self.model.validate()?;
        self.train.validate()?;
        if !(self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0) {
            return Err(BlobError::InvalidConfig(format!(
                "test_fraction must lie in (0, 1), got {}",
                self.split.test_fraction
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: ExperimentConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_blob_experiment() {
        let config = ExperimentConfig::default();
        assert_eq!(config.data.n_samples, 4000);
        assert_eq!(config.data.n_classes, 10);
        assert_eq!(config.model.hidden_units, 8);
        assert_eq!(config.train.epochs, 150_000);
        assert_eq!(config.train.learning_rate, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{ "seed": 999, "train": { "epochs": 10 } }"#).unwrap();
        assert_eq!(config.seed, 999);
        assert_eq!(config.train.epochs, 10);
        assert_eq!(config.train.eval_every, 100);
        assert_eq!(config.data, BlobConfig::default());
    }

    #[test]
    fn validate_catches_bad_split() {
        let mut config = ExperimentConfig::default();
        config.split.test_fraction = 1.0;
        assert!(config.validate().is_err());
    }
}
