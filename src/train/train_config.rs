use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::{BlobError, Result};
use crate::train::epoch_stats::EpochStats;

/// Serializable training hyperparameters, as stored in an experiment config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainSettings {
    pub epochs: usize,
    pub learning_rate: f64,
    pub eval_every: usize,
}

impl Default for TrainSettings {
    fn default() -> Self {
        TrainSettings {
            epochs: 150_000,
            learning_rate: 0.05,
            eval_every: 100,
        }
    }
}

impl TrainSettings {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(BlobError::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.eval_every == 0 {
            return Err(BlobError::InvalidConfig("eval_every must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(BlobError::InvalidConfig("learning_rate must be positive and finite".into()));
        }
        Ok(())
    }
}

/// Configuration for a `train_loop` run. The step size belongs to the
/// optimizer (`Sgd::learning_rate`), not to this schedule.
///
/// # Fields
/// - `epochs`: number of full-batch gradient steps
/// - `eval_every`: report cadence; the test set is evaluated on epoch 1,
///                     every `eval_every` epochs after that, and on the last epoch
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///                     report. If the receiver is dropped the loop stops early.
/// - `stop_flag`: optional atomic flag; when set to `true` from another
///                     thread the loop stops after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub eval_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, eval_every: usize) -> Self {
        TrainConfig {
            epochs,
            eval_every,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl From<&TrainSettings> for TrainConfig {
    fn from(settings: &TrainSettings) -> Self {
        TrainConfig::new(settings.epochs, settings.eval_every)
    }
}
