use serde::{Serialize, Deserialize};

/// One evaluation report emitted by `train_loop`.
///
/// Reports are produced every `eval_every` epochs and after the final epoch.
/// When a `progress_tx` channel is configured the same value is also sent
/// over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number (one epoch = one full-batch step).
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Training loss computed during this epoch's step, before the update.
    pub train_loss: f64,
    /// Held-out loss after this epoch's update, if a test set was provided.
    pub test_loss: Option<f64>,
    /// Held-out accuracy as a fraction in [0, 1].
    pub test_accuracy: Option<f64>,
    /// Wall-clock time since the previous report, in milliseconds.
    pub elapsed_ms: u64,
}

/// Outcome of a whole `train_loop` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub history: Vec<EpochStats>,
    pub epochs_run: usize,
    pub final_train_loss: f64,
    /// Set when the stop flag or a dropped progress receiver ended the run.
    pub stopped_early: bool,
}
