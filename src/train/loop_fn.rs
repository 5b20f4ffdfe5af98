use std::sync::atomic::Ordering;
use std::time::Instant;

use log::info;

use crate::data::Dataset;
use crate::error::{BlobError, Result};
use crate::eval::evaluate;
use crate::network::Network;
use crate::optim::Sgd;
use crate::train::epoch_stats::{EpochStats, TrainReport};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

/// Which phase the trainer is in. Parameters are only written in `Training`;
/// `Evaluating` borrows the network immutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Training,
    Evaluating,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with full-batch gradient descent for `config.epochs`
/// epochs, evaluating on `test` at the configured cadence.
///
/// # Arguments
/// - `network`: mutable reference to the network; modified in place
/// - `train`: the training set; every epoch is one step over all of it
/// - `test`: optional held-out set used for the periodic reports
/// - `optimizer`: SGD optimizer (carries learning rate)
/// - `config`: schedule, optional progress channel, optional stop flag
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `NonFiniteLoss` as soon as a train or test loss is NaN or infinite, and
/// `InvalidConfig` for an empty training set or a zero `eval_every`.
pub fn train_loop(
    network: &mut Network,
    train: &Dataset,
    test: Option<&Dataset>,
    optimizer: &Sgd,
    config: &TrainConfig,
) -> Result<TrainReport> {
    if train.is_empty() {
        return Err(BlobError::InvalidConfig("training set must not be empty".into()));
    }
    if config.eval_every == 0 {
        return Err(BlobError::InvalidConfig("eval_every must be at least 1".into()));
    }

    let mut history = Vec::new();
    let mut last_train_loss = 0.0;
    let mut epochs_run = 0;
    let mut stopped_early = false;
    let mut since_report = Instant::now();

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            stopped_early = true;
            break;
        }

        let train_loss = train_step(network, train, optimizer)?;
        if !train_loss.is_finite() {
            return Err(BlobError::NonFiniteLoss { epoch, phase: "train" });
        }
        last_train_loss = train_loss;
        epochs_run = epoch;

        let mode = if (epoch - 1) % config.eval_every == 0 || epoch == config.epochs {
            Mode::Evaluating
        } else {
            Mode::Training
        };
        if mode == Mode::Training {
            continue;
        }

        // ── Evaluation: read-only pass over the held-out set ──────────────
        let frozen: &Network = network;
        let (test_loss, test_accuracy) = match test {
            Some(test) => {
                let eval = evaluate(frozen, test)?;
                if !eval.loss.is_finite() {
                    return Err(BlobError::NonFiniteLoss { epoch, phase: "test" });
                }
                (Some(eval.loss), Some(eval.accuracy))
            }
            None => (None, None),
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            test_loss,
            test_accuracy,
            elapsed_ms: since_report.elapsed().as_millis() as u64,
        };
        since_report = Instant::now();
        log_report(&stats);

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats.clone()).is_err() {
                history.push(stats);
                stopped_early = epoch < config.epochs;
                break;
            }
        }
        history.push(stats);
    }

    Ok(TrainReport {
        history,
        epochs_run,
        final_train_loss: last_train_loss,
        stopped_early,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn log_report(stats: &EpochStats) {
    match (stats.test_loss, stats.test_accuracy) {
        (Some(test_loss), Some(acc)) => info!(
            "epoch {:>7}/{} | train loss {:.5} | test loss {:.5} | test acc {:.2}%",
            stats.epoch, stats.total_epochs, stats.train_loss, test_loss, acc * 100.0
        ),
        _ => info!(
            "epoch {:>7}/{} | train loss {:.5}",
            stats.epoch, stats.total_epochs, stats.train_loss
        ),
    }
}
