//! The end-to-end run: generate → split → build → train → evaluate, plus
//! writing the run's artifacts to disk.

use std::fs;
use std::path::Path;

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ExperimentConfig, OutputConfig};
use crate::data::{make_blobs, train_test_split, Split};
use crate::error::Result;
use crate::eval::{evaluate, Evaluation};
use crate::network::Network;
use crate::optim::Sgd;
use crate::train::{train_loop, EpochStats, TrainConfig, TrainReport};
use crate::viz::{plot_decision_boundary, plot_loss_curves};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    pub split: Split,
    pub network: Network,
    pub baseline: Evaluation,
    pub training: TrainReport,
    pub evaluation: Evaluation,
}

/// Per-stage seeds drawn from one master generator seeded with the run seed.
/// No two random stages share a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSeeds {
    pub data: u64,
    pub split: u64,
    pub init: u64,
}

impl StageSeeds {
    pub fn derive(seed: u64) -> StageSeeds {
        let mut master = StdRng::seed_from_u64(seed);
        StageSeeds {
            data: master.gen(),
            split: master.gen(),
            init: master.gen(),
        }
    }
}

/// Generates the blobs and splits them, each stage from its own seeded RNG.
pub fn prepare_data(config: &ExperimentConfig) -> Result<Split> {
    let seeds = StageSeeds::derive(config.seed);
    debug!("stage seeds: {seeds:?}");
    let mut data_rng = StdRng::seed_from_u64(seeds.data);
    let dataset = make_blobs(&config.data, &mut data_rng)?;

    let mut split_rng = StdRng::seed_from_u64(seeds.split);
    let split = train_test_split(&dataset, config.split.test_fraction, &mut split_rng)?;
    info!(
        "generated {} samples in {} classes: {} train / {} test",
        dataset.len(),
        config.data.n_classes,
        split.train.len(),
        split.test.len()
    );
    debug!("train class counts: {:?}", split.train.class_counts(config.data.n_classes));
    Ok(split)
}

/// Runs a whole experiment in memory. Nothing is written to disk.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;
    let split = prepare_data(config)?;

    let mut init_rng = StdRng::seed_from_u64(StageSeeds::derive(config.seed).init);
    let mut network = Network::new(
        config.data.n_features,
        config.data.n_classes,
        &config.model,
        &mut init_rng,
    )?;
    info!(
        "built {} stages, {} parameters, activation {:?}",
        network.stages.len(),
        network.parameter_count(),
        config.model.activation
    );

    let baseline = evaluate(&network, &split.test)?;
    info!("pre-training test accuracy: {:.2}%", baseline.accuracy * 100.0);

    let optimizer = Sgd::new(config.train.learning_rate);
    let training = train_loop(
        &mut network,
        &split.train,
        Some(&split.test),
        &optimizer,
        &TrainConfig::from(&config.train),
    )?;

    let evaluation = evaluate(&network, &split.test)?;
    info!(
        "final test loss {:.5}, test accuracy {:.2}% after {} epochs",
        evaluation.loss,
        evaluation.accuracy * 100.0,
        training.epochs_run
    );

    Ok(ExperimentReport { split, network, baseline, training, evaluation })
}

#[derive(Serialize)]
struct Summary<'a> {
    epochs_run: usize,
    final_train_loss: f64,
    test_loss: f64,
    test_accuracy: f64,
    per_class_recall: Vec<Option<f64>>,
    confusion: &'a [Vec<usize>],
    history: &'a [EpochStats],
}

/// Writes `history.json`, the plots and (optionally) `model.json` into
/// `output.dir`, creating it if needed.
pub fn write_artifacts(report: &ExperimentReport, output: &OutputConfig) -> Result<()> {
    let dir = output.dir.as_path();
    fs::create_dir_all(dir)?;

    let summary = Summary {
        epochs_run: report.training.epochs_run,
        final_train_loss: report.training.final_train_loss,
        test_loss: report.evaluation.loss,
        test_accuracy: report.evaluation.accuracy,
        per_class_recall: report.evaluation.confusion.per_class_recall(),
        confusion: &report.evaluation.confusion.counts,
        history: &report.training.history,
    };
    let file = fs::File::create(dir.join("history.json"))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &summary)?;

    if output.plots {
        plot(report, output, dir)?;
    }

    if output.save_model {
        let path = dir.join("model.json");
        report.network.save_json(&path)?;
        info!("model saved to {}", path.display());
    }
    Ok(())
}

fn plot(report: &ExperimentReport, output: &OutputConfig, dir: &Path) -> Result<()> {
    plot_decision_boundary(
        &report.network,
        &report.split.train,
        &output.plot,
        &dir.join("decision_boundary_train.png"),
    )?;
    plot_decision_boundary(
        &report.network,
        &report.split.test,
        &output.plot,
        &dir.join("decision_boundary_test.png"),
    )?;
    plot_loss_curves(&report.training.history, &dir.join("loss_curves.png"))?;
    info!("plots written to {}", dir.display());
    Ok(())
}
