// Runs the blob-classification experiment end to end.
//
//   cargo run --release                 # default configuration
//   cargo run --release -- run.json     # overrides from a JSON config
//
// Log verbosity follows RUST_LOG (default: info).
use anyhow::Context;
use log::info;

use blobnet::{run_experiment, write_artifacts, ExperimentConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::load_json(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ExperimentConfig::default(),
    };
    info!(
        "seed {} | {} samples | {} classes | {} epochs @ lr {}",
        config.seed,
        config.data.n_samples,
        config.data.n_classes,
        config.train.epochs,
        config.train.learning_rate
    );

    let report = run_experiment(&config).context("running experiment")?;
    write_artifacts(&report, &config.output)
        .with_context(|| format!("writing artifacts to {}", config.output.dir.display()))?;

    println!(
        "Test accuracy: {:.2}% ({}/{} correct)",
        report.evaluation.accuracy * 100.0,
        report.evaluation.confusion.correct(),
        report.evaluation.confusion.total()
    );
    Ok(())
}
