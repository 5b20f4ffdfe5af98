// End-to-end properties of data generation, splitting and a short run.

use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::{rngs::StdRng, SeedableRng};

use blobnet::config::ExperimentConfig;
use blobnet::data::{make_blobs, BlobConfig};
use blobnet::pipeline::{prepare_data, run_experiment, write_artifacts, StageSeeds};
use blobnet::{ModelConfig, Network};

fn seed_999() -> ExperimentConfig {
    ExperimentConfig { seed: 999, ..ExperimentConfig::default() }
}

#[test]
fn seed_999_splits_into_3200_and_800() {
    let split = prepare_data(&seed_999()).unwrap();
    assert_eq!(split.train.len(), 3200);
    assert_eq!(split.test.len(), 800);
}

#[test]
fn every_label_is_a_valid_class() {
    let config = seed_999();
    let split = prepare_data(&config).unwrap();
    for ds in [&split.train, &split.test] {
        assert!(ds.labels.iter().all(|&y| y < config.data.n_classes));
        assert_eq!(ds.n_features(), 2);
    }
}

#[test]
fn split_is_a_disjoint_cover() {
    let split = prepare_data(&seed_999()).unwrap();
    let train: HashSet<usize> = split.train_indices.iter().copied().collect();
    let test: HashSet<usize> = split.test_indices.iter().copied().collect();
    assert!(train.is_disjoint(&test));
    let union: HashSet<usize> = train.union(&test).copied().collect();
    assert_eq!(union, (0..4000).collect());
}

#[test]
fn data_is_reproducible_from_seed() {
    let a = prepare_data(&seed_999()).unwrap();
    let b = prepare_data(&seed_999()).unwrap();
    assert_eq!(a.train, b.train);
    assert_eq!(a.test_indices, b.test_indices);
}

#[test]
fn stage_seeds_are_distinct_and_stable() {
    for seed in [0, 42, 999] {
        let seeds = StageSeeds::derive(seed);
        assert_ne!(seeds.data, seeds.split);
        assert_ne!(seeds.data, seeds.init);
        assert_ne!(seeds.split, seeds.init);
        assert_eq!(seeds, StageSeeds::derive(seed));
    }
}

#[test]
fn initial_weights_are_not_a_copy_of_the_centres() {
    let seeds = StageSeeds::derive(0);
    let one_point = BlobConfig { n_samples: 1, n_classes: 1, cluster_std: 1e-12, ..BlobConfig::default() };
    let data = make_blobs(&one_point, &mut StdRng::seed_from_u64(seeds.data)).unwrap();
    let network =
        Network::new(2, 1, &ModelConfig::default(), &mut StdRng::seed_from_u64(seeds.init)).unwrap();

    let centre_x = data.features.data[0][0];
    let w00 = network.stages[0].weights.data[0][0];
    let rescaled = centre_x / 10.0 / 2f64.sqrt();
    assert!((w00 - rescaled).abs() > 1e-6, "w00 {w00} tracks centre {centre_x}");
}

#[test]
fn short_run_reports_finite_losses_and_writes_artifacts() {
    let mut config = seed_999();
    config.data.n_samples = 400;
    config.train.epochs = 60;
    config.train.eval_every = 20;
    config.output.dir = std::env::temp_dir().join(format!("blobnet-run-{}", std::process::id()));
    config.output.save_model = true;

    let report = run_experiment(&config).unwrap();
    assert_eq!(report.split.train.len(), 320);
    assert_eq!(report.training.epochs_run, 60);
    assert!(report.training.history.iter().all(|s| {
        let loss = s.test_loss.unwrap();
        loss.is_finite() && loss >= 0.0
    }));
    assert!((0.0..=1.0).contains(&report.evaluation.accuracy));

    write_artifacts(&report, &config.output).unwrap();
    let dir = &config.output.dir;
    for name in ["history.json", "decision_boundary_train.png", "decision_boundary_test.png", "loss_curves.png", "model.json"] {
        assert!(dir.join(name).exists(), "missing {name}");
    }
    let summary: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(dir.join("history.json")).unwrap()).unwrap();
    assert_eq!(summary["epochs_run"], 60);
    assert_eq!(summary["history"].as_array().unwrap().len(), report.training.history.len());
    let confusion: Vec<Vec<usize>> = serde_json::from_value(summary["confusion"].clone()).unwrap();
    assert_eq!(confusion, report.evaluation.confusion.counts);

    let restored = Network::load_json(dir.join("model.json")).unwrap();
    assert_eq!(restored.stages.len(), report.network.stages.len());
    let saved = restored.stages[4].weights.data.iter().flatten();
    let live = report.network.stages[4].weights.data.iter().flatten();
    for (a, b) in saved.zip(live) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn config_round_trips_through_json_file() {
    let path = std::env::temp_dir().join(format!("blobnet-config-{}.json", std::process::id()));
    let config = seed_999();
    config.save_json(&path).unwrap();
    let loaded = ExperimentConfig::load_json(&path).unwrap();
    assert_eq!(loaded, config);
    std::fs::remove_file(path).unwrap();
}

#[cfg(unix)]
#[test]
fn model_round_trips_through_a_non_utf8_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = std::env::temp_dir().join(format!("blobnet-bytes-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(OsStr::from_bytes(b"model-\xff.json"));

    let network =
        Network::new(2, 3, &ModelConfig::default(), &mut StdRng::seed_from_u64(11)).unwrap();
    network.save_json(&path).unwrap();
    assert!(path.exists());
    assert!(!dir.join("model-\u{fffd}.json").exists());

    let restored = Network::load_json(&path).unwrap();
    assert_eq!(restored.parameter_count(), network.parameter_count());

    std::fs::remove_dir_all(dir).unwrap();
}
