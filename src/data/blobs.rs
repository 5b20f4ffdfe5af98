use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::data::Dataset;
use crate::error::{BlobError, Result};
use crate::math::{sample_standard_normal, Matrix};

/// Parameters for isotropic Gaussian blob generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_classes: usize,
    /// Standard deviation of every cluster along every feature.
    pub cluster_std: f64,
    /// Cluster centres are drawn uniformly from `[lo, hi)` in each feature.
    pub center_box: (f64, f64),
}

impl Default for BlobConfig {
    fn default() -> Self {
        BlobConfig {
            n_samples: 4000,
            n_features: 2,
            n_classes: 10,
            cluster_std: 1.0,
            center_box: (-10.0, 10.0),
        }
    }
}

impl BlobConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_classes == 0 {
            return Err(BlobError::InvalidConfig("n_classes must be at least 1".into()));
        }
        if self.n_features == 0 {
            return Err(BlobError::InvalidConfig("n_features must be at least 1".into()));
        }
        if self.n_samples < self.n_classes {
            return Err(BlobError::InvalidConfig(format!(
                "n_samples ({}) must be at least n_classes ({})",
                self.n_samples, self.n_classes
            )));
        }
        if !(self.cluster_std.is_finite() && self.cluster_std > 0.0) {
            return Err(BlobError::InvalidConfig("cluster_std must be positive and finite".into()));
        }
        let (lo, hi) = self.center_box;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(BlobError::InvalidConfig("center_box must be a finite, non-empty range".into()));
        }
        Ok(())
    }
}

/// Generates labelled points scattered around `n_classes` random centres.
///
/// Samples are divided as evenly as possible between clusters (the first
/// `n_samples % n_classes` clusters get one extra) and shuffled, so the
/// returned order carries no label information.
pub fn make_blobs<R: Rng + ?Sized>(config: &BlobConfig, rng: &mut R) -> Result<Dataset> {
    config.validate()?;

    let (lo, hi) = config.center_box;
    let centers: Vec<Vec<f64>> = (0..config.n_classes)
        .map(|_| (0..config.n_features).map(|_| rng.gen_range(lo..hi)).collect())
        .collect();
    debug!("blob centres: {centers:?}");

    let base = config.n_samples / config.n_classes;
    let extra = config.n_samples % config.n_classes;

    let mut rows = Vec::with_capacity(config.n_samples);
    let mut labels = Vec::with_capacity(config.n_samples);
    for (class, center) in centers.iter().enumerate() {
        let count = base + usize::from(class < extra);
        for _ in 0..count {
            rows.push(
                center.iter()
                    .map(|c| c + config.cluster_std * sample_standard_normal(rng))
                    .collect::<Vec<f64>>(),
            );
            labels.push(class);
        }
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.shuffle(rng);

    let features = Matrix {
        rows: rows.len(),
        cols: config.n_features,
        data: order.iter().map(|&i| rows[i].clone()).collect(),
    };
    let labels = order.iter().map(|&i| labels[i]).collect();
    Dataset::new(features, labels)
}
