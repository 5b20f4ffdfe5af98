use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::data::Dataset;
use crate::error::{BlobError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of samples held out for testing, in (0, 1).
    pub test_fraction: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig { test_fraction: 0.2 }
    }
}

/// Disjoint train/test partition of a dataset.
///
/// `train_indices` and `test_indices` point into the dataset that was split.
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Randomly partitions `dataset` into train and test subsets.
///
/// The test subset gets `ceil(test_fraction * n)` samples and the train subset
/// the rest. There is no stratification.
pub fn train_test_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    test_fraction: f64,
    rng: &mut R,
) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(BlobError::InvalidConfig(format!(
            "test_fraction must lie in (0, 1), got {test_fraction}"
        )));
    }

    let n = dataset.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(BlobError::InvalidConfig(format!(
            "splitting {n} samples at {test_fraction} leaves an empty subset"
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let test_indices = order[..n_test].to_vec();
    let train_indices = order[n_test..].to_vec();

    Ok(Split {
        train: dataset.subset(&train_indices),
        test: dataset.subset(&test_indices),
        train_indices,
        test_indices,
    })
}
