use crate::error::{BlobError, Result};
use crate::math::Matrix;

/// Labelled samples: one feature row per sample and a class index per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vec<usize>,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vec<usize>) -> Result<Dataset> {
        if features.rows != labels.len() {
            return Err(BlobError::ShapeMismatch {
                what: "dataset labels",
                got: labels.len(),
                expected: features.rows,
            });
        }
        Ok(Dataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.cols
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select_rows(indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Number of samples per class, for classes `0..n_classes`.
    /// Labels outside that range are ignored.
    pub fn class_counts(&self, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; n_classes];
        for &y in &self.labels {
            if let Some(c) = counts.get_mut(y) {
                *c += 1;
            }
        }
        counts
    }
}
