use crate::error::{BlobError, Result};

/// Fraction of positions where `predicted` and `truth` agree.
/// Two empty slices score 0.
pub fn accuracy(predicted: &[usize], truth: &[usize]) -> Result<f64> {
    if predicted.len() != truth.len() {
        return Err(BlobError::ShapeMismatch {
            what: "prediction count",
            got: predicted.len(),
            expected: truth.len(),
        });
    }
    if truth.is_empty() {
        return Ok(0.0);
    }
    let correct = predicted.iter().zip(truth.iter()).filter(|(p, t)| p == t).count();
    Ok(correct as f64 / truth.len() as f64)
}

/// `counts[t][p]` is the number of samples of true class `t` predicted as `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_predictions(predicted: &[usize], truth: &[usize], n_classes: usize) -> Result<Self> {
        if predicted.len() != truth.len() {
            return Err(BlobError::ShapeMismatch {
                what: "prediction count",
                got: predicted.len(),
                expected: truth.len(),
            });
        }
        let mut counts = vec![vec![0; n_classes]; n_classes];
        for (&p, &t) in predicted.iter().zip(truth.iter()) {
            for label in [p, t] {
                if label >= n_classes {
                    return Err(BlobError::LabelOutOfRange { label, n_classes });
                }
            }
            counts[t][p] += 1;
        }
        Ok(ConfusionMatrix { counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.counts.len()).map(|i| self.counts[i][i]).sum()
    }

    /// Recall of each true class; `None` for classes with no samples.
    pub fn per_class_recall(&self) -> Vec<Option<f64>> {
        self.counts.iter().enumerate()
            .map(|(t, row)| {
                let support: usize = row.iter().sum();
                (support > 0).then(|| row[t] as f64 / support as f64)
            })
            .collect()
    }
}
