use crate::error::{BlobError, Result};
use crate::math::{log_sum_exp, softmax, Matrix};

/// Softmax followed by categorical cross-entropy, applied to raw logits.
///
/// Labels are class indices rather than one-hot rows. The loss is the mean
/// over the batch of `-log softmax(z)[y]`, evaluated as `logsumexp(z) - z[y]`.
pub struct SoftmaxCrossEntropy;

impl SoftmaxCrossEntropy {
    /// Mean cross-entropy of `logits` (n × K) against `labels` (length n).
    pub fn loss(logits: &Matrix, labels: &[usize]) -> Result<f64> {
        check_labels(logits, labels)?;
        if labels.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = logits.data.iter().zip(labels.iter())
            .map(|(row, &y)| log_sum_exp(row) - row[y])
            .sum();
        Ok(total / labels.len() as f64)
    }

    /// Gradient of the mean loss w.r.t. the logits.
    ///
    /// The softmax Jacobian and the cross-entropy derivative collapse to
    /// `(softmax(z) - onehot(y)) / n` per row.
    pub fn gradient(logits: &Matrix, labels: &[usize]) -> Result<Matrix> {
        check_labels(logits, labels)?;
        let inv_n = 1.0 / labels.len().max(1) as f64;
        let data = logits.data.iter().zip(labels.iter())
            .map(|(row, &y)| {
                let mut grad = softmax(row);
                grad[y] -= 1.0;
                grad.into_iter().map(|g| g * inv_n).collect()
            })
            .collect();
        Ok(Matrix { rows: logits.rows, cols: logits.cols, data })
    }
}

fn check_labels(logits: &Matrix, labels: &[usize]) -> Result<()> {
    if labels.len() != logits.rows {
        return Err(BlobError::ShapeMismatch {
            what: "label count",
            got: labels.len(),
            expected: logits.rows,
        });
    }
    if let Some(&label) = labels.iter().find(|&&y| y >= logits.cols) {
        return Err(BlobError::LabelOutOfRange { label, n_classes: logits.cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_logits_cost_log_k() {
        let logits = Matrix::zeros(3, 4);
        let loss = SoftmaxCrossEntropy::loss(&logits, &[0, 1, 3]).unwrap();
        assert!((loss - 4f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn confident_correct_prediction_is_cheap() {
        let logits = Matrix::from_data(vec![vec![20.0, 0.0, 0.0]]);
        let loss = SoftmaxCrossEntropy::loss(&logits, &[0]).unwrap();
        assert!(loss >= 0.0 && loss < 1e-8);
    }

    #[test]
    fn gradient_rows_sum_to_zero() {
        let logits = Matrix::from_data(vec![vec![0.3, -1.2, 2.0], vec![1.0, 1.0, 1.0]]);
        let grad = SoftmaxCrossEntropy::gradient(&logits, &[2, 0]).unwrap();
        for row in &grad.data {
            assert!(row.iter().sum::<f64>().abs() < 1e-12);
        }
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let logits = Matrix::from_data(vec![vec![0.5, -0.25, 1.5], vec![-2.0, 0.0, 0.75]]);
        let labels = [1, 2];
        let grad = SoftmaxCrossEntropy::gradient(&logits, &labels).unwrap();
        let h = 1e-6;
        for i in 0..logits.rows {
            for j in 0..logits.cols {
                let mut plus = logits.clone();
                plus.data[i][j] += h;
                let mut minus = logits.clone();
                minus.data[i][j] -= h;
                let numeric = (SoftmaxCrossEntropy::loss(&plus, &labels).unwrap()
                    - SoftmaxCrossEntropy::loss(&minus, &labels).unwrap()) / (2.0 * h);
                assert!((numeric - grad.data[i][j]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_label() {
        let logits = Matrix::zeros(1, 3);
        assert!(matches!(
            SoftmaxCrossEntropy::loss(&logits, &[3]),
            Err(BlobError::LabelOutOfRange { label: 3, n_classes: 3 })
        ));
    }
}
