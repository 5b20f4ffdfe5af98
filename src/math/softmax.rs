use crate::math::Matrix;

/// Softmax of a single score vector, shifted by its maximum so large logits
/// cannot overflow `exp`.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Row-wise softmax: each row of logits becomes a probability distribution.
pub fn softmax_rows(logits: &Matrix) -> Matrix {
    Matrix {
        rows: logits.rows,
        cols: logits.cols,
        data: logits.data.iter().map(|row| softmax(row)).collect(),
    }
}

/// `log(sum(exp(scores)))`, computed without overflow.
pub fn log_sum_exp(scores: &[f64]) -> f64 {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + scores.iter().map(|&s| (s - max).exp()).sum::<f64>().ln()
}

/// Index of the maximum element. Ties resolve to the lowest index; an empty
/// slice yields 0.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate().skip(1) {
        if x > v[best] {
            best = i;
        }
    }
    best
}
