use crate::data::Dataset;
use crate::error::Result;
use crate::eval::metrics::{accuracy, ConfusionMatrix};
use crate::loss::SoftmaxCrossEntropy;
use crate::math::{argmax, softmax_rows, Matrix};
use crate::network::Network;

/// Class probabilities for every row of `features`.
pub fn predict_proba(network: &Network, features: &Matrix) -> Result<Matrix> {
    Ok(softmax_rows(&network.forward(features)?))
}

/// Most probable class for every row of `features`.
pub fn predict(network: &Network, features: &Matrix) -> Result<Vec<usize>> {
    let probs = predict_proba(network, features)?;
    Ok(probs.data.iter().map(|row| argmax(row)).collect())
}

/// Held-out metrics for a trained network.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
    pub predictions: Vec<usize>,
    pub confusion: ConfusionMatrix,
}

/// Scores `network` on `dataset` with a single read-only forward pass.
pub fn evaluate(network: &Network, dataset: &Dataset) -> Result<Evaluation> {
    let logits = network.forward(&dataset.features)?;
    let loss = SoftmaxCrossEntropy::loss(&logits, &dataset.labels)?;
    let predictions: Vec<usize> = softmax_rows(&logits).data.iter().map(|row| argmax(row)).collect();
    let accuracy = accuracy(&predictions, &dataset.labels)?;
    let confusion = ConfusionMatrix::from_predictions(&predictions, &dataset.labels, network.n_classes())?;
    Ok(Evaluation { loss, accuracy, predictions, confusion })
}
