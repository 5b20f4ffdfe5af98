use crate::{
    data::Dataset,
    error::Result,
    loss::SoftmaxCrossEntropy,
    network::Network,
    optim::Sgd,
};

/// One full-batch gradient step over `train`.
///
/// Returns the mean cross-entropy measured by the forward pass, i.e. before
/// the parameters were updated.
pub fn train_step(network: &mut Network, train: &Dataset, optimizer: &Sgd) -> Result<f64> {
    let trace = network.forward_trace(&train.features)?;
    let loss = SoftmaxCrossEntropy::loss(&trace.logits, &train.labels)?;

    // Initial delta: combined softmax + cross-entropy gradient w.r.t. logits.
    let d_logits = SoftmaxCrossEntropy::gradient(&trace.logits, &train.labels)?;
    let grads = network.backward(&trace, &d_logits)?;

    optimizer.step(network, &grads);
    Ok(loss)
}
