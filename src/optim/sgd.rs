use crate::{layers::Gradients, network::Network};

/// Plain gradient descent: every parameter moves by `-learning_rate * grad`.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to every stage. `grads` is ordered like `network.stages`.
    pub fn step(&self, network: &mut Network, grads: &[Gradients]) {
        for (stage, g) in network.stages.iter_mut().zip(grads.iter()) {
            stage.apply_gradients(g, self.learning_rate);
        }
    }
}
