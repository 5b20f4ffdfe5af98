use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{BlobError, Result};
use crate::layers::{Affine, Gradients};
use crate::math::Matrix;

/// Shape of the classifier between its input and output widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Width of every hidden stage.
    pub hidden_units: usize,
    /// Number of stages that output `hidden_units`; one more stage maps to
    /// the classes.
    pub hidden_layers: usize,
    /// Applied after every hidden stage. The output stage always emits raw
    /// logits.
    pub activation: ActivationFunction,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            hidden_units: 8,
            hidden_layers: 4,
            activation: ActivationFunction::Identity,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_units == 0 {
            return Err(BlobError::InvalidConfig("hidden_units must be at least 1".into()));
        }
        if self.hidden_layers == 0 {
            return Err(BlobError::InvalidConfig("hidden_layers must be at least 1".into()));
        }
        Ok(())
    }
}

/// Intermediate values recorded by [`Network::forward_trace`].
///
/// `inputs[i]` and `pre_activations[i]` belong to stage `i`; `logits` is the
/// output of the last stage.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pub inputs: Vec<Matrix>,
    pub pre_activations: Vec<Matrix>,
    pub logits: Matrix,
}

/// A fixed, ordered list of affine stages mapping features to class logits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub stages: Vec<Affine>,
}

impl Network {
    /// Builds `n_features → hidden → … → hidden → n_classes`.
    pub fn new<R: Rng + ?Sized>(
        n_features: usize,
        n_classes: usize,
        config: &ModelConfig,
        rng: &mut R,
    ) -> Result<Network> {
        config.validate()?;
        if n_features == 0 || n_classes == 0 {
            return Err(BlobError::InvalidConfig(
                "network needs at least one input feature and one class".into(),
            ));
        }

        let mut stages = Vec::with_capacity(config.hidden_layers + 1);
        let mut fan_in = n_features;
        for _ in 0..config.hidden_layers {
            stages.push(Affine::new(fan_in, config.hidden_units, config.activation, rng));
            fan_in = config.hidden_units;
        }
        stages.push(Affine::new(fan_in, n_classes, ActivationFunction::Identity, rng));

        Ok(Network { stages })
    }

    pub fn n_features(&self) -> usize {
        self.stages.first().map_or(0, Affine::fan_in)
    }

    pub fn n_classes(&self) -> usize {
        self.stages.last().map_or(0, Affine::fan_out)
    }

    pub fn parameter_count(&self) -> usize {
        self.stages.iter().map(Affine::parameter_count).sum()
    }

    /// Logits for a batch of samples. Never touches the parameters.
    pub fn forward(&self, input: &Matrix) -> Result<Matrix> {
        let mut current = input.clone();
        for stage in &self.stages {
            current = stage.forward(&current)?;
        }
        Ok(current)
    }

    /// Forward pass that keeps every stage's input and pre-activation for
    /// [`Network::backward`].
    pub fn forward_trace(&self, input: &Matrix) -> Result<ForwardTrace> {
        let mut inputs = Vec::with_capacity(self.stages.len());
        let mut pre_activations = Vec::with_capacity(self.stages.len());
        let mut current = input.clone();
        for stage in &self.stages {
            let z = stage.pre_activation(&current)?;
            let a = stage.activate(&z);
            inputs.push(current);
            pre_activations.push(z);
            current = a;
        }
        Ok(ForwardTrace { inputs, pre_activations, logits: current })
    }

    /// Reverse-mode pass. `d_logits` is ∂L/∂logits; the result holds one
    /// [`Gradients`] per stage, in stage order.
    pub fn backward(&self, trace: &ForwardTrace, d_logits: &Matrix) -> Result<Vec<Gradients>> {
        let n = self.stages.len();
        if trace.inputs.len() != n || trace.pre_activations.len() != n {
            return Err(BlobError::ShapeMismatch {
                what: "traced stage count",
                got: trace.inputs.len().min(trace.pre_activations.len()),
                expected: n,
            });
        }
        if d_logits.rows != trace.logits.rows {
            return Err(BlobError::ShapeMismatch {
                what: "logit gradient rows",
                got: d_logits.rows,
                expected: trace.logits.rows,
            });
        }
        if d_logits.cols != trace.logits.cols {
            return Err(BlobError::ShapeMismatch {
                what: "logit gradient width",
                got: d_logits.cols,
                expected: trace.logits.cols,
            });
        }

        let mut grads = Vec::with_capacity(self.stages.len());
        let mut upstream = d_logits.clone();
        for (i, stage) in self.stages.iter().enumerate().rev() {
            let (g, downstream) =
                stage.compute_gradients(&upstream, &trace.inputs[i], &trace.pre_activations[i]);
            grads.push(g);
            upstream = downstream;
        }
        grads.reverse();
        Ok(grads)
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
