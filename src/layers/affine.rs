use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{BlobError, Result};
use crate::math::Matrix;

/// One explicit stage of the classifier: `a = σ(x·W + b)`.
///
/// `weights` is `fan_in × fan_out` and `biases` is `1 × fan_out`; a batch of
/// inputs is `n × fan_in`, one sample per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affine {
    pub weights: Matrix,
    pub biases: Matrix,
    pub activation: ActivationFunction,
}

/// Loss gradients with respect to one stage's parameters.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Affine {
    /// Initialises weights and biases uniformly in `±1/sqrt(fan_in)`.
    pub fn new<R: Rng + ?Sized>(
        fan_in: usize,
        fan_out: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Affine {
        let bound = 1.0 / (fan_in.max(1) as f64).sqrt();
        Affine {
            weights: Matrix::uniform(fan_in, fan_out, bound, rng),
            biases: Matrix::uniform(1, fan_out, bound, rng),
            activation,
        }
    }

    pub fn fan_in(&self) -> usize {
        self.weights.rows
    }

    pub fn fan_out(&self) -> usize {
        self.weights.cols
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.rows * self.weights.cols + self.biases.cols
    }

    /// Pre-activation `z = x·W + b`.
    pub fn pre_activation(&self, input: &Matrix) -> Result<Matrix> {
        if input.cols != self.fan_in() {
            return Err(BlobError::ShapeMismatch {
                what: "stage input width",
                got: input.cols,
                expected: self.fan_in(),
            });
        }
        Ok((input * &self.weights).add_row(&self.biases))
    }

    pub fn forward(&self, input: &Matrix) -> Result<Matrix> {
        let z = self.pre_activation(input)?;
        Ok(self.activate(&z))
    }

    pub fn activate(&self, z: &Matrix) -> Matrix {
        match self.activation {
            ActivationFunction::Identity => z.clone(),
            act => z.map(|x| act.function(x)),
        }
    }

    /// Backward step for one stage.
    ///
    /// `upstream` is ∂L/∂a for this stage's output, `input` the batch that was
    /// fed in and `pre` the recorded pre-activation. Returns the parameter
    /// gradients together with ∂L/∂input for the previous stage.
    pub fn compute_gradients(
        &self,
        upstream: &Matrix,
        input: &Matrix,
        pre: &Matrix,
    ) -> (Gradients, Matrix) {
        // δ = ∂L/∂a ⊙ σ'(z)
        let delta = match self.activation {
            ActivationFunction::Identity => upstream.clone(),
            act => upstream.hadamard(&pre.map(|x| act.derivative(x))),
        };

        let weights = &input.transpose() * &delta;
        let biases = delta.sum_rows();
        let downstream = &delta * &self.weights.transpose();

        (Gradients { weights, biases }, downstream)
    }

    /// Moves the parameters against the gradient, scaled by `lr`.
    pub fn apply_gradients(&mut self, grads: &Gradients, lr: f64) {
        self.weights = &self.weights - &grads.weights.map(|x| x * lr);
        self.biases = &self.biases - &grads.biases.map(|x| x * lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_stage() -> Affine {
        Affine {
            weights: Matrix::from_data(vec![vec![1.0, 0.0, -1.0], vec![2.0, 1.0, 0.5]]),
            biases: Matrix::from_data(vec![vec![0.1, 0.2, 0.3]]),
            activation: ActivationFunction::Identity,
        }
    }

    #[test]
    fn forward_is_matrix_multiply_add() {
        let stage = fixed_stage();
        let x = Matrix::from_data(vec![vec![1.0, 1.0], vec![0.0, 2.0]]);
        let out = stage.forward(&x).unwrap();
        assert_eq!(out.rows, 2);
        assert_eq!(out.cols, 3);
        let expected = [[3.1, 1.2, -0.2], [4.1, 2.2, 1.3]];
        for (row, want) in out.data.iter().zip(expected.iter()) {
            for (got, w) in row.iter().zip(want.iter()) {
                assert!((got - w).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rejects_wrong_input_width() {
        let stage = fixed_stage();
        let x = Matrix::zeros(4, 3);
        match stage.forward(&x) {
            Err(BlobError::ShapeMismatch { got: 3, expected: 2, .. }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn init_is_bounded_by_fan_in() {
        let mut rng = StdRng::seed_from_u64(11);
        let stage = Affine::new(16, 4, ActivationFunction::Identity, &mut rng);
        assert!(stage.weights.data.iter().flatten().all(|w| w.abs() <= 0.25));
        assert_eq!(stage.parameter_count(), 16 * 4 + 4);
    }

    #[test]
    fn apply_gradients_steps_against_gradient() {
        let mut stage = fixed_stage();
        let grads = Gradients {
            weights: Matrix::from_data(vec![vec![1.0; 3], vec![1.0; 3]]),
            biases: Matrix::from_data(vec![vec![2.0; 3]]),
        };
        stage.apply_gradients(&grads, 0.5);
        assert_eq!(stage.weights.data[0], vec![0.5, -0.5, -1.5]);
        assert!((stage.biases.data[0][0] - (0.1 - 1.0)).abs() < 1e-12);
    }
}
