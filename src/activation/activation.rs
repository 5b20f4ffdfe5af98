use serde::{Serialize, Deserialize};

/// Element-wise function applied after a stage's affine transform.
///
/// The blob classifier runs with `Identity` everywhere, which makes the whole
/// stack a single linear map factored into several matrix products. The
/// nonlinear variants are kept selectable so the same network can be rerun
/// with a nonlinearity between hidden stages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Identity,
    #[serde(rename = "relu")]
    ReLU,
    Tanh,
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative evaluated at the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_pass_through() {
        let act = ActivationFunction::default();
        assert_eq!(act, ActivationFunction::Identity);
        assert_eq!(act.function(-3.5), -3.5);
        assert_eq!(act.derivative(-3.5), 1.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for act in [ActivationFunction::Tanh, ActivationFunction::Sigmoid, ActivationFunction::ReLU] {
            for &x in &[-1.3, 0.4, 2.1] {
                let numeric = (act.function(x + h) - act.function(x - h)) / (2.0 * h);
                assert!((numeric - act.derivative(x)).abs() < 1e-5, "{act:?} at {x}");
            }
        }
    }

    #[test]
    fn deserializes_from_snake_case() {
        let act: ActivationFunction = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(act, ActivationFunction::ReLU);
    }
}
