pub mod metrics;
pub mod evaluate;

pub use crate::math::{argmax, softmax_rows};
pub use metrics::{accuracy, ConfusionMatrix};
pub use evaluate::{evaluate, predict, predict_proba, Evaluation};
