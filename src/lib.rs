pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;
pub mod eval;
pub mod viz;
pub mod config;
pub mod pipeline;

// Convenience re-exports
pub use error::{BlobError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::affine::Affine;
pub use network::network::{ModelConfig, Network};
pub use loss::cross_entropy::SoftmaxCrossEntropy;
pub use optim::sgd::Sgd;
pub use data::{make_blobs, train_test_split, BlobConfig, Dataset, Split};
pub use train::{train_loop, TrainConfig};
pub use eval::{accuracy, evaluate, predict};
pub use config::ExperimentConfig;
pub use pipeline::{run_experiment, write_artifacts};
