pub mod network;

pub use network::{ForwardTrace, ModelConfig, Network};
