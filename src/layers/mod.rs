pub mod affine;

pub use affine::{Affine, Gradients};
