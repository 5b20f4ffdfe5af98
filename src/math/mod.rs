pub mod matrix;
pub mod softmax;

pub use matrix::{Matrix, sample_standard_normal};
pub use softmax::{argmax, log_sum_exp, softmax, softmax_rows};
