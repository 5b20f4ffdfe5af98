//! PNG rendering of decision regions and loss curves.
//!
//! Plots are drawn straight into an `image::RgbImage`; nothing here is needed
//! for training or evaluation.

pub mod canvas;
pub mod boundary;
pub mod curves;

pub use boundary::{plot_decision_boundary, PlotOptions};
pub use curves::plot_loss_curves;
