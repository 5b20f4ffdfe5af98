use std::path::Path;

use image::{Rgb, RgbImage};
use serde::{Serialize, Deserialize};

use crate::data::Dataset;
use crate::error::{BlobError, Result};
use crate::eval::predict;
use crate::math::Matrix;
use crate::network::Network;
use crate::viz::canvas::{class_color, fill_disc, lighten, to_pixel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// Prediction grid resolution along each axis.
    pub grid_steps: usize,
    /// Padding added around the data range, in feature units.
    pub margin: f64,
    pub point_radius: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            width: 600,
            height: 600,
            grid_steps: 101,
            margin: 1.0,
            point_radius: 2,
        }
    }
}

/// Renders the network's decision regions over the span of `dataset` and
/// overlays the samples, each coloured by its true label. Only two-feature
/// networks can be drawn.
pub fn plot_decision_boundary(
    network: &Network,
    dataset: &Dataset,
    options: &PlotOptions,
    path: &Path,
) -> Result<()> {
    render_decision_boundary(network, dataset, options)?.save(path)?;
    Ok(())
}

/// Same as [`plot_decision_boundary`] but returns the image instead of saving it.
pub fn render_decision_boundary(
    network: &Network,
    dataset: &Dataset,
    options: &PlotOptions,
) -> Result<RgbImage> {
    if network.n_features() != 2 {
        return Err(BlobError::ShapeMismatch {
            what: "plotted feature count",
            got: network.n_features(),
            expected: 2,
        });
    }
    if dataset.n_features() != 2 {
        return Err(BlobError::ShapeMismatch {
            what: "dataset feature count",
            got: dataset.n_features(),
            expected: 2,
        });
    }
    if options.width == 0 || options.height == 0 || options.grid_steps < 2 {
        return Err(BlobError::InvalidConfig(
            "plot needs a non-empty canvas and at least two grid steps".into(),
        ));
    }

    let bounds = dataset.features.column_bounds();
    let (x_lo, x_hi) = (bounds[0].0 - options.margin, bounds[0].1 + options.margin);
    let (y_lo, y_hi) = (bounds[1].0 - options.margin, bounds[1].1 + options.margin);

    // Classify the whole grid in one batch; row-major with y varying slowest.
    let steps = options.grid_steps;
    let lerp = |lo: f64, hi: f64, i: usize| lo + (hi - lo) * i as f64 / (steps - 1) as f64;
    let grid: Vec<Vec<f64>> = (0..steps)
        .flat_map(|iy| (0..steps).map(move |ix| vec![lerp(x_lo, x_hi, ix), lerp(y_lo, y_hi, iy)]))
        .collect();
    let regions = predict(network, &Matrix::from_data(grid))?;

    let mut img = RgbImage::from_pixel(options.width, options.height, Rgb([255, 255, 255]));
    for py in 0..options.height {
        // Image rows grow downwards, feature y grows upwards.
        let iy = cell(options.height - 1 - py, options.height, steps);
        for px in 0..options.width {
            let ix = cell(px, options.width, steps);
            let class = regions[iy * steps + ix];
            img.put_pixel(px, py, lighten(class_color(class), 0.6));
        }
    }

    let radius = options.point_radius as i64;
    for (row, &label) in dataset.features.data.iter().zip(dataset.labels.iter()) {
        let px = to_pixel(row[0], x_lo, x_hi, options.width);
        let py = options.height as i64 - 1 - to_pixel(row[1], y_lo, y_hi, options.height);
        fill_disc(&mut img, px, py, radius + 1, Rgb([30, 30, 30]));
        fill_disc(&mut img, px, py, radius, class_color(label));
    }

    Ok(img)
}

/// Grid cell nearest to pixel `p` on an axis of `extent` pixels.
fn cell(p: u32, extent: u32, steps: usize) -> usize {
    let t = if extent > 1 { p as f64 / (extent - 1) as f64 } else { 0.0 };
    ((t * (steps - 1) as f64).round() as usize).min(steps - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::layers::Affine;

    /// Class 0 for x < 0, class 1 for x > 0.
    fn sign_network() -> Network {
        Network {
            stages: vec![Affine {
                weights: Matrix::from_data(vec![vec![-1.0, 1.0], vec![0.0, 0.0]]),
                biases: Matrix::zeros(1, 2),
                activation: ActivationFunction::Identity,
            }],
        }
    }

    #[test]
    fn regions_follow_the_network() {
        let ds = Dataset::new(
            Matrix::from_data(vec![vec![-3.0, 0.0], vec![3.0, 0.0]]),
            vec![0, 1],
        ).unwrap();
        let options = PlotOptions { point_radius: 0, ..PlotOptions::default() };
        let img = render_decision_boundary(&sign_network(), &ds, &options).unwrap();
        assert_eq!(*img.get_pixel(5, 300), lighten(class_color(0), 0.6));
        assert_eq!(*img.get_pixel(594, 300), lighten(class_color(1), 0.6));
    }

    #[test]
    fn rejects_three_feature_data() {
        let ds = Dataset::new(Matrix::zeros(2, 3), vec![0, 1]).unwrap();
        assert!(render_decision_boundary(&sign_network(), &ds, &PlotOptions::default()).is_err());
    }
}
