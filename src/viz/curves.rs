use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{BlobError, Result};
use crate::train::EpochStats;
use crate::viz::canvas::{class_color, draw_line, fill_disc, to_pixel};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const PAD: i64 = 40;

/// Draws train loss (blue) and test loss (orange) against epoch.
pub fn plot_loss_curves(history: &[EpochStats], path: &Path) -> Result<()> {
    render_loss_curves(history)?.save(path)?;
    Ok(())
}

pub fn render_loss_curves(history: &[EpochStats]) -> Result<RgbImage> {
    if history.is_empty() {
        return Err(BlobError::InvalidConfig("no epochs to plot".into()));
    }

    let first = history[0].epoch as f64;
    let last = history[history.len() - 1].epoch as f64;
    let max_loss = history.iter()
        .flat_map(|s| std::iter::once(s.train_loss).chain(s.test_loss))
        .filter(|l| l.is_finite())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([255, 255, 255]));
    let inner_w = WIDTH - 2 * PAD as u32;
    let inner_h = HEIGHT - 2 * PAD as u32;
    let axis = Rgb([0, 0, 0]);
    draw_line(&mut img, (PAD, PAD), (PAD, PAD + inner_h as i64), axis);
    draw_line(&mut img, (PAD, PAD + inner_h as i64), (PAD + inner_w as i64, PAD + inner_h as i64), axis);

    let point = |epoch: usize, loss: f64| {
        let x = PAD + to_pixel(epoch as f64, first, last, inner_w);
        let y = PAD + inner_h as i64 - to_pixel(loss, 0.0, max_loss, inner_h);
        (x, y)
    };

    let train: Vec<(i64, i64)> = history.iter().map(|s| point(s.epoch, s.train_loss)).collect();
    let test: Vec<(i64, i64)> = history.iter()
        .filter_map(|s| s.test_loss.map(|l| point(s.epoch, l)))
        .collect();

    for (series, color) in [(train, class_color(0)), (test, class_color(1))] {
        for pair in series.windows(2) {
            draw_line(&mut img, pair[0], pair[1], color);
        }
        if let [only] = series.as_slice() {
            fill_disc(&mut img, only.0, only.1, 2, color);
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(epoch: usize, train: f64, test: f64) -> EpochStats {
        EpochStats {
            epoch,
            total_epochs: 3,
            train_loss: train,
            test_loss: Some(test),
            test_accuracy: Some(0.5),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn empty_history_is_rejected() {
        assert!(render_loss_curves(&[]).is_err());
    }

    #[test]
    fn draws_both_series() {
        let history = [stats(1, 2.0, 2.2), stats(2, 1.0, 1.4), stats(3, 0.5, 0.9)];
        let img = render_loss_curves(&history).unwrap();
        assert!(img.pixels().any(|p| *p == class_color(0)));
        assert!(img.pixels().any(|p| *p == class_color(1)));
    }
}
