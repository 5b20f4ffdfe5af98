use image::{Rgb, RgbImage};

/// Matplotlib's ten-colour categorical cycle.
const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

pub fn class_color(class: usize) -> Rgb<u8> {
    Rgb(PALETTE[class % PALETTE.len()])
}

/// `color` mixed towards white; `amount` 0 keeps the colour, 1 gives white.
pub fn lighten(color: Rgb<u8>, amount: f64) -> Rgb<u8> {
    let mix = |c: u8| (c as f64 + (255.0 - c as f64) * amount).round() as u8;
    Rgb([mix(color.0[0]), mix(color.0[1]), mix(color.0[2])])
}

pub fn fill_disc(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Straight line between two pixel positions.
pub fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).max(1);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = from.0 as f64 + (to.0 - from.0) as f64 * t;
        let y = from.1 as f64 + (to.1 - from.1) as f64 * t;
        put(img, x.round() as i64, y.round() as i64, color);
    }
}

/// Writes a pixel, silently clipping anything off the canvas.
pub fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Maps `value` in `[lo, hi]` to a pixel index in `[0, extent)`.
pub fn to_pixel(value: f64, lo: f64, hi: f64, extent: u32) -> i64 {
    let span = if hi > lo { hi - lo } else { 1.0 };
    (((value - lo) / span) * (extent.saturating_sub(1)) as f64).round() as i64
}
