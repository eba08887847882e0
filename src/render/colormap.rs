//! Sequential colormap and contour level selection.

use image::Rgba;

/// Viridis control points, evenly spaced on [0, 1].
const VIRIDIS: [(u8, u8, u8); 6] = [
    (68, 1, 84),
    (65, 68, 135),
    (42, 120, 142),
    (34, 168, 132),
    (122, 209, 81),
    (253, 231, 37),
];

fn interpolate_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Color at position `t` (clamped to [0, 1]) along the colormap.
pub fn viridis(t: f32) -> Rgba<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lower as f32;
    let (r1, g1, b1) = VIRIDIS[lower];
    let (r2, g2, b2) = VIRIDIS[lower + 1];
    Rgba([
        interpolate_channel(r1, r2, frac),
        interpolate_channel(g1, g2, frac),
        interpolate_channel(b1, b2, frac),
        255,
    ])
}

/// Color of filled band `band` out of `n_bands`.
pub fn band_color(band: usize, n_bands: usize) -> Rgba<u8> {
    if n_bands <= 1 {
        return viridis(0.5);
    }
    viridis(band as f32 / (n_bands - 1) as f32)
}

/// Round step for roughly `target` intervals over `span`: 1, 2, 2.5 or 5 × 10ⁿ.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Contour boundaries covering `[min, max]` on round values.
///
/// Returns at least two boundaries; the first is `<= min` and the last
/// `>= max`.
pub fn contour_levels(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return vec![];
    }
    if min == max {
        return vec![min - 0.5, max + 0.5];
    }
    let step = nice_step(max - min, target);
    let start = (min / step).floor() as i64;
    let end = (max / step).ceil() as i64;
    (start..=end).map(|k| k as f64 * step).collect()
}

/// Index of the band between consecutive `levels` containing `value`.
pub fn band_index(levels: &[f64], value: f64) -> Option<usize> {
    if levels.len() < 2 || value.is_nan() {
        return None;
    }
    let last = levels.len() - 1;
    if value < levels[0] || value > levels[last] {
        return None;
    }
    let above = levels.partition_point(|&level| level <= value);
    Some(above.saturating_sub(1).min(last - 1))
}
