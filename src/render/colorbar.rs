//! Colorbar placement next to the main axes.
//!
//! The bar is carved out to the right of the axes: its width is a fraction
//! of the axes width and it is separated by a fixed pad in inches. The main
//! axes keep their size and position; the canvas grows to the right when
//! the bar and its labels would not fit.

use super::colormap::band_color;
use super::figure::{format_ticks, Anchor, Figure, PixelRect, TickFormat};
use super::style::BLACK;
use crate::errors::{OceanDiagError, Result};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};

const TICK_LENGTH: f32 = 5.0;
const LABEL_GAP: f32 = 8.0;
/// White space kept right of the widest label.
const RIGHT_MARGIN: f32 = 12.0;

/// Width and spacing of an appended colorbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorbarLayout {
    /// Bar width as a fraction of the axes width
    pub size_fraction: f32,
    /// Gap between axes and bar, in inches
    pub pad_inches: f32,
}

impl Default for ColorbarLayout {
    fn default() -> Self {
        Self {
            size_fraction: 0.03,
            pad_inches: 0.5,
        }
    }
}

/// Rectangle for a bar appended to the right of `axes`.
///
/// Same vertical extent as `axes`.
pub fn append_axes_right(axes: PixelRect, layout: &ColorbarLayout, dpi: f32) -> PixelRect {
    PixelRect::new(
        axes.right() + layout.pad_inches * dpi,
        axes.y,
        axes.width * layout.size_fraction,
        axes.height,
    )
}

impl Figure {
    /// Draw a colorbar for the filled bands between consecutive `levels`.
    ///
    /// Returns the rectangle occupied by the bar.
    pub fn colorbar(&mut self, levels: &[f64], layout: &ColorbarLayout) -> Result<PixelRect> {
        draw_colorbar(self, levels, layout)
    }
}

fn draw_colorbar(fig: &mut Figure, levels: &[f64], layout: &ColorbarLayout) -> Result<PixelRect> {
    if levels.len() < 2 {
        return Err(OceanDiagError::InvalidParameter {
            message: format!("a colorbar needs at least two levels, got {}", levels.len()),
        });
    }
    let bar = append_axes_right(fig.axes(), layout, fig.dpi());
    let n_bands = levels.len() - 1;
    let stride = ((n_bands + 7) / 8).max(1);
    let tick_size = fig.font_sizes().tick;
    let labels = format_ticks(levels, TickFormat::Plain);

    let label_width = labels
        .iter()
        .step_by(stride)
        .filter_map(|label| fig.text_extent(label, tick_size))
        .map(|(w, _)| w.max(0) as f32)
        .fold(0.0f32, f32::max);
    let needed = bar.right() + LABEL_GAP + label_width + RIGHT_MARGIN;
    fig.extend_right(needed.ceil() as u32);

    let band_height = bar.height / n_bands as f32;
    for band in 0..n_bands {
        let top = bar.bottom() - (band + 1) as f32 * band_height;
        let rect = PixelRect::new(bar.x, top.floor(), bar.width, band_height.ceil() + 1.0);
        if let Some(rect) = rect.to_rect() {
            draw_filled_rect_mut(fig.image_mut(), rect, band_color(band, n_bands));
        }
    }
    if let Some(rect) = bar.to_rect() {
        draw_hollow_rect_mut(fig.image_mut(), rect, BLACK);
    }

    for (k, label) in labels.iter().enumerate().step_by(stride) {
        let y = bar.bottom() - k as f32 * band_height;
        draw_line_segment_mut(fig.image_mut(), (bar.right(), y), (bar.right() + TICK_LENGTH, y), BLACK);
        fig.draw_text(label, bar.right() + LABEL_GAP, y, tick_size, Anchor::CenterLeft);
    }

    tracing::debug!(?bar, n_bands, "drew colorbar");
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::figure::DEFAULT_DPI;
    use crate::render::style::{bundled_font, FontSizes, WHITE};

    #[test]
    fn test_append_axes_right_geometry() {
        let axes = PixelRect::new(150.0, 96.0, 930.0, 616.0);
        let bar = append_axes_right(axes, &ColorbarLayout::default(), 100.0);
        assert!((bar.x - 1130.0).abs() < 1e-3);
        assert!((bar.width - 27.9).abs() < 1e-3);
        assert_eq!(bar.y, axes.y);
        assert_eq!(bar.height, axes.height);
    }

    #[test]
    fn test_colorbar_leaves_axes_untouched() {
        let mut fig = Figure::new(12.0, 8.0, DEFAULT_DPI);
        let before = fig.axes();
        let bar = fig.colorbar(&[26.0, 26.5, 27.0, 27.5], &ColorbarLayout::default()).unwrap();
        assert_eq!(fig.axes(), before);
        assert!(bar.x > before.right());

        let x = (bar.x + bar.width / 2.0) as u32;
        let bottom = fig.image().get_pixel(x, (bar.bottom() - 5.0) as u32);
        let top = fig.image().get_pixel(x, (bar.y + 5.0) as u32);
        assert_eq!(*bottom, band_color(0, 3));
        assert_eq!(*top, band_color(2, 3));
    }

    #[test]
    fn test_colorbar_needs_two_levels() {
        let mut fig = Figure::new(4.0, 3.0, DEFAULT_DPI);
        assert!(fig.colorbar(&[1.0], &ColorbarLayout::default()).is_err());
    }

    #[test]
    fn test_colorbar_labels_stay_on_canvas() {
        let font = bundled_font().unwrap();
        let mut fig = Figure::new(12.0, 8.0, DEFAULT_DPI).with_font(Some(font));
        let axes = fig.axes();
        let levels: Vec<f64> = (0..10).map(|k| 26.0 + 0.25 * k as f64).collect();
        let bar = fig.colorbar(&levels, &ColorbarLayout::default()).unwrap();

        let (width, height) = fig.dimensions();
        assert!(width > 1200);
        assert_eq!(fig.axes(), axes);
        let last = width - 1;
        assert!((0..height).all(|y| *fig.image().get_pixel(last, y) == WHITE));

        let label_ink = (bar.right() as u32 + 8..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .filter(|&(x, y)| *fig.image().get_pixel(x, y) != WHITE)
            .count();
        assert!(label_ink > 0);
    }

    #[test]
    fn test_colorbar_labels_follow_tick_size() {
        let font = bundled_font().unwrap();
        let levels = [26.0, 27.0, 28.0];
        let mut small = Figure::new(12.0, 8.0, DEFAULT_DPI)
            .with_font(Some(font.clone()))
            .with_font_sizes(FontSizes::profile());
        let mut large = Figure::new(12.0, 8.0, DEFAULT_DPI)
            .with_font(Some(font))
            .with_font_sizes(FontSizes {
                tick: 40.0,
                ..FontSizes::default()
            });
        small.colorbar(&levels, &ColorbarLayout::default()).unwrap();
        large.colorbar(&levels, &ColorbarLayout::default()).unwrap();
        assert!(large.dimensions().0 > small.dimensions().0);
    }
}
