//! A raster figure holding a single set of axes.
//!
//! Data coordinates map linearly onto the axes rectangle. Limits may be given
//! in either order; `(6000, 0)` on the y axis puts zero pressure at the top.
//! Titles, labels and tick values need a TrueType font; without one the
//! figure still renders data, frame and tick marks.

use super::colormap::nice_step;
use super::style::{FontSizes, LineSpec, BLACK, WHITE};
use crate::errors::{OceanDiagError, Result};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::path::Path;

pub const DEFAULT_DPI: f32 = 100.0;

/// Axes placement as fractions of the figure: left, bottom, right, top.
const SUBPLOT_PARAMS: (f32, f32, f32, f32) = (0.125, 0.11, 0.9, 0.88);

const TICK_LENGTH: f32 = 7.0;
const TEXT_GAP: f32 = 6.0;

/// Axis-aligned rectangle in pixel coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub(crate) fn to_rect(self) -> Option<Rect> {
        let width = self.width.round() as u32;
        let height = self.height.round() as u32;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Rect::at(self.x.round() as i32, self.y.round() as i32).of_size(width, height))
    }
}

/// How tick values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickFormat {
    /// Plain decimals unless values are extreme (< 1e-4 or ≥ 1e5)
    #[default]
    Plain,
    /// Scientific notation whenever values fall outside [1e-2, 1e2)
    Scientific,
}

/// Where a text anchor point sits on the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopCenter,
    BottomCenter,
    CenterRight,
    CenterLeft,
}

pub struct Figure {
    image: RgbaImage,
    dpi: f32,
    axes: PixelRect,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    invert_y: bool,
    font: Option<Font<'static>>,
    font_sizes: FontSizes,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    x_tick_format: TickFormat,
    show_ticks: bool,
    finished: bool,
}

impl Figure {
    /// Create a white figure of `width_in × height_in` inches at `dpi`.
    pub fn new(width_in: f32, height_in: f32, dpi: f32) -> Self {
        let width = (width_in * dpi).round().max(1.0) as u32;
        let height = (height_in * dpi).round().max(1.0) as u32;
        let (left, bottom, right, top) = SUBPLOT_PARAMS;
        let (w, h) = (width as f32, height as f32);
        let axes = PixelRect::new(left * w, (1.0 - top) * h, (right - left) * w, (top - bottom) * h);

        Self {
            image: RgbaImage::from_pixel(width, height, WHITE),
            dpi,
            axes,
            xlim: None,
            ylim: None,
            invert_y: false,
            font: None,
            font_sizes: FontSizes::default(),
            title: None,
            xlabel: None,
            ylabel: None,
            x_tick_format: TickFormat::Plain,
            show_ticks: true,
            finished: false,
        }
    }

    pub fn with_font(mut self, font: Option<Font<'static>>) -> Self {
        self.font = font;
        self
    }

    pub fn with_font_sizes(mut self, sizes: FontSizes) -> Self {
        self.font_sizes = sizes;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn axes(&self) -> PixelRect {
        self.axes
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Grow the canvas to at least `width` pixels, padding the right with white.
    ///
    /// Everything already drawn, the axes included, keeps its pixel position.
    pub(crate) fn extend_right(&mut self, width: u32) {
        let (current, height) = self.image.dimensions();
        if width <= current {
            return;
        }
        let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
        imageops::replace(&mut canvas, &self.image, 0, 0);
        self.image = canvas;
        tracing::debug!(from = current, to = width, "widened figure canvas");
    }

    pub fn font_sizes(&self) -> FontSizes {
        self.font_sizes
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = Some((left, right));
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = Some((bottom, top));
    }

    /// Flip the y axis so that its first limit is drawn at the top.
    pub fn invert_yaxis(&mut self) {
        match self.ylim {
            Some((bottom, top)) => self.ylim = Some((top, bottom)),
            None => self.invert_y = !self.invert_y,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.xlabel = Some(label.to_string());
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.ylabel = Some(label.to_string());
    }

    pub fn set_x_tick_format(&mut self, format: TickFormat) {
        self.x_tick_format = format;
    }

    /// Suppress numeric ticks, e.g. on maps that label a graticule instead.
    pub fn hide_ticks(&mut self) {
        self.show_ticks = false;
    }

    /// Fill any unset limit from the finite range of the data plus a 5% margin.
    pub fn autoscale(&mut self, xs: &[f64], ys: &[f64]) {
        self.fill_limits(xs, ys, 0.05);
    }

    /// Fill any unset limit from the exact finite range of the data.
    pub fn autoscale_tight(&mut self, xs: &[f64], ys: &[f64]) {
        self.fill_limits(xs, ys, 0.0);
    }

    fn fill_limits(&mut self, xs: &[f64], ys: &[f64], margin: f64) {
        if self.xlim.is_none() {
            self.xlim = padded_range(xs, margin);
        }
        if self.ylim.is_none() {
            let invert = self.invert_y;
            self.ylim = padded_range(ys, margin).map(|(lo, hi)| if invert { (hi, lo) } else { (lo, hi) });
        }
    }

    pub fn x_to_px(&self, x: f64) -> Option<f32> {
        let (x0, x1) = self.xlim?;
        if !x.is_finite() || x0 == x1 {
            return None;
        }
        Some(self.axes.x + ((x - x0) / (x1 - x0)) as f32 * self.axes.width)
    }

    pub fn y_to_px(&self, y: f64) -> Option<f32> {
        let (y0, y1) = self.ylim?;
        if !y.is_finite() || y0 == y1 {
            return None;
        }
        Some(self.axes.bottom() - ((y - y0) / (y1 - y0)) as f32 * self.axes.height)
    }

    /// Pixel position of a data point; `None` for missing values or unset limits.
    pub fn to_pixel(&self, x: f64, y: f64) -> Option<(f32, f32)> {
        Some((self.x_to_px(x)?, self.y_to_px(y)?))
    }

    /// Data coordinates of a pixel position.
    pub fn to_data(&self, px: f32, py: f32) -> Option<(f64, f64)> {
        let (x0, x1) = self.xlim?;
        let (y0, y1) = self.ylim?;
        let fx = ((px - self.axes.x) / self.axes.width) as f64;
        let fy = ((self.axes.bottom() - py) / self.axes.height) as f64;
        Some((x0 + fx * (x1 - x0), y0 + fy * (y1 - y0)))
    }

    /// Draw a segment clipped to the axes, `width` pixels thick.
    pub(crate) fn draw_segment(&mut self, p0: (f32, f32), p1: (f32, f32), color: Rgba<u8>, width: f32) {
        let Some((a, b)) = clip_segment(&self.axes, p0, p1) else {
            return;
        };
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

        let strokes = width.max(1.0).round() as usize;
        for k in 0..strokes {
            let offset = k as f32 - (strokes - 1) as f32 / 2.0;
            draw_line_segment_mut(
                &mut self.image,
                (a.0 + nx * offset, a.1 + ny * offset),
                (b.0 + nx * offset, b.1 + ny * offset),
                color,
            );
        }
    }

    /// Draw a connected pixel polyline following the dash pattern of `spec`.
    pub(crate) fn draw_polyline(&mut self, points: &[(f32, f32)], spec: &LineSpec) {
        let pattern = spec.style.dash_pattern();
        let mut index = 0;
        let mut remaining = pattern.first().copied().unwrap_or(f32::INFINITY);
        let mut pen_down = true;

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (dx, dy) = (b.0 - a.0, b.1 - a.1);
            let len = (dx * dx + dy * dy).sqrt();
            if len == 0.0 {
                continue;
            }

            let mut travelled = 0.0;
            while travelled < len {
                let step = (len - travelled).min(remaining);
                if pen_down {
                    let t0 = travelled / len;
                    let t1 = (travelled + step) / len;
                    self.draw_segment(
                        (a.0 + dx * t0, a.1 + dy * t0),
                        (a.0 + dx * t1, a.1 + dy * t1),
                        spec.color,
                        spec.width,
                    );
                }
                travelled += step;
                remaining -= step;
                if remaining <= 0.0 && !pattern.is_empty() {
                    index = (index + 1) % pattern.len();
                    remaining = pattern[index];
                    pen_down = index % 2 == 0;
                }
            }
        }
    }

    /// Pixel width and height of `text`, or `None` without a font.
    pub(crate) fn text_extent(&self, text: &str, size_pt: f32) -> Option<(i32, i32)> {
        let font = self.font.as_ref()?;
        Some(text_size(self.scale(size_pt), font, text))
    }

    fn scale(&self, size_pt: f32) -> Scale {
        Scale::uniform(size_pt * self.dpi / 72.0)
    }

    /// Draw `text` anchored at `(x, y)`; a no-op without a font.
    pub(crate) fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32, anchor: Anchor) {
        let Some((w, h)) = self.text_extent(text, size_pt) else {
            return;
        };
        let (w, h) = (w as f32, h as f32);
        let (left, top) = match anchor {
            Anchor::TopCenter => (x - w / 2.0, y),
            Anchor::BottomCenter => (x - w / 2.0, y - h),
            Anchor::CenterRight => (x - w, y - h / 2.0),
            Anchor::CenterLeft => (x, y - h / 2.0),
        };
        let scale = self.scale(size_pt);
        if let Some(font) = self.font.as_ref() {
            draw_text_mut(&mut self.image, BLACK, left.round() as i32, top.round() as i32, scale, font, text);
        }
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, centred on `(x, y)`.
    fn draw_vertical_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32) {
        let Some((w, h)) = self.text_extent(text, size_pt) else {
            return;
        };
        let scale = self.scale(size_pt);
        let Some(font) = self.font.as_ref() else {
            return;
        };
        let mut label = RgbaImage::from_pixel(w.max(1) as u32 + 4, h.max(1) as u32 + 4, Rgba([0, 0, 0, 0]));
        draw_text_mut(&mut label, BLACK, 2, 2, scale, font, text);
        let rotated = imageops::rotate270(&label);
        let left = (x - rotated.width() as f32 / 2.0).round() as i64;
        let top = (y - rotated.height() as f32 / 2.0).round() as i64;
        imageops::overlay(&mut self.image, &rotated, left, top);
    }

    fn draw_decorations(&mut self) {
        if let Some(rect) = self.axes.to_rect() {
            draw_hollow_rect_mut(&mut self.image, rect, BLACK);
        }

        let tick_pt = self.font_sizes.tick;
        let mut tick_label_height = 0.0f32;
        let mut tick_label_width = 0.0f32;

        if self.show_ticks {
            if let Some((x0, x1)) = self.xlim {
                let ticks = tick_values(x0, x1);
                let labels = format_ticks(&ticks, self.x_tick_format);
                for (value, label) in ticks.iter().zip(&labels) {
                    let Some(px) = self.x_to_px(*value) else { continue };
                    let bottom = self.axes.bottom();
                    draw_line_segment_mut(&mut self.image, (px, bottom), (px, bottom + TICK_LENGTH), BLACK);
                    self.draw_text(label, px, bottom + TICK_LENGTH + TEXT_GAP, tick_pt, Anchor::TopCenter);
                    if let Some((_, h)) = self.text_extent(label, tick_pt) {
                        tick_label_height = tick_label_height.max(h as f32);
                    }
                }
            }
            if let Some((y0, y1)) = self.ylim {
                let ticks = tick_values(y0, y1);
                let labels = format_ticks(&ticks, TickFormat::Plain);
                for (value, label) in ticks.iter().zip(&labels) {
                    let Some(py) = self.y_to_px(*value) else { continue };
                    let left = self.axes.x;
                    draw_line_segment_mut(&mut self.image, (left - TICK_LENGTH, py), (left, py), BLACK);
                    self.draw_text(label, left - TICK_LENGTH - TEXT_GAP, py, tick_pt, Anchor::CenterRight);
                    if let Some((w, _)) = self.text_extent(label, tick_pt) {
                        tick_label_width = tick_label_width.max(w as f32);
                    }
                }
            }
        }

        if self.font.is_none() {
            if self.title.is_some() || self.xlabel.is_some() || self.ylabel.is_some() {
                tracing::warn!("no font configured, skipping figure text");
            }
            return;
        }

        let center_x = self.axes.x + self.axes.width / 2.0;
        let center_y = self.axes.y + self.axes.height / 2.0;
        if let Some(title) = self.title.clone() {
            self.draw_text(&title, center_x, self.axes.y - 2.0 * TEXT_GAP, self.font_sizes.title, Anchor::BottomCenter);
        }
        if let Some(xlabel) = self.xlabel.clone() {
            let y = self.axes.bottom() + TICK_LENGTH + 2.0 * TEXT_GAP + tick_label_height;
            self.draw_text(&xlabel, center_x, y, self.font_sizes.label, Anchor::TopCenter);
        }
        if let Some(ylabel) = self.ylabel.clone() {
            let label_height = self
                .text_extent(&ylabel, self.font_sizes.label)
                .map(|(_, h)| h as f32)
                .unwrap_or(0.0);
            let x = self.axes.x - TICK_LENGTH - 2.0 * TEXT_GAP - tick_label_width - label_height / 2.0;
            self.draw_vertical_text(&ylabel, x, center_y, self.font_sizes.label);
        }
    }

    /// Draw frame, ticks and text, then write the figure as PNG.
    pub fn save_png<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !self.finished {
            self.draw_decorations();
            self.finished = true;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(OceanDiagError::InvalidParameter {
                    message: format!("output directory '{}' does not exist", parent.display()),
                });
            }
        }
        self.image.save(path)?;
        tracing::info!(path = %path.display(), "saved figure");
        Ok(())
    }
}

fn padded_range(values: &[f64], margin: f64) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return None;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        return Some((lo - pad, hi + pad));
    }
    let pad = (hi - lo) * margin;
    Some((lo - pad, hi + pad))
}

/// Round tick positions inside the closed range spanned by `a` and `b`.
pub fn tick_values(a: f64, b: f64) -> Vec<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() || lo == hi {
        return vec![];
    }
    let step = nice_step(hi - lo, 6);
    let eps = step * 1e-9;
    let first = ((lo - eps) / step).ceil() as i64;
    let last = ((hi + eps) / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn decimals_for(step: f64) -> usize {
    (0..=8)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(8)
}

/// Format tick values consistently for one axis.
pub fn format_ticks(ticks: &[f64], format: TickFormat) -> Vec<String> {
    let max_abs = ticks.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let scientific = match format {
        TickFormat::Plain => max_abs > 0.0 && !(1e-4..1e5).contains(&max_abs),
        TickFormat::Scientific => max_abs > 0.0 && !(1e-2..1e2).contains(&max_abs),
    };

    if scientific {
        return ticks.iter().map(|v| format!("{:.1e}", v)).collect();
    }
    let step = if ticks.len() >= 2 { (ticks[1] - ticks[0]).abs() } else { 1.0 };
    let decimals = decimals_for(step);
    ticks
        .iter()
        .map(|v| {
            let v = if v.abs() < step * 1e-9 { 0.0 } else { *v };
            format!("{:.*}", decimals, v)
        })
        .collect()
}

/// Liang-Barsky clipping of a segment to `rect`.
fn clip_segment(rect: &PixelRect, p0: (f32, f32), p1: (f32, f32)) -> Option<((f32, f32), (f32, f32))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let checks = [
        (-dx, p0.0 - rect.x),
        (dx, rect.right() - p0.0),
        (-dy, p0.1 - rect.y),
        (dy, rect.bottom() - p0.1),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::LineStyle;

    #[test]
    fn test_figure_size_from_inches() {
        let fig = Figure::new(12.0, 8.0, DEFAULT_DPI);
        assert_eq!(fig.dimensions(), (1200, 800));
        let axes = fig.axes();
        assert!((axes.x - 150.0).abs() < 1e-3);
        assert!((axes.right() - 1080.0).abs() < 1e-3);
    }

    #[test]
    fn test_inverted_limits_put_first_value_at_bottom() {
        let mut fig = Figure::new(12.0, 8.0, DEFAULT_DPI);
        fig.set_xlim(0.0, 30.0);
        fig.set_ylim(6000.0, 0.0);
        let axes = fig.axes();
        let (_, top) = fig.to_pixel(0.0, 0.0).unwrap();
        let (_, bottom) = fig.to_pixel(0.0, 6000.0).unwrap();
        assert!((top - axes.y).abs() < 1e-3);
        assert!((bottom - axes.bottom()).abs() < 1e-3);
        assert!(fig.to_pixel(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn test_invert_yaxis_before_and_after_limits() {
        let mut fig = Figure::new(4.0, 4.0, DEFAULT_DPI);
        fig.invert_yaxis();
        fig.autoscale(&[0.0, 1.0], &[0.0, 100.0]);
        let (bottom, top) = fig.ylim().unwrap();
        assert!(bottom > top);

        let mut fig = Figure::new(4.0, 4.0, DEFAULT_DPI);
        fig.set_ylim(0.0, 10.0);
        fig.invert_yaxis();
        assert_eq!(fig.ylim(), Some((10.0, 0.0)));
    }

    #[test]
    fn test_autoscale_ignores_nan() {
        let mut fig = Figure::new(4.0, 4.0, DEFAULT_DPI);
        fig.autoscale(&[0.0, f64::NAN, 10.0], &[f64::NAN, 5.0]);
        assert_eq!(fig.xlim(), Some((-0.5, 10.5)));
        assert_eq!(fig.ylim(), Some((4.75, 5.25)));
    }

    #[test]
    fn test_pixel_data_round_trip() {
        let mut fig = Figure::new(6.0, 4.0, DEFAULT_DPI);
        fig.set_xlim(-80.0, -10.0);
        fig.set_ylim(6000.0, 0.0);
        let (px, py) = fig.to_pixel(-40.0, 1500.0).unwrap();
        let (x, y) = fig.to_data(px, py).unwrap();
        assert!((x + 40.0).abs() < 1e-3);
        assert!((y - 1500.0).abs() < 1e-1);
    }

    #[test]
    fn test_tick_values_and_labels() {
        assert_eq!(tick_values(6000.0, 0.0), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0]);
        assert_eq!(format_ticks(&[34.0, 35.0, 36.0], TickFormat::Plain), vec!["34", "35", "36"]);
        assert_eq!(format_ticks(&[0.0, 0.5, 1.0], TickFormat::Plain), vec!["0.0", "0.5", "1.0"]);
        let sci = format_ticks(&[-2e-6, 0.0, 2e-6], TickFormat::Scientific);
        assert_eq!(sci[2], "2.0e-6");
    }

    #[test]
    fn test_clip_segment() {
        let rect = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let (a, b) = clip_segment(&rect, (-5.0, 5.0), (15.0, 5.0)).unwrap();
        assert_eq!(a, (0.0, 5.0));
        assert_eq!(b, (10.0, 5.0));
        assert!(clip_segment(&rect, (-5.0, -5.0), (-1.0, -1.0)).is_none());
    }

    #[test]
    fn test_dashed_polyline_leaves_gaps() {
        let mut fig = Figure::new(2.0, 2.0, DEFAULT_DPI);
        let axes = fig.axes();
        let y = (axes.y + axes.height / 2.0).round();
        let spec = LineSpec {
            color: BLACK,
            style: LineStyle::Dashed,
            width: 1.0,
        };
        fig.draw_polyline(&[(axes.x + 1.0, y), (axes.right() - 1.0, y)], &spec);

        let row = y as u32;
        let start = (axes.x + 1.0).round() as u32;
        let end = (axes.right() - 1.0).round() as u32;
        let inked = (start..end).filter(|&x| fig.image().get_pixel(x, row)[0] == 0).count();
        let total = (end - start) as usize;
        assert!(inked > total / 2);
        assert!(inked < total);
    }

    #[test]
    fn test_save_png_without_font() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("empty.png");
        let mut fig = Figure::new(3.0, 2.0, DEFAULT_DPI);
        fig.set_title("untitled");
        fig.autoscale(&[0.0, 1.0], &[0.0, 1.0]);
        fig.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.height(), 200);

        let missing = dir.path().join("nope").join("x.png");
        assert!(fig.save_png(&missing).is_err());
    }
}
