//! Plot primitives drawn onto a [`Figure`].

use super::colormap::{band_color, band_index};
use super::figure::{Anchor, Figure};
use super::style::{LineSpec, LineStyle, BLACK};
use crate::coastline::Coastline;
use crate::errors::{OceanDiagError, Result};
use image::Rgba;
use imageproc::drawing::draw_filled_circle_mut;
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Longest arrow of a quiver plot as a fraction of the axes width.
const QUIVER_MAX_FRACTION: f32 = 0.04;

/// Arrowhead barb length relative to the arrow, and its half-angle.
const ARROWHEAD_FRACTION: f32 = 0.3;
const ARROWHEAD_ANGLE_DEG: f32 = 25.0;

/// Lon/lat bounding box of a cylindrical (plate carrée) map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub llcrnrlat: f64,
    pub urcrnrlat: f64,
    pub llcrnrlon: f64,
    pub urcrnrlon: f64,
}

impl MapBounds {
    pub fn new(lat: (f64, f64), lon: (f64, f64)) -> Self {
        Self {
            llcrnrlat: lat.0,
            urcrnrlat: lat.1,
            llcrnrlon: lon.0,
            urcrnrlon: lon.1,
        }
    }
}

fn check_same_len(what: &str, a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(OceanDiagError::ShapeMismatch {
            message: format!("{}: {} x values but {} y values", what, a, b),
        });
    }
    Ok(())
}

/// Fractional index of `value` along a strictly monotonic axis.
fn fractional_index(axis: &[f64], value: f64) -> Option<f64> {
    let n = axis.len();
    if n < 2 || !value.is_finite() {
        return None;
    }
    let ascending = axis[n - 1] > axis[0];
    let above = if ascending {
        axis.partition_point(|&a| a <= value)
    } else {
        axis.partition_point(|&a| a >= value)
    };
    let i = above.saturating_sub(1).min(n - 2);
    let (a0, a1) = (axis[i], axis[i + 1]);
    let t = (value - a0) / (a1 - a0);
    if !t.is_finite() || !(-1e-9..=1.0 + 1e-9).contains(&t) {
        return None;
    }
    Some(i as f64 + t.clamp(0.0, 1.0))
}

/// Bilinear interpolation of `z[row, col]` at fractional indices.
///
/// NaN if any of the four surrounding samples is NaN.
fn bilinear(z: &ArrayView2<'_, f64>, row: f64, col: f64) -> f64 {
    let (rows, cols) = z.dim();
    let r0 = (row.floor() as usize).min(rows - 1);
    let c0 = (col.floor() as usize).min(cols - 1);
    let r1 = (r0 + 1).min(rows - 1);
    let c1 = (c0 + 1).min(cols - 1);
    let (tr, tc) = (row - r0 as f64, col - c0 as f64);

    let top = z[(r0, c0)] * (1.0 - tc) + z[(r0, c1)] * tc;
    let bottom = z[(r1, c0)] * (1.0 - tc) + z[(r1, c1)] * tc;
    let value = top * (1.0 - tr) + bottom * tr;
    let corners = [z[(r0, c0)], z[(r0, c1)], z[(r1, c0)], z[(r1, c1)]];
    if corners.iter().any(|c| c.is_nan()) {
        f64::NAN
    } else {
        value
    }
}

impl Figure {
    /// Set up a cylindrical map covering `bounds`.
    pub fn cylindrical_map(&mut self, bounds: MapBounds) {
        self.set_xlim(bounds.llcrnrlon, bounds.urcrnrlon);
        self.set_ylim(bounds.llcrnrlat, bounds.urcrnrlat);
        self.hide_ticks();
    }

    /// Polyline through `(xs[i], ys[i])`; points with a NaN coordinate break the line.
    pub fn line(&mut self, xs: ArrayView1<'_, f64>, ys: ArrayView1<'_, f64>, spec: LineSpec) -> Result<()> {
        check_same_len("line", xs.len(), ys.len())?;
        let xs = xs.to_vec();
        let ys = ys.to_vec();
        self.autoscale(&xs, &ys);

        let mut run: Vec<(f32, f32)> = Vec::with_capacity(xs.len());
        for (&x, &y) in xs.iter().zip(&ys) {
            match self.to_pixel(x, y) {
                Some(p) => run.push(p),
                None => {
                    self.draw_polyline(&run, &spec);
                    run.clear();
                }
            }
        }
        self.draw_polyline(&run, &spec);
        Ok(())
    }

    /// Filled circle markers at each finite point inside the axes.
    pub fn dots(&mut self, xs: ArrayView1<'_, f64>, ys: ArrayView1<'_, f64>, color: Rgba<u8>) -> Result<()> {
        check_same_len("dots", xs.len(), ys.len())?;
        let xs = xs.to_vec();
        let ys = ys.to_vec();
        self.autoscale(&xs, &ys);

        let axes = self.axes();
        let radius = (self.dpi() / 50.0).round().max(1.0) as i32;
        for (&x, &y) in xs.iter().zip(&ys) {
            let Some((px, py)) = self.to_pixel(x, y) else { continue };
            if axes.contains(px, py) {
                draw_filled_circle_mut(self.image_mut(), (px.round() as i32, py.round() as i32), radius, color);
            }
        }
        Ok(())
    }

    /// One arrow per grid point, scaled so the fastest spans a fixed share of the axes.
    pub fn quiver(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
        color: Rgba<u8>,
    ) -> Result<()> {
        let shape = x.dim();
        if y.dim() != shape || u.dim() != shape || v.dim() != shape {
            return Err(OceanDiagError::ShapeMismatch {
                message: format!(
                    "quiver: x {:?}, y {:?}, u {:?}, v {:?}",
                    shape,
                    y.dim(),
                    u.dim(),
                    v.dim()
                ),
            });
        }
        let xs: Vec<f64> = x.iter().copied().collect();
        let ys: Vec<f64> = y.iter().copied().collect();
        self.autoscale(&xs, &ys);

        let max_speed = u
            .iter()
            .zip(v.iter())
            .map(|(a, b)| a.hypot(*b))
            .filter(|s| s.is_finite())
            .fold(0.0f64, f64::max);
        if max_speed == 0.0 {
            tracing::warn!("quiver has no finite non-zero vectors");
            return Ok(());
        }
        let scale = (self.axes().width * QUIVER_MAX_FRACTION) as f64 / max_speed;
        tracing::debug!(?shape, max_speed, scale, "drawing quiver");

        let spec = LineSpec {
            color,
            style: LineStyle::Solid,
            width: 1.0,
        };
        let head_angle = ARROWHEAD_ANGLE_DEG.to_radians();
        for (((&px, &py), &du), &dv) in x.iter().zip(y.iter()).zip(u.iter()).zip(v.iter()) {
            if !du.is_finite() || !dv.is_finite() {
                continue;
            }
            let Some(tail) = self.to_pixel(px, py) else { continue };
            let (dx, dy) = ((du * scale) as f32, (-dv * scale) as f32);
            let len = dx.hypot(dy);
            if len < 0.5 {
                continue;
            }
            let tip = (tail.0 + dx, tail.1 + dy);
            self.draw_segment(tail, tip, spec.color, spec.width);

            let back = dy.atan2(dx) + std::f32::consts::PI;
            let barb = len * ARROWHEAD_FRACTION;
            for side in [-head_angle, head_angle] {
                let angle = back + side;
                let end = (tip.0 + barb * angle.cos(), tip.1 + barb * angle.sin());
                self.draw_segment(tip, end, spec.color, spec.width);
            }
        }
        Ok(())
    }

    /// Filled contours of `z[ys.len(), xs.len()]` on a rectilinear grid.
    ///
    /// Each pixel inside the axes interpolates `z` bilinearly and takes the
    /// color of the band between consecutive `levels` it falls in. Pixels
    /// outside the grid, outside the levels or next to a NaN stay blank.
    pub fn contourf(
        &mut self,
        xs: ArrayView1<'_, f64>,
        ys: ArrayView1<'_, f64>,
        z: ArrayView2<'_, f64>,
        levels: &[f64],
    ) -> Result<()> {
        if z.dim() != (ys.len(), xs.len()) {
            return Err(OceanDiagError::ShapeMismatch {
                message: format!(
                    "contourf: z is {:?} but axes are {} × {}",
                    z.dim(),
                    ys.len(),
                    xs.len()
                ),
            });
        }
        if xs.len() < 2 || ys.len() < 2 {
            return Err(OceanDiagError::InvalidParameter {
                message: "contourf needs at least two samples along each axis".to_string(),
            });
        }
        if levels.len() < 2 {
            return Err(OceanDiagError::InvalidParameter {
                message: format!("contourf needs at least two levels, got {}", levels.len()),
            });
        }

        let xs = xs.to_vec();
        let ys = ys.to_vec();
        self.autoscale_tight(&xs, &ys);

        let axes = self.axes();
        let (width, height) = self.dimensions();
        let x_start = axes.x.floor().max(0.0) as u32;
        let x_end = (axes.right().ceil() as u32).min(width);
        let y_start = axes.y.floor().max(0.0) as u32;
        let y_end = (axes.bottom().ceil() as u32).min(height);
        let n_bands = levels.len() - 1;

        // Pixel centres mapped back to data space, one row per task.
        let data_x: Vec<Option<f64>> = (x_start..x_end)
            .map(|px| self.to_data(px as f32 + 0.5, 0.0).map(|(x, _)| x))
            .collect();
        let data_y: Vec<Option<f64>> = (y_start..y_end)
            .map(|py| self.to_data(0.0, py as f32 + 0.5).map(|(_, y)| y))
            .collect();
        let col_index: Vec<Option<f64>> = data_x
            .iter()
            .map(|x| x.and_then(|x| fractional_index(&xs, x)))
            .collect();

        let rows: Vec<Vec<Option<Rgba<u8>>>> = data_y
            .par_iter()
            .map(|y| {
                let row_index = y.and_then(|y| fractional_index(&ys, y));
                col_index
                    .iter()
                    .map(|col| {
                        let (row, col) = (row_index?, (*col)?);
                        let value = bilinear(&z, row, col);
                        band_index(levels, value).map(|band| band_color(band, n_bands))
                    })
                    .collect()
            })
            .collect();

        let axes_rect = axes;
        let image = self.image_mut();
        for (dy, row) in rows.iter().enumerate() {
            let py = y_start + dy as u32;
            for (dx, color) in row.iter().enumerate() {
                let px = x_start + dx as u32;
                if let Some(color) = color {
                    if axes_rect.contains(px as f32 + 0.5, py as f32 + 0.5) {
                        image.put_pixel(px, py, *color);
                    }
                }
            }
        }
        tracing::debug!(n_bands, rows = rows.len(), "filled contours");
        Ok(())
    }

    /// Outline `coastline` on a map whose x axis is longitude.
    ///
    /// Lines are wrapped by ±360° onto the map's longitude range and clipped
    /// to the axes. Nothing is drawn before the limits are set.
    pub fn coastlines(&mut self, coastline: &Coastline) {
        let Some((x0, x1)) = self.xlim() else {
            return;
        };
        let spec = LineSpec::solid(BLACK);
        let lines = coastline.wrapped(x0.min(x1), x0.max(x1));
        for line in &lines {
            let points: Vec<(f32, f32)> = line.coords().filter_map(|c| self.to_pixel(c.x, c.y)).collect();
            self.draw_polyline(&points, &spec);
        }
        tracing::debug!(lines = lines.len(), "drew coastlines");
    }

    /// Meridians at the given longitudes and parallels at the given latitudes.
    ///
    /// Meridians are labelled along the bottom edge and parallels along the
    /// left edge when a font is available.
    pub fn graticule(&mut self, meridians: &[f64], parallels: &[f64]) {
        let spec = LineSpec {
            color: BLACK,
            style: LineStyle::Dotted,
            width: 1.0,
        };
        let (Some((x0, x1)), Some((y0, y1))) = (self.xlim(), self.ylim()) else {
            return;
        };
        let axes = self.axes();
        let size = self.font_sizes().tick;

        for &lon in meridians {
            if let (Some(a), Some(b)) = (self.to_pixel(lon, y0), self.to_pixel(lon, y1)) {
                self.draw_polyline(&[a, b], &spec);
                if axes.contains(a.0, axes.bottom()) {
                    self.draw_text(&format_longitude(lon), a.0, axes.bottom() + 6.0, size, Anchor::TopCenter);
                }
            }
        }
        for &lat in parallels {
            if let (Some(a), Some(b)) = (self.to_pixel(x0, lat), self.to_pixel(x1, lat)) {
                self.draw_polyline(&[a, b], &spec);
                if axes.contains(axes.x, a.1) {
                    self.draw_text(&format_latitude(lat), axes.x - 6.0, a.1, size, Anchor::CenterRight);
                }
            }
        }
    }
}

/// `50°E`, `160°W`; longitudes are wrapped into (-180, 180].
pub fn format_longitude(lon: f64) -> String {
    let mut wrapped = lon.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    if wrapped == 0.0 || wrapped == 180.0 {
        format!("{}°", wrapped.abs())
    } else if wrapped > 0.0 {
        format!("{}°E", wrapped)
    } else {
        format!("{}°W", -wrapped)
    }
}

/// `30°N`, `60°S`, `0°`.
pub fn format_latitude(lat: f64) -> String {
    if lat == 0.0 {
        "0°".to_string()
    } else if lat > 0.0 {
        format!("{}°N", lat)
    } else {
        format!("{}°S", -lat)
    }
}
