//! Coastline outlines for the wind maps.
//!
//! Outlines are read from shapefiles in geographic degrees, either polygons
//! (GSHHS) or polylines (Natural Earth coastlines). Every polygon ring and
//! polyline part becomes one [`LineString`] with `x` as longitude and `y` as
//! latitude.

use crate::errors::Result;
use geo::{BoundingRect, Coord, LineString, MultiLineString, Translate};
use shapefile::{Reader, Shape};
use std::path::Path;

/// Coastline outlines as lon/lat polylines
#[derive(Debug, Clone)]
pub struct Coastline {
    lines: MultiLineString<f64>,
}

fn to_line(points: &[shapefile::Point]) -> Option<LineString<f64>> {
    if points.len() < 2 {
        return None;
    }
    let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Some(LineString::from(coords))
}

impl Coastline {
    /// Outlines from lines already in memory; lines with fewer than two points are dropped.
    pub fn from_lines(lines: Vec<LineString<f64>>) -> Self {
        let lines = lines.into_iter().filter(|line| line.0.len() >= 2).collect();
        Self {
            lines: MultiLineString::new(lines),
        }
    }

    /// Load every polygon ring and polyline part of a shapefile.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = Reader::from_path(path)?;
        let mut lines = Vec::new();
        let mut ignored = 0usize;

        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result?;
            match shape {
                Shape::Polygon(polygon) => {
                    lines.extend(polygon.rings().iter().filter_map(|ring| to_line(ring.points())));
                }
                Shape::Polyline(polyline) => {
                    lines.extend(polyline.parts().iter().filter_map(|part| to_line(part)));
                }
                _ => ignored += 1,
            }
        }

        if ignored > 0 {
            tracing::warn!(ignored, "coastline file has shapes that are not lines or polygons");
        }
        tracing::info!(path = %path.display(), lines = lines.len(), "loaded coastline");
        Ok(Self::from_lines(lines))
    }

    pub fn len(&self) -> usize {
        self.lines.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.0.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.lines.0.iter()
    }

    /// Lines overlapping the longitude range `[lon_min, lon_max]`.
    ///
    /// Each line is tried as given and shifted by ±360°, so a −180…180
    /// coastline lands on a 0…360 map. A line crossing the map edge can be
    /// returned twice, once per side.
    pub fn wrapped(&self, lon_min: f64, lon_max: f64) -> Vec<LineString<f64>> {
        let mut out = Vec::new();
        for line in self.lines() {
            let Some(rect) = line.bounding_rect() else {
                continue;
            };
            for shift in [-360.0, 0.0, 360.0] {
                if rect.min().x + shift <= lon_max && rect.max().x + shift >= lon_min {
                    out.push(line.translate(shift, 0.0));
                }
            }
        }
        out
    }
}
