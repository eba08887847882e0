//! Colors, line styles and font handling shared by every figure.

use crate::errors::{OceanDiagError, Result};
use image::Rgba;
use rusttype::Font;
use std::path::Path;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Stroke pattern of a line series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// `'-'`
    Solid,
    /// `'--'`
    Dashed,
    /// `':'`
    Dotted,
    /// `'-.'`
    DashDot,
}

impl LineStyle {
    /// Alternating on/off lengths in pixels; empty for a solid stroke.
    pub fn dash_pattern(self) -> &'static [f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[14.0, 6.0],
            Self::Dotted => &[2.5, 4.5],
            Self::DashDot => &[12.0, 5.0, 2.5, 5.0],
        }
    }
}

/// Color, pattern and width of a line series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpec {
    pub color: Rgba<u8>,
    pub style: LineStyle,
    pub width: f32,
}

impl LineSpec {
    pub fn new(color: Rgba<u8>, style: LineStyle) -> Self {
        Self {
            color,
            style,
            width: 2.0,
        }
    }

    pub fn solid(color: Rgba<u8>) -> Self {
        Self::new(color, LineStyle::Solid)
    }
}

/// Font sizes of a figure, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub label: f32,
    pub tick: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 18.0,
            label: 18.0,
            tick: 18.0,
        }
    }
}

impl FontSizes {
    /// Title 22 pt, labels 18 pt, ticks 14 pt.
    pub fn profile() -> Self {
        Self {
            title: 22.0,
            label: 18.0,
            tick: 14.0,
        }
    }
}

const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

/// DejaVu Sans Mono, compiled into the binary.
pub fn bundled_font() -> Result<Font<'static>> {
    Font::try_from_bytes(BUNDLED_FONT).ok_or_else(|| OceanDiagError::InvalidParameter {
        message: "bundled font is not a usable TrueType font".to_string(),
    })
}

/// Load a TrueType font used for titles, labels and tick values.
pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let bytes = std::fs::read(path)?;
    Font::try_from_vec(bytes).ok_or_else(|| OceanDiagError::InvalidParameter {
        message: format!("'{}' is not a usable TrueType font", path.display()),
    })
}
