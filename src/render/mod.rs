//! Static figures rendered to PNG
//!
//! # Organization
//!
//! - [`figure`]: the raster canvas, axes limits, ticks and text
//! - [`plots`]: line, dot, quiver, filled-contour and graticule primitives
//! - [`colorbar`]: colorbar placement beside the axes
//! - [`colormap`]: band colors and contour level selection
//! - [`style`]: colors, line styles and fonts

pub mod colorbar;
pub mod colormap;
pub mod figure;
pub mod plots;
pub mod style;

pub use colorbar::{append_axes_right, ColorbarLayout};
pub use colormap::contour_levels;
pub use figure::{Figure, PixelRect, TickFormat, DEFAULT_DPI};
pub use plots::MapBounds;
pub use style::{bundled_font, load_font, FontSizes, LineSpec, LineStyle, BLACK, BLUE};
