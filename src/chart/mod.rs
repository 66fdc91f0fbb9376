//! Correlation bar chart rasterization
//!
//! Produces the fixed-size PNG chart embedded on the report cover page.

pub mod glyphs;
pub mod rasterizer;

// Re-export commonly used items
pub use rasterizer::{BarGeometry, BarTone, ChartLayout, ChartRasterizer, RasterImage, bar_tone};
