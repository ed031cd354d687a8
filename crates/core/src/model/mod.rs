//! Data model for decoded images.

pub mod raster;

pub use raster::{ColorMode, ImageHeader, Palette, Transparency};
