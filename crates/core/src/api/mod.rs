//! Public API surface.

pub mod high_level;

pub use high_level::{DecodedImage, decode_png, png_to_pdf};
