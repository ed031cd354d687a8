//! figpress - PNG figure to PDF conversion.
//!
//! Decodes 8-bit non-interlaced PNGs (truecolor, indexed, truecolor+alpha)
//! into flat RGB pixels and embeds them in minimal single-page PDF
//! documents, with no external image or document library.

pub mod api;
pub mod codec;
pub mod document;
pub mod error;
pub mod image;
pub mod model;
pub mod parser;

pub use api::high_level;
pub use api::high_level::{DecodedImage, decode_png, png_to_pdf};
pub use error::{ConvertError, Result};
