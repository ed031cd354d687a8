//! High-level conversion API.
//!
//! Provides the two entry points the driver consumes:
//! - `decode_png()` - decode a PNG byte stream into flat RGB pixels
//! - `png_to_pdf()` - full conversion to a single-page PDF

use tracing::debug;

use crate::codec::{defilter, flate};
use crate::document::build_pdf;
use crate::error::Result;
use crate::image::compose_rgb;
use crate::parser::PngContainer;

/// A decoded image: flat row-major RGB bytes, three per pixel.
///
/// Owned by a single conversion call; decoding the same input twice yields
/// byte-identical buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode a PNG byte stream into flat RGB pixels.
///
/// Parses the container, inflates the pixel stream, reverses the scanline
/// filters and resolves palette/alpha semantics.
pub fn decode_png(data: &[u8]) -> Result<DecodedImage> {
    let container = PngContainer::parse(data)?;
    let header = &container.header;

    let raw = flate::inflate(&container.idat)?;
    let rows = defilter::defilter(
        &raw,
        header.row_bytes(),
        header.height as usize,
        header.color.channel_count(),
    )?;
    let pixels = compose_rgb(
        &rows,
        header,
        container.palette.as_ref(),
        container.transparency.as_ref(),
    )?;

    debug!(
        width = header.width,
        height = header.height,
        rgb_bytes = pixels.len(),
        "decoded image"
    );

    Ok(DecodedImage {
        pixels,
        width: header.width,
        height: header.height,
    })
}

/// Convert a PNG byte stream into the bytes of a single-page PDF.
pub fn png_to_pdf(data: &[u8]) -> Result<Vec<u8>> {
    let image = decode_png(data)?;
    build_pdf(&image.pixels, image.width, image.height)
}
