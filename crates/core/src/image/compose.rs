//! Pixel composition: raw samples to a flat RGB buffer.
//!
//! Alpha and palette semantics are resolved here, so downstream consumers
//! only ever see three channels. Partially transparent pixels are blended
//! over a white background.

use crate::error::{ConvertError, Result};
use crate::model::{ColorMode, ImageHeader, Palette, Transparency};

/// Blend one channel over a white background. The +127 term rounds the
/// integer division half-up.
fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Turn reconstructed sample rows into a `width * height * 3` RGB buffer.
///
/// `rows` must hold exactly `width * height * channel_count` bytes of
/// defiltered samples.
pub fn compose_rgb(
    rows: &[u8],
    header: &ImageHeader,
    palette: Option<&Palette>,
    transparency: Option<&Transparency>,
) -> Result<Vec<u8>> {
    let pixel_count = header.width as usize * header.height as usize;
    let mut out = Vec::with_capacity(pixel_count * 3);

    match header.color {
        ColorMode::Truecolor => {
            out.extend_from_slice(rows);
            // Single-color transparency key: a global post-pass replacing
            // every exactly-matching pixel with white. Opaque pixels that
            // happen to share the key color are whitened too.
            if let Some(Transparency::ColorKey(key)) = transparency {
                for pixel in out.chunks_exact_mut(3) {
                    if *pixel == *key {
                        pixel.copy_from_slice(&[255, 255, 255]);
                    }
                }
            }
        }
        ColorMode::TruecolorAlpha => {
            for pixel in rows.chunks_exact(4) {
                let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);
                match a {
                    255 => out.extend_from_slice(&[r, g, b]),
                    0 => out.extend_from_slice(&[255, 255, 255]),
                    _ => out.extend_from_slice(&[
                        blend_over_white(r, a),
                        blend_over_white(g, a),
                        blend_over_white(b, a),
                    ]),
                }
            }
        }
        ColorMode::Indexed => {
            let palette = palette.ok_or_else(|| {
                ConvertError::MissingData("indexed image has no palette".to_string())
            })?;
            let alpha_table = match transparency {
                Some(Transparency::AlphaTable(table)) => table.as_slice(),
                _ => &[],
            };
            for &index in rows {
                let [r, g, b] =
                    palette
                        .get(index)
                        .ok_or(ConvertError::PaletteIndexOutOfRange {
                            index,
                            len: palette.len(),
                        })?;
                let a = alpha_table.get(index as usize).copied().unwrap_or(255);
                match a {
                    255 => out.extend_from_slice(&[r, g, b]),
                    0 => out.extend_from_slice(&[255, 255, 255]),
                    _ => out.extend_from_slice(&[
                        blend_over_white(r, a),
                        blend_over_white(g, a),
                        blend_over_white(b, a),
                    ]),
                }
            }
        }
    }

    Ok(out)
}
