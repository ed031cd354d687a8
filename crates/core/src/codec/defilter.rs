//! Scanline defiltering: reverses the per-row prediction filters.
//!
//! Each encoded row is one filter-type byte followed by the row payload.
//! Filters predict from already-reconstructed bytes, so rows must be
//! processed in order and each row after the first reads the fully
//! reconstructed row before it.

use crate::error::{ConvertError, Result};

/// Reconstruct `height` rows of `row_bytes` raw samples from the
/// decompressed pixel stream.
///
/// `bpp` is the lookback distance for the left/upper-left references:
/// bytes per pixel, which at bit depth 8 equals the channel count.
/// References outside the image default to 0, and all additions wrap
/// modulo 256.
pub fn defilter(data: &[u8], row_bytes: usize, height: usize, bpp: usize) -> Result<Vec<u8>> {
    let stride = row_bytes + 1;
    let needed = stride
        .checked_mul(height)
        .ok_or_else(|| ConvertError::MissingData("pixel stream size overflows".to_string()))?;
    if data.len() < needed {
        return Err(ConvertError::MissingData(format!(
            "pixel stream truncated: need {needed} bytes, have {}",
            data.len()
        )));
    }

    let mut out = Vec::with_capacity(row_bytes * height);
    let mut prev_row = vec![0u8; row_bytes];

    for row_start in (0..needed).step_by(stride) {
        let filter_type = data[row_start];
        let row_data = &data[row_start + 1..row_start + stride];
        let mut current = vec![0u8; row_bytes];

        match filter_type {
            0 => {
                // None
                current.copy_from_slice(row_data);
            }
            1 => {
                // Sub: add the byte bpp positions to the left
                for i in 0..row_bytes {
                    let left = if i >= bpp { current[i - bpp] } else { 0 };
                    current[i] = row_data[i].wrapping_add(left);
                }
            }
            2 => {
                // Up: add the byte from the previous reconstructed row
                for i in 0..row_bytes {
                    current[i] = row_data[i].wrapping_add(prev_row[i]);
                }
            }
            3 => {
                // Average: add floor((left + up) / 2)
                for i in 0..row_bytes {
                    let left = if i >= bpp { current[i - bpp] as u16 } else { 0 };
                    let up = prev_row[i] as u16;
                    current[i] = row_data[i].wrapping_add(((left + up) / 2) as u8);
                }
            }
            4 => {
                // Paeth
                for i in 0..row_bytes {
                    let left = if i >= bpp { current[i - bpp] } else { 0 };
                    let up = prev_row[i];
                    let up_left = if i >= bpp { prev_row[i - bpp] } else { 0 };
                    current[i] = row_data[i].wrapping_add(paeth_predictor(left, up, up_left));
                }
            }
            other => return Err(ConvertError::FilterType(other)),
        }

        out.extend_from_slice(&current);
        prev_row = current;
    }

    Ok(out)
}

/// Paeth predictor: picks whichever of (left, above, upper-left) is
/// closest to `left + above - upper_left`, ties broken left, then above.
pub const fn paeth_predictor(left: u8, above: u8, upper_left: u8) -> u8 {
    let a = left as i32;
    let b = above as i32;
    let c = upper_left as i32;
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}
