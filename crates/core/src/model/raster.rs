//! Image model: header, color modes, palette and transparency records.

use crate::error::{ConvertError, Result};

/// Color interpretation of the pixel stream.
///
/// Discriminants match the color-type field of the header chunk. Other
/// color types (grayscale, grayscale+alpha) are outside the supported
/// subset and rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Truecolor = 2,
    Indexed = 3,
    TruecolorAlpha = 6,
}

impl ColorMode {
    /// Bytes per pixel in the filtered stream (bit depth is always 8).
    pub const fn channel_count(self) -> usize {
        match self {
            ColorMode::Indexed => 1,
            ColorMode::Truecolor => 3,
            ColorMode::TruecolorAlpha => 4,
        }
    }
}

impl TryFrom<u8> for ColorMode {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(ColorMode::Truecolor),
            3 => Ok(ColorMode::Indexed),
            6 => Ok(ColorMode::TruecolorAlpha),
            other => Err(ConvertError::UnsupportedFormat(format!(
                "color type {other}"
            ))),
        }
    }
}

/// Structural parameters from the header chunk.
///
/// Immutable once parsed; governs every later decode decision. Compression,
/// filter and interlace methods are validated to 0 during parsing and not
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color: ColorMode,
}

impl ImageHeader {
    /// Payload bytes per reconstructed scanline.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.color.channel_count()
    }
}

/// Color table for indexed images: up to 256 RGB triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<[u8; 3]>,
}

impl Palette {
    /// Parse a palette chunk payload: a flat sequence of RGB triples.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() % 3 != 0 {
            return Err(ConvertError::MalformedChunk(format!(
                "PLTE payload of {} bytes is not a multiple of 3",
                data.len()
            )));
        }
        let entries: Vec<[u8; 3]> = data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        if entries.is_empty() || entries.len() > 256 {
            return Err(ConvertError::MalformedChunk(format!(
                "invalid palette size {}",
                entries.len()
            )));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.entries.get(index as usize).copied()
    }
}

/// Transparency semantics, resolved against the color mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transparency {
    /// Indexed mode: one alpha value per palette index, in palette order.
    /// Indices past the end of the table are opaque.
    AlphaTable(Vec<u8>),
    /// Truecolor mode: pixels exactly matching this color become white.
    ColorKey([u8; 3]),
}

impl Transparency {
    /// Interpret a raw transparency chunk payload for the given color mode.
    ///
    /// Alpha-carrying images have no use for the chunk, and a truecolor
    /// payload shorter than one RGB triple can never match a pixel; both
    /// resolve to `None`.
    pub fn resolve(color: ColorMode, data: Vec<u8>) -> Option<Self> {
        match color {
            ColorMode::Indexed => Some(Transparency::AlphaTable(data)),
            ColorMode::Truecolor if data.len() >= 3 => {
                Some(Transparency::ColorKey([data[0], data[1], data[2]]))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_counts() {
        assert_eq!(ColorMode::Indexed.channel_count(), 1);
        assert_eq!(ColorMode::Truecolor.channel_count(), 3);
        assert_eq!(ColorMode::TruecolorAlpha.channel_count(), 4);
    }

    #[test]
    fn color_mode_rejects_grayscale() {
        assert!(ColorMode::try_from(0).is_err());
        assert!(ColorMode::try_from(4).is_err());
    }

    #[test]
    fn transparency_ignored_for_alpha_images() {
        assert_eq!(
            Transparency::resolve(ColorMode::TruecolorAlpha, vec![1, 2, 3]),
            None
        );
    }

    #[test]
    fn short_color_key_never_resolves() {
        assert_eq!(Transparency::resolve(ColorMode::Truecolor, vec![1, 2]), None);
    }
}
