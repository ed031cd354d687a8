//! Error types for the figpress conversion library.

use thiserror::Error;

/// Primary error type for PNG decoding and PDF building.
///
/// Every variant is terminal for the single conversion in progress: the
/// decoder never retries and never produces partial output.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("bad signature: input is not a PNG stream")]
    Signature,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("missing image data: {0}")]
    MissingData(String),

    #[error("malformed chunk: {0}")]
    MalformedChunk(String),

    #[error("palette index {index} out of range for palette of {len} entries")]
    PaletteIndexOutOfRange { index: u8, len: usize },

    #[error("unknown scanline filter type {0}")]
    FilterType(u8),

    #[error("deflate stream error: {0}")]
    Deflate(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;
