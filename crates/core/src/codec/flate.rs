//! Zlib stream helpers for the pixel data path.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{ConvertError, Result};

/// Inflate a complete zlib stream.
///
/// Corrupt or truncated input is an error; no partial output is returned.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| ConvertError::Deflate(e.to_string()))?;
    Ok(out)
}

/// Deflate `data` into a zlib stream at the default compression level.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
