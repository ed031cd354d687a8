//! Codec modules for the pixel data path.
//!
//! This module contains:
//! - `defilter`: scanline prediction filter reversal
//! - `flate`: zlib decompression and compression

pub mod defilter;
pub mod flate;

// Re-export main functions for convenience
pub use defilter::{defilter, paeth_predictor};
pub use flate::{deflate, inflate};
