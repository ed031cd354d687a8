//! PNG container parsing: chunk framing and structural records.

pub mod chunks;
pub mod container;

pub use chunks::{ChunkReader, PNG_SIGNATURE, RawChunk};
pub use container::PngContainer;
