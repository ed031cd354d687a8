//! Chunk-level framing of the PNG container.
//!
//! A PNG stream is the 8-byte signature followed by chunks: a 4-byte
//! big-endian payload length, a 4-byte type tag, the payload, and a 4-byte
//! CRC. The CRC bytes are consumed and never verified.

use crate::error::{ConvertError, Result};

/// The fixed 8-byte magic signature every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// One chunk record, borrowing its payload from the input stream.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    pub tag: [u8; 4],
    pub data: &'a [u8],
}

/// Sequential chunk reader over a fully buffered stream.
///
/// Owns the single read cursor; construction consumes the signature.
#[derive(Debug)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if !data.starts_with(&PNG_SIGNATURE) {
            return Err(ConvertError::Signature);
        }
        Ok(Self {
            data,
            pos: PNG_SIGNATURE.len(),
        })
    }

    /// Read the next chunk, or `None` once the input is exhausted.
    pub fn next_chunk(&mut self) -> Result<Option<RawChunk<'a>>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(self.take(4, "length")?);
        let length = u32::from_be_bytes(len_bytes);

        let mut tag = [0u8; 4];
        tag.copy_from_slice(self.take(4, "type tag")?);
        let data = self.take(length as usize, "payload")?;
        self.take(4, "checksum")?; // consumed, not verified

        Ok(Some(RawChunk { tag, data }))
    }

    fn take(&mut self, count: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| ConvertError::MalformedChunk(format!("truncated chunk {what}")))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(tag);
        out.extend_from_slice(payload);
        out.extend_from_slice(&[0, 0, 0, 0]); // CRC, ignored
        out
    }

    #[test]
    fn rejects_bad_signature() {
        let err = ChunkReader::new(b"JFIF\x00\x00\x00\x00rest").unwrap_err();
        assert!(matches!(err, ConvertError::Signature));
    }

    #[test]
    fn walks_chunks_in_order() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&chunk(b"tEXt", b"hello"));
        data.extend_from_slice(&chunk(b"IEND", b""));

        let mut reader = ChunkReader::new(&data).unwrap();
        let first = reader.next_chunk().unwrap().unwrap();
        assert_eq!(&first.tag, b"tEXt");
        assert_eq!(first.data, b"hello");
        let second = reader.next_chunk().unwrap().unwrap();
        assert_eq!(&second.tag, b"IEND");
        assert!(reader.next_chunk().unwrap().is_none());
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&1000u32.to_be_bytes());
        data.extend_from_slice(b"IDAT");
        data.extend_from_slice(b"short");

        let mut reader = ChunkReader::new(&data).unwrap();
        let err = reader.next_chunk().unwrap_err();
        assert!(matches!(err, ConvertError::MalformedChunk(_)));
    }
}
