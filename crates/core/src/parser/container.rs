//! Container-level parsing: chunk dispatch and subset validation.

use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::model::{ColorMode, ImageHeader, Palette, Transparency};
use crate::parser::chunks::ChunkReader;

/// Header chunk fields before subset validation.
#[derive(Debug, Clone, Copy)]
struct RawHeader {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    interlace: u8,
}

impl RawHeader {
    /// Parse the 13-byte header payload.
    ///
    /// Compression and filter methods have exactly one defined value each,
    /// so they are rejected here rather than carried around.
    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != 13 {
            return Err(ConvertError::MalformedChunk(format!(
                "IHDR payload of {} bytes, expected 13",
                data.len()
            )));
        }
        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let bit_depth = data[8];
        let color_type = data[9];
        let compression = data[10];
        let filter_method = data[11];
        let interlace = data[12];

        if compression != 0 || filter_method != 0 {
            return Err(ConvertError::UnsupportedFormat(format!(
                "compression method {compression}, filter method {filter_method}"
            )));
        }

        Ok(Self {
            width,
            height,
            bit_depth,
            color_type,
            interlace,
        })
    }

    fn validate(self) -> Result<ImageHeader> {
        if self.bit_depth != 8 {
            return Err(ConvertError::UnsupportedFormat(format!(
                "bit depth {}",
                self.bit_depth
            )));
        }
        if self.interlace != 0 {
            return Err(ConvertError::UnsupportedFormat(
                "interlaced images".to_string(),
            ));
        }
        let color = ColorMode::try_from(self.color_type)?;
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::MalformedChunk(format!(
                "IHDR declares a {}x{} image",
                self.width, self.height
            )));
        }
        Ok(ImageHeader {
            width: self.width,
            height: self.height,
            bit_depth: self.bit_depth,
            color,
        })
    }
}

/// A parsed PNG container, restricted to the supported subset.
///
/// All fields are populated once during parsing and never mutated. `idat`
/// is the concatenation of every data-chunk payload in file order, still
/// zlib-compressed.
#[derive(Debug, Clone)]
pub struct PngContainer {
    pub header: ImageHeader,
    pub palette: Option<Palette>,
    pub transparency: Option<Transparency>,
    pub idat: Vec<u8>,
}

impl PngContainer {
    /// Split a PNG byte stream into its structural records.
    ///
    /// Walks chunks until the end marker (or end of input): the header,
    /// palette and transparency chunks populate their records, data chunks
    /// append to the compressed pixel stream, every other tag is skipped.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = ChunkReader::new(data)?;
        let mut raw_header: Option<RawHeader> = None;
        let mut palette: Option<Palette> = None;
        let mut trns: Option<Vec<u8>> = None;
        let mut idat = Vec::new();

        while let Some(chunk) = reader.next_chunk()? {
            match &chunk.tag {
                b"IHDR" => raw_header = Some(RawHeader::parse(chunk.data)?),
                b"IDAT" => idat.extend_from_slice(chunk.data),
                b"PLTE" => palette = Some(Palette::parse(chunk.data)?),
                b"tRNS" => trns = Some(chunk.data.to_vec()),
                b"IEND" => break,
                _ => {}
            }
        }

        if idat.is_empty() {
            return Err(ConvertError::MissingData(
                "no data chunk in stream".to_string(),
            ));
        }
        let header = raw_header
            .ok_or_else(|| ConvertError::MissingData("no header chunk in stream".to_string()))?
            .validate()?;
        if header.color == ColorMode::Indexed && palette.is_none() {
            return Err(ConvertError::MissingData(
                "indexed image has no palette chunk".to_string(),
            ));
        }
        let transparency = trns.and_then(|payload| Transparency::resolve(header.color, payload));

        debug!(
            width = header.width,
            height = header.height,
            color = ?header.color,
            idat_bytes = idat.len(),
            "parsed container"
        );

        Ok(Self {
            header,
            palette,
            transparency,
            idat,
        })
    }
}
