//! Minimal single-page PDF emission.
//!
//! The document is a fixed five-object graph: catalog, page tree, page,
//! image XObject, and content stream. Objects are numbered by their
//! position in that sequence, and the cross-reference table must point at
//! the exact byte where each object's marker was written.

use tracing::debug;

use crate::codec::flate;
use crate::error::Result;

/// Signature line plus a binary-marker comment, so transfer tools treat
/// the file as binary.
const PDF_HEADER: &[u8] = b"%PDF-1.4\n%\xff\xff\xff\xff\n";

/// The xref free-list head entry.
const XREF_FREE_ENTRY: &[u8] = b"0000000000 65535 f \n";

/// Serializes numbered objects, recording the byte offset at which each
/// object's `"<n> 0 obj"` marker begins.
pub struct ObjectWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self {
            out: PDF_HEADER.to_vec(),
            offsets: Vec::new(),
        }
    }

    /// Append the next object body. Object numbers are assigned
    /// sequentially from 1.
    pub fn write_object(&mut self, body: &[u8]) {
        let number = self.offsets.len() + 1;
        self.offsets.push(self.out.len());
        self.out.extend_from_slice(format!("{number} 0 obj\n").as_bytes());
        self.out.extend_from_slice(body);
        self.out.extend_from_slice(b"\nendobj\n");
    }

    /// Byte offsets recorded so far, one per written object.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Write the cross-reference table and trailer. Object 1 is the
    /// document root.
    pub fn finish(mut self) -> Vec<u8> {
        let xref_start = self.out.len();
        let count = self.offsets.len();

        self.out
            .extend_from_slice(format!("xref\n0 {}\n", count + 1).as_bytes());
        self.out.extend_from_slice(XREF_FREE_ENTRY);
        for pos in &self.offsets {
            self.out
                .extend_from_slice(format!("{pos:010} 00000 n \n").as_bytes());
        }
        self.out.extend_from_slice(b"trailer\n");
        self.out.extend_from_slice(
            format!(
                "<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF",
                count + 1
            )
            .as_bytes(),
        );

        self.out
    }
}

impl Default for ObjectWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a single-page document embedding `rgb` as a flate-compressed
/// image, one page unit per pixel.
pub fn build_pdf(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let image_stream = flate::deflate(rgb)?;
    let contents = format!("q {width} 0 0 {height} 0 0 cm /Im0 Do Q").into_bytes();
    debug!(
        raw_bytes = rgb.len(),
        compressed_bytes = image_stream.len(),
        "compressed image stream"
    );

    let mut writer = ObjectWriter::new();
    writer.write_object(b"<< /Type /Catalog /Pages 2 0 R >>");
    writer.write_object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    writer.write_object(
        format!(
            "<< /Type /Page /Parent 2 0 R /Resources << /XObject << /Im0 4 0 R >> \
             /ProcSet [/PDF /ImageC] >> /MediaBox [0 0 {width} {height}] /Contents 5 0 R >>"
        )
        .as_bytes(),
    );

    let mut image_object = format!(
        "<< /Type /XObject /Subtype /Image /Width {width} /Height {height} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>\nstream\n",
        image_stream.len()
    )
    .into_bytes();
    image_object.extend_from_slice(&image_stream);
    image_object.extend_from_slice(b"\nendstream");
    writer.write_object(&image_object);

    let mut contents_object =
        format!("<< /Length {} >>\nstream\n", contents.len()).into_bytes();
    contents_object.extend_from_slice(&contents);
    contents_object.extend_from_slice(b"\nendstream");
    writer.write_object(&contents_object);

    Ok(writer.finish())
}
