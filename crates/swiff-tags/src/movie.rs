//! Whole-file framing.
//!
//! ```text
//! 0-2   signature  "FWS" (plain) or "CWS" (zlib body)
//! 3     version
//! 4-7   file length, uncompressed, header included
//! 8..   body: RECT frame size, UI16 frame rate (8.8), UI16 frame count, tags
//! ```

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use swiff_core::{CodecError, Rect, Result, SwfReader, SwfWriter};
use tracing::{debug, warn};

use crate::record::{DecodeOptions, read_record, write_record};
use crate::tag::{DoAbc, Tag};
use crate::visitor::{AbcCollector, FrameCounter, TagVisitor};

pub const SIGNATURE_PLAIN: [u8; 3] = *b"FWS";
pub const SIGNATURE_COMPRESSED: [u8; 3] = *b"CWS";

/// Size of the fixed part before the (possibly compressed) body.
pub const FILE_HEADER_LEN: u64 = 8;

/// Fields between the file header and the first tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovieHeader {
    pub version: u8,
    /// Stage bounds in twips.
    pub frame_size: Rect,
    /// Frames per second in 8.8 fixed point.
    pub frame_rate: u16,
    pub frame_count: u16,
}

impl Default for MovieHeader {
    fn default() -> Self {
        Self {
            version: 10,
            frame_size: Rect::new(0, 11000, 0, 8000),
            frame_rate: 24 << 8,
            frame_count: 1,
        }
    }
}

impl MovieHeader {
    pub fn frame_rate_fps(&self) -> f32 {
        self.frame_rate as f32 / 256.0
    }
}

/// A decoded SWF file. `tags` never contains the terminating [`Tag::End`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movie {
    /// Whether the body is zlib-compressed on the wire.
    pub compressed: bool,
    pub header: MovieHeader,
    pub tags: Vec<Tag>,
}

impl Movie {
    pub fn from_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        Self::read(bytes, options)
    }

    pub fn read<R: Read>(source: R, options: &DecodeOptions) -> Result<Self> {
        let mut raw = SwfReader::new(source);
        let mut signature = [0u8; 3];
        raw.read_fully(&mut signature)?;
        let compressed = match signature {
            SIGNATURE_PLAIN => false,
            SIGNATURE_COMPRESSED => true,
            other => return Err(CodecError::InvalidSignature(other)),
        };
        let version = raw.read_ui8()?;
        let file_length = raw.read_ui32()? as u64;
        debug!(version, compressed, file_length, "decoding movie");

        if compressed {
            Self::read_body(ZlibDecoder::new(raw), version, file_length, true, options)
        } else {
            Self::read_body(raw, version, file_length, false, options)
        }
    }

    fn read_body<B: Read>(
        body: B,
        version: u8,
        file_length: u64,
        compressed: bool,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let mut reader = SwfReader::at_position(body, FILE_HEADER_LEN);

        let header = MovieHeader {
            version,
            frame_size: Rect::read(&mut reader)?,
            frame_rate: reader.read_ui16()?,
            frame_count: reader.read_ui16()?,
        };

        let mut tags = Vec::new();
        loop {
            if reader.position() >= file_length {
                warn!(file_length, "movie ends without End tag");
                break;
            }
            match read_record(&mut reader, options)? {
                Some(Tag::End) => break,
                Some(tag) => tags.push(tag),
                None => {}
            }
        }

        let actual = reader.position();
        if actual > file_length {
            return Err(CodecError::FileLengthMismatch {
                declared: file_length,
                actual,
            });
        }
        if actual < file_length {
            warn!(file_length, actual, "ignoring bytes after End tag");
        }

        Ok(Self {
            compressed,
            header,
            tags,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// Encode the movie; the file length is computed from the encoded body.
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        let mut body = SwfWriter::new(Vec::new());
        self.header.frame_size.write(&mut body)?;
        body.write_ui16(self.header.frame_rate)?;
        body.write_ui16(self.header.frame_count)?;
        for tag in self.tags.iter().filter(|tag| **tag != Tag::End) {
            write_record(&mut body, tag)?;
        }
        write_record(&mut body, &Tag::End)?;
        let body = body.into_inner()?;

        let file_length = FILE_HEADER_LEN + body.len() as u64;
        let file_length = u32::try_from(file_length).map_err(|_| CodecError::RangeOverflow {
            what: "file length",
            bits: u64::BITS - file_length.leading_zeros(),
            max: 32,
        })?;

        let mut out = SwfWriter::new(sink);
        out.write_bytes(if self.compressed {
            &SIGNATURE_COMPRESSED
        } else {
            &SIGNATURE_PLAIN
        })?;
        out.write_ui8(self.header.version)?;
        out.write_ui32(file_length)?;
        let mut sink = out.into_inner()?;

        if self.compressed {
            let mut encoder = ZlibEncoder::new(sink, Compression::default());
            encoder.write_all(&body)?;
            encoder.finish()?.flush()?;
        } else {
            sink.write_all(&body)?;
            sink.flush()?;
        }
        debug!(file_length, compressed = self.compressed, "encoded movie");
        Ok(())
    }

    /// Visit every tag in order, followed by the terminating `End`.
    pub fn accept<'a, V: TagVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        for tag in &self.tags {
            tag.accept(visitor);
        }
        visitor.visit_end();
    }

    /// ABC blocks in decode order.
    pub fn abc_blocks(&self) -> Vec<&DoAbc> {
        let mut collector = AbcCollector::default();
        for tag in &self.tags {
            tag.accept(&mut collector);
        }
        collector.blocks
    }

    /// Frames shown and characters defined.
    pub fn count_frames(&self) -> FrameCounter {
        let mut counter = FrameCounter::default();
        self.accept(&mut counter);
        counter
    }
}

/// The file as it would be stored with a plain body.
///
/// `CWS` files have their body inflated and the signature replaced by `FWS`;
/// `FWS` files are returned unchanged. Nothing past the header is parsed.
pub fn uncompressed_image(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut reader = SwfReader::new(bytes);
    let mut header = [0u8; FILE_HEADER_LEN as usize];
    reader.read_fully(&mut header)?;

    let mut out = header.to_vec();
    match [header[0], header[1], header[2]] {
        SIGNATURE_PLAIN => {
            reader.read_to_end(&mut out)?;
        }
        SIGNATURE_COMPRESSED => {
            out[..3].copy_from_slice(&SIGNATURE_PLAIN);
            ZlibDecoder::new(reader).read_to_end(&mut out)?;
        }
        other => return Err(CodecError::InvalidSignature(other)),
    }
    Ok(out)
}
