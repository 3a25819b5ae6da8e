//! Record framing: header + payload, with unknown-tag policy.

use std::io::{Read, Write};

use swiff_core::{CodecError, RecordHeader, Result, SwfReader, SwfWriter};
use tracing::{debug, warn};

use crate::kind::{TagKind, requires_long_header};
use crate::tag::Tag;

/// What to do with records whose code has no [`Tag`] variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Keep the raw payload as [`Tag::Unknown`] so it is written back unchanged.
    ///
    /// The header form is not kept: a long header on a payload shorter than 63
    /// bytes is written back in short form, so the round trip is byte-exact
    /// only for input that uses the shortest header.
    #[default]
    Preserve,
    /// Drop the record and continue with the next one.
    Skip,
    /// Fail with [`CodecError::UnsupportedTag`].
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_tags: UnknownTagPolicy,
}

impl DecodeOptions {
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }
}

/// Read one framed record.
///
/// Returns `Ok(None)` when the record was skipped by policy. The payload is
/// parsed from a reader limited to the declared length: a payload that wants
/// more is a [`CodecError::LengthMismatch`], a payload that wants less has its
/// trailing bytes drained so the stream stays in step. A stream that ends
/// before the declared length is a [`CodecError::TruncatedRecord`].
pub fn read_record<R: Read>(
    reader: &mut SwfReader<R>,
    options: &DecodeOptions,
) -> Result<Option<Tag>> {
    let offset = reader.position();
    let header = RecordHeader::read(reader)?;
    let declared = header.length as u64;

    if TagKind::from_code(header.code).is_none() {
        match options.unknown_tags {
            UnknownTagPolicy::Preserve => {}
            UnknownTagPolicy::Skip => {
                debug!(code = header.code, length = header.length, offset, "skipping unknown tag");
                reader
                    .skip(declared)
                    .map_err(|err| truncated(header.code, err))?;
                return Ok(None);
            }
            UnknownTagPolicy::Error => {
                return Err(CodecError::UnsupportedTag {
                    code: header.code,
                    offset,
                });
            }
        }
    }

    let payload_start = reader.position();
    let mut payload = SwfReader::at_position(Read::take(&mut *reader, declared), payload_start);

    let tag = Tag::read(&header, &mut payload).map_err(|err| match err {
        CodecError::UnexpectedEof { expected, offset } if offset - payload_start == declared => {
            CodecError::LengthMismatch {
                code: header.code,
                declared,
                actual: declared + expected,
            }
        }
        other => truncated(header.code, other),
    })?;

    let consumed = payload.position() - payload_start;
    if consumed < declared {
        warn!(
            code = header.code,
            declared,
            consumed,
            offset,
            "draining unread bytes at end of tag"
        );
        payload
            .skip(declared - consumed)
            .map_err(|err| truncated(header.code, err))?;
    }

    debug!(code = header.code, name = tag.name(), length = header.length, offset, "decoded tag");
    Ok(Some(tag))
}

/// Attach the record code to a stream that ended inside the payload.
fn truncated(code: u16, err: CodecError) -> CodecError {
    match err {
        CodecError::UnexpectedEof { expected, offset } => CodecError::TruncatedRecord {
            code,
            expected,
            offset,
        },
        other => other,
    }
}

/// Write one framed record: header, then exactly `tag.length()` payload bytes.
pub fn write_record<W: Write>(writer: &mut SwfWriter<W>, tag: &Tag) -> Result<()> {
    let declared = tag.length()?;

    let mut payload = SwfWriter::new(Vec::new());
    tag.write(&mut payload)?;
    let bytes = payload.into_inner()?;

    if bytes.len() as u64 != declared as u64 {
        return Err(CodecError::LengthMismatch {
            code: tag.code(),
            declared: declared as u64,
            actual: bytes.len() as u64,
        });
    }

    let header = RecordHeader::new(tag.code(), declared);
    header.write(writer, requires_long_header(tag.code()))?;
    writer.write_bytes(&bytes)?;

    debug!(code = tag.code(), name = tag.name(), length = declared, "encoded tag");
    Ok(())
}
