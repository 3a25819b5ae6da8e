//! Record framing (`RECORDHEADER`).
//!
//! Short form: one UI16 holding `code << 6 | length` for lengths below 63.
//! Long form: the 6-bit length holds the escape value 0x3F and a UI32 length
//! follows.

use std::io::{Read, Write};

use tracing::trace;

use crate::error::{CodecError, Result};
use crate::io::{SwfReader, SwfWriter};

/// Escape value of the 6-bit length field.
pub const LENGTH_ESCAPE: u16 = 0x3F;

/// Largest record code the 10-bit code field can hold.
pub const MAX_RECORD_CODE: u16 = 0x3FF;

/// Type and payload length of one record. The header itself is not counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub code: u16,
    pub length: u32,
}

impl RecordHeader {
    pub fn new(code: u16, length: u32) -> Self {
        Self { code, length }
    }

    pub fn read<R: Read>(reader: &mut SwfReader<R>) -> Result<Self> {
        let code_and_length = reader.read_ui16()?;
        let code = code_and_length >> 6;
        let short = code_and_length & LENGTH_ESCAPE;
        let long = short == LENGTH_ESCAPE;
        let length = if long { reader.read_ui32()? } else { short as u32 };
        if long && length < LENGTH_ESCAPE as u32 {
            trace!(code, length, "long header on a short record");
        }
        Ok(Self { code, length })
    }

    /// Whether this header is written in long form.
    pub fn needs_long_form(&self, force_long: bool) -> bool {
        force_long || self.length >= LENGTH_ESCAPE as u32
    }

    /// Bytes the header occupies on the wire.
    pub fn encoded_len(&self, force_long: bool) -> usize {
        if self.needs_long_form(force_long) { 6 } else { 2 }
    }

    /// Write the header; `force_long` selects the long form even for short lengths.
    pub fn write<W: Write>(&self, writer: &mut SwfWriter<W>, force_long: bool) -> Result<()> {
        if self.code > MAX_RECORD_CODE {
            return Err(CodecError::RangeOverflow {
                what: "record code",
                bits: 16 - self.code.leading_zeros(),
                max: 10,
            });
        }
        if self.needs_long_form(force_long) {
            writer.write_ui16(self.code << 6 | LENGTH_ESCAPE)?;
            writer.write_ui32(self.length)
        } else {
            writer.write_ui16(self.code << 6 | self.length as u16)
        }
    }
}
