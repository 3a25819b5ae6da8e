//! Bit-level writer, mirror of [`SwfReader`](super::SwfReader).

use std::io::Write;

use crate::error::{CodecError, Result};

/// Writes SWF primitive types to a byte sink.
///
/// Bit fields are packed most-significant bit first. Any byte-level write
/// first pads the pending bit-field byte with zeros.
#[derive(Debug)]
pub struct SwfWriter<W> {
    inner: W,
    position: u64,
    bit_buf: u8,
    /// Bits already used in `bit_buf`.
    bit_count: u8,
}

impl<W: Write> SwfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            position: 0,
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Number of whole bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush pending bits and return the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.align()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// Pad the pending bit-field byte with zeros and emit it.
    pub fn align(&mut self) -> Result<()> {
        if self.bit_count > 0 {
            let b = self.bit_buf;
            self.bit_buf = 0;
            self.bit_count = 0;
            self.emit(&[b])?;
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.align()?;
        self.emit(bytes)
    }

    pub fn write_ui8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_ui16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_ui32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write the low `bits` bits of `value` as an unsigned bit field.
    pub fn write_ub(&mut self, bits: u32, value: u32) -> Result<()> {
        debug_assert!(bits <= 32, "bit field too wide: {bits}");
        if bits < 32 && value >> bits != 0 {
            return Err(CodecError::RangeOverflow {
                what: "unsigned bit field",
                bits: 32 - value.leading_zeros(),
                max: bits,
            });
        }
        for i in (0..bits).rev() {
            let bit = ((value >> i) & 1) as u8;
            self.bit_buf |= bit << (7 - self.bit_count);
            self.bit_count += 1;
            if self.bit_count == 8 {
                self.align()?;
            }
        }
        Ok(())
    }

    /// Write `value` as a two's-complement bit field of `bits` width.
    pub fn write_sb(&mut self, bits: u32, value: i32) -> Result<()> {
        if bits == 0 {
            if value != 0 {
                return Err(CodecError::RangeOverflow {
                    what: "signed bit field",
                    bits: 1,
                    max: 0,
                });
            }
            return Ok(());
        }
        if bits < 32 {
            let min = -(1i64 << (bits - 1));
            let max = (1i64 << (bits - 1)) - 1;
            if !(min..=max).contains(&(value as i64)) {
                return Err(CodecError::RangeOverflow {
                    what: "signed bit field",
                    bits: 33 - value.unsigned_abs().leading_zeros(),
                    max: bits,
                });
            }
        }
        let mask = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
        self.write_ub(bits, value as u32 & mask)
    }

    /// Write a null-terminated UTF-8 string.
    ///
    /// A string with an interior NUL is rejected before anything is written:
    /// the reader would stop at that byte.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        if let Some(index) = value.bytes().position(|b| b == 0) {
            return Err(CodecError::InteriorNul { index });
        }
        self.write_bytes(value.as_bytes())?;
        self.write_ui8(0)
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }
}
