//! Bit-packed rectangle record (`RECT`).
//!
//! Wire layout:
//!
//! ```text
//! UB[5]      nbits
//! SB[nbits]  min_x
//! SB[nbits]  max_x
//! SB[nbits]  min_y
//! SB[nbits]  max_y
//! (pad to byte boundary)
//! ```
//!
//! `nbits` is derived from the bounds, never stored in the value.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::io::{SwfReader, SwfWriter};

/// Width of the leading `nbits` field.
pub const NBITS_FIELD_WIDTH: u32 = 5;

/// Largest field width the 5-bit `nbits` prefix can describe.
pub const MAX_FIELD_BITS: u32 = (1 << NBITS_FIELD_WIDTH) - 1;

/// Rectangle in twips with a shared, computed field width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Rect {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bits needed to store `value` as a signed field.
    ///
    /// Computed from the magnitude as `33 - leading_zeros(|value|)`, so the
    /// result is symmetric in sign. For negative powers of two this is one bit
    /// wider than the tightest two's-complement width. Existing encoders and
    /// decoders agree on this width, so it is kept as is.
    pub fn count_bits(value: i32) -> u32 {
        if value == 0 {
            return 0;
        }
        33 - value.unsigned_abs().leading_zeros()
    }

    /// Shared field width: the widest of the four bounds.
    pub fn number_of_bits(&self) -> u32 {
        let a = Self::count_bits(self.min_x);
        let b = Self::count_bits(self.max_x);
        let c = Self::count_bits(self.min_y);
        let d = Self::count_bits(self.max_y);
        a.max(b).max(c.max(d))
    }

    /// Encoded size in bytes, including alignment padding.
    pub fn encoded_len(&self) -> usize {
        let bits = NBITS_FIELD_WIDTH + 4 * self.number_of_bits();
        bits.div_ceil(8) as usize
    }

    pub fn width(&self) -> i64 {
        self.max_x as i64 - self.min_x as i64
    }

    pub fn height(&self) -> i64 {
        self.max_y as i64 - self.min_y as i64
    }

    /// Decode a rectangle; leaves the reader byte-aligned.
    pub fn read<R: Read>(reader: &mut SwfReader<R>) -> Result<Self> {
        let nbits = reader.read_ub(NBITS_FIELD_WIDTH)?;
        let rect = Self {
            min_x: reader.read_sb(nbits)?,
            max_x: reader.read_sb(nbits)?,
            min_y: reader.read_sb(nbits)?,
            max_y: reader.read_sb(nbits)?,
        };
        reader.align();
        Ok(rect)
    }

    /// Encode the rectangle; leaves the writer byte-aligned.
    ///
    /// Fails with [`CodecError::RangeOverflow`] when a bound needs more than
    /// [`MAX_FIELD_BITS`] bits.
    pub fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        let nbits = self.number_of_bits();
        if nbits > MAX_FIELD_BITS {
            return Err(CodecError::RangeOverflow {
                what: "rect bound",
                bits: nbits,
                max: MAX_FIELD_BITS,
            });
        }
        writer.write_ub(NBITS_FIELD_WIDTH, nbits)?;
        writer.write_sb(nbits, self.min_x)?;
        writer.write_sb(nbits, self.max_x)?;
        writer.write_sb(nbits, self.min_y)?;
        writer.write_sb(nbits, self.max_y)?;
        writer.align()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
