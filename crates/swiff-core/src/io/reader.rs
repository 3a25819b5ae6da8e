//! Bit-level reader over any byte source.

use std::io::{self, ErrorKind, Read};

use crate::error::{CodecError, Result};

/// Scratch size for bulk reads. Declared lengths come from the stream, so
/// buffers grow with the bytes that actually arrive, one chunk at a time.
const CHUNK: usize = 4096;

/// Reads SWF primitive types from a byte source.
///
/// Multi-byte integers are little-endian. Bit fields (`UB`, `SB`) are read
/// most-significant bit first and share a pending byte; any byte-level read
/// discards the unread bits of that byte, which is the format's alignment rule.
///
/// The underlying source may return short reads at any point. Every byte-level
/// read accumulates until the requested amount is present, and only a read
/// that returns zero bytes counts as end of stream.
#[derive(Debug)]
pub struct SwfReader<R> {
    inner: R,
    position: u64,
    bit_buf: u8,
    /// Unread bits left in `bit_buf`.
    bit_count: u8,
}

impl<R: Read> SwfReader<R> {
    pub fn new(inner: R) -> Self {
        Self::at_position(inner, 0)
    }

    /// Create a reader whose reported offsets start at `position`.
    ///
    /// Used when a sub-reader is carved out of a larger stream so that errors
    /// still report offsets of the enclosing stream.
    pub fn at_position(inner: R, position: u64) -> Self {
        Self {
            inner,
            position,
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Byte offset of the next byte to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Drop any partially consumed bit-field byte.
    #[inline]
    pub fn align(&mut self) {
        self.bit_count = 0;
    }

    /// Fill `buf` completely, accumulating partial reads.
    pub fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        self.align();
        self.fill(buf)
    }

    /// Read exactly `count` bytes into a new buffer.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(count.min(CHUNK));
        self.drain(count as u64, |chunk| buf.extend_from_slice(chunk))?;
        Ok(buf)
    }

    /// Discard exactly `count` bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.drain(count, |_| {})
    }

    /// Pass exactly `count` bytes to `sink` in chunks of at most [`CHUNK`].
    ///
    /// On a short stream the error counts every byte still missing, not just
    /// those of the current chunk.
    fn drain(&mut self, count: u64, mut sink: impl FnMut(&[u8])) -> Result<()> {
        self.align();
        let mut scratch = [0u8; CHUNK];
        let mut left = count;
        while left > 0 {
            let n = left.min(CHUNK as u64) as usize;
            left -= n as u64;
            self.fill(&mut scratch[..n]).map_err(|err| match err {
                CodecError::UnexpectedEof { expected, offset } => CodecError::UnexpectedEof {
                    expected: expected + left,
                    offset,
                },
                other => other,
            })?;
            sink(&scratch[..n]);
        }
        Ok(())
    }

    pub fn read_ui8(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.read_fully(&mut b)?;
        Ok(b[0])
    }

    pub fn read_ui16(&mut self) -> Result<u16> {
        let mut b = [0u8; 2];
        self.read_fully(&mut b)?;
        Ok(u16::from_le_bytes(b))
    }

    pub fn read_ui32(&mut self) -> Result<u32> {
        let mut b = [0u8; 4];
        self.read_fully(&mut b)?;
        Ok(u32::from_le_bytes(b))
    }

    /// Read an unsigned bit field of `bits` width (0..=32).
    pub fn read_ub(&mut self, bits: u32) -> Result<u32> {
        debug_assert!(bits <= 32, "bit field too wide: {bits}");
        let mut value: u32 = 0;
        for _ in 0..bits {
            if self.bit_count == 0 {
                let mut b = [0u8; 1];
                self.fill(&mut b)?;
                self.bit_buf = b[0];
                self.bit_count = 8;
            }
            self.bit_count -= 1;
            let bit = (self.bit_buf >> self.bit_count) & 1;
            value = (value << 1) | bit as u32;
        }
        Ok(value)
    }

    /// Read a signed bit field of `bits` width, sign-extended from its top bit.
    pub fn read_sb(&mut self, bits: u32) -> Result<i32> {
        if bits == 0 {
            return Ok(0);
        }
        let raw = self.read_ub(bits)?;
        let shift = 32 - bits;
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Read a null-terminated UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        self.align();
        let start = self.position;
        let mut bytes = Vec::new();
        loop {
            let mut b = [0u8; 1];
            self.fill(&mut b)?;
            if b[0] == 0 {
                break;
            }
            bytes.push(b[0]);
        }
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidString { offset: start })
    }

    /// Byte-level fill without touching the bit state.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut offset = 0;
        while offset < buf.len() {
            match self.inner.read(&mut buf[offset..]) {
                Ok(0) => {
                    return Err(CodecError::UnexpectedEof {
                        expected: (buf.len() - offset) as u64,
                        offset: self.position,
                    });
                }
                Ok(n) => {
                    offset += n;
                    self.position += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for SwfReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.align();
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}
