use std::io::{self, Read};

use super::SwfReader;
use crate::CodecError;

/// Delivers its data in fixed-size fragments, one fragment per `read` call.
struct Fragmented {
    data: Vec<u8>,
    chunks: Vec<usize>,
    pos: usize,
    call: usize,
}

impl Fragmented {
    fn new(data: &[u8], chunks: &[usize]) -> Self {
        Self {
            data: data.to_vec(),
            chunks: chunks.to_vec(),
            pos: 0,
            call: 0,
        }
    }
}

impl Read for Fragmented {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.chunks.get(self.call).copied().unwrap_or(usize::MAX);
        self.call += 1;
        let n = chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Fails with `Interrupted` on every other call.
struct Flaky {
    inner: io::Cursor<Vec<u8>>,
    interrupt: bool,
}

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let n = buf.len().min(1);
        self.inner.read(&mut buf[..n])
    }
}

#[test]
fn little_endian_integers() {
    let bytes = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
    let mut r = SwfReader::new(&bytes[..]);

    assert_eq!(r.read_ui8().unwrap(), 1);
    assert_eq!(r.read_ui16().unwrap(), 0x1234);
    assert_eq!(r.read_ui32().unwrap(), 0x1234_5678);
    assert_eq!(r.position(), 7);
}

#[test]
fn bit_fields_msb_first() {
    // 1011_0011 1000_0000
    let bytes = [0b1011_0011, 0b1000_0000];
    let mut r = SwfReader::new(&bytes[..]);

    assert_eq!(r.read_ub(1).unwrap(), 1);
    assert_eq!(r.read_ub(3).unwrap(), 0b011);
    assert_eq!(r.read_ub(5).unwrap(), 0b0011_1);
}

#[test]
fn signed_bit_fields_sign_extend() {
    // 5-bit fields: 11111 (-1), 10000 (-16), 01111 (15)
    let bytes = [0b1111_1100, 0b0001_1110];
    let mut r = SwfReader::new(&bytes[..]);

    assert_eq!(r.read_sb(5).unwrap(), -1);
    assert_eq!(r.read_sb(5).unwrap(), -16);
    assert_eq!(r.read_sb(5).unwrap(), 15);
}

#[test]
fn zero_width_field_reads_nothing() {
    let mut r = SwfReader::new(&[][..]);
    assert_eq!(r.read_ub(0).unwrap(), 0);
    assert_eq!(r.read_sb(0).unwrap(), 0);
    assert_eq!(r.position(), 0);
}

#[test]
fn byte_read_discards_pending_bits() {
    let bytes = [0b1000_0000, 0x2A];
    let mut r = SwfReader::new(&bytes[..]);

    assert_eq!(r.read_ub(1).unwrap(), 1);
    assert_eq!(r.read_ui8().unwrap(), 0x2A);
}

#[test]
fn fragmented_reads_accumulate() {
    let data: Vec<u8> = (0..10).collect();
    let mut r = SwfReader::new(Fragmented::new(&data, &[3, 4, 3]));

    let got = r.read_bytes(10).unwrap();
    assert_eq!(got, data);
    assert_eq!(r.position(), 10);
}

#[test]
fn interrupted_reads_are_retried() {
    let mut r = SwfReader::new(Flaky {
        inner: io::Cursor::new(vec![1, 2, 3]),
        interrupt: false,
    });

    assert_eq!(r.read_bytes(3).unwrap(), vec![1, 2, 3]);
}

#[test]
fn eof_before_declared_length() {
    let mut r = SwfReader::new(Fragmented::new(&[1, 2, 3], &[2, 1]));

    let err = r.read_bytes(5).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnexpectedEof {
            expected: 2,
            offset: 3
        }
    ));
    assert!(err.is_framing());
}

#[test]
fn oversized_length_fails_without_preallocating() {
    let mut r = SwfReader::new(&[1u8, 2][..]);

    let err = r.read_bytes(0xFFFF_FFF0).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnexpectedEof {
            expected: 0xFFFF_FFEE,
            offset: 2
        }
    ));
}

#[test]
fn bulk_reads_span_chunks() {
    let data: Vec<u8> = (0..10_000u32).map(|i| i as u8).collect();
    let mut r = SwfReader::new(Fragmented::new(&data, &[1, 5000, 7]));

    assert_eq!(r.read_bytes(9_999).unwrap(), data[..9_999]);
    assert_eq!(r.position(), 9_999);
    assert_eq!(r.read_ui8().unwrap(), data[9_999]);
}

#[test]
fn strings_are_null_terminated() {
    let bytes = b"abc\0def\0";
    let mut r = SwfReader::new(&bytes[..]);

    assert_eq!(r.read_string().unwrap(), "abc");
    assert_eq!(r.read_string().unwrap(), "def");
}

#[test]
fn invalid_utf8_string() {
    let bytes = [0x41, 0xFF, 0x00];
    let mut r = SwfReader::at_position(&bytes[..], 100);

    let err = r.read_string().unwrap_err();
    assert!(matches!(err, CodecError::InvalidString { offset: 100 }));
}

#[test]
fn skip_drains_exact_count() {
    let data: Vec<u8> = (0..=255).cycle().take(5000).collect();
    let mut r = SwfReader::new(&data[..]);

    r.skip(4999).unwrap();
    assert_eq!(r.read_ui8().unwrap(), data[4999]);
    assert!(r.read_ui8().is_err());
}
