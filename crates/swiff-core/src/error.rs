//! Codec error taxonomy.

use std::io;

/// Errors raised while decoding or encoding SWF records.
///
/// Offsets are byte positions in the stream being decoded, counted from the
/// point where the reader was created.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream ended before a declared amount of data was available.
    #[error("unexpected end of stream at offset {offset}: needed {expected} more bytes")]
    UnexpectedEof { expected: u64, offset: u64 },

    /// A declared record length disagrees with the bytes actually produced or consumed.
    #[error("length mismatch for record {code}: declared {declared} bytes, got {actual}")]
    LengthMismatch { code: u16, declared: u64, actual: u64 },

    /// A record code that the current variant set does not know.
    #[error("unsupported record type {code} at offset {offset}")]
    UnsupportedTag { code: u16, offset: u64 },

    /// A value does not fit the field width the format allows.
    #[error("{what} needs {bits} bits, format allows at most {max}")]
    RangeOverflow {
        what: &'static str,
        bits: u32,
        max: u32,
    },

    /// The file header's length field disagrees with the decoded content.
    #[error("file length mismatch: header says {declared} bytes, decoded {actual}")]
    FileLengthMismatch { declared: u64, actual: u64 },

    #[error("invalid signature {0:?}: expected FWS or CWS")]
    InvalidSignature([u8; 3]),

    /// A null-terminated string is not valid UTF-8.
    #[error("invalid string at offset {offset}")]
    InvalidString { offset: u64 },

    /// A string to be written contains a NUL byte, which would end it early.
    #[error("string contains a NUL byte at index {index}")]
    InteriorNul { index: usize },

    /// The stream ended inside a record payload.
    #[error("record {code} truncated at offset {offset}: needed {expected} more bytes")]
    TruncatedRecord { code: u16, expected: u64, offset: u64 },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Whether the error comes from record framing rather than the transport.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof { .. }
                | Self::TruncatedRecord { .. }
                | Self::LengthMismatch { .. }
                | Self::FileLengthMismatch { .. }
        )
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
