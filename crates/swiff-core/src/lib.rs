#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core building blocks of the SWF codec.
//!
//! - **Stream I/O**: [`SwfReader`] / [`SwfWriter`] for little-endian integers,
//!   MSB-first bit fields and null-terminated strings
//! - **Framing**: [`RecordHeader`], the type + length prefix of every tag
//! - **Geometry**: [`Rect`], the bit-packed rectangle with a computed width
//! - **Render boundary**: [`display`] data consumed by a drawing front-end

pub mod display;
pub mod error;
pub mod io;
pub mod rect;
pub mod record_header;


pub use display::{BlendMode, DisplayNode, RenderBackend, UnknownBlendMode, draw_node};
pub use error::{CodecError, Result};
pub use io::{SwfReader, SwfWriter};
pub use rect::{MAX_FIELD_BITS, Rect};
pub use record_header::{LENGTH_ESCAPE, MAX_RECORD_CODE, RecordHeader};
