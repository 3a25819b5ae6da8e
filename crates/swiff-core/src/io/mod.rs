//! Stream primitives shared by every record codec.

mod reader;
mod writer;

#[cfg(test)]
mod reader_tests;

pub use reader::SwfReader;
pub use writer::SwfWriter;
