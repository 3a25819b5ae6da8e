#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! SWF tag model and movie framing.
//!
//! A [`Movie`] is a file header followed by framed records. Each record decodes
//! into a [`Tag`]; consumers walk tags through [`TagVisitor`] rather than
//! matching on the enum, so every kind is handled explicitly.

pub mod dump;
pub mod kind;
pub mod movie;
pub mod record;
pub mod tag;
pub mod visitor;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod kind_tests;
#[cfg(test)]
mod tag_tests;
#[cfg(test)]
mod visitor_tests;

pub use dump::{MovieSummary, TagSummary, dump, summarize};
pub use kind::{TagKind, requires_long_header};
pub use movie::{
    FILE_HEADER_LEN, Movie, MovieHeader, SIGNATURE_COMPRESSED, SIGNATURE_PLAIN, uncompressed_image,
};
pub use record::{DecodeOptions, UnknownTagPolicy, read_record, write_record};
pub use tag::{
    DO_ABC_LAZY_INITIALIZE, DefineBinaryData, DefineBitsJpeg2, DefineScalingGrid, DoAbc,
    FileAttributes, Rgb, ScriptLimits, SymbolClass, Tag, UnknownTag,
};
pub use visitor::{AbcCollector, FrameCounter, TagVisitor};
