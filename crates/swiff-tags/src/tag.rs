//! Tag model: one variant per supported record kind.
//!
//! Every payload type knows its wire length and its binary read/write.
//! [`Tag`] dispatches to them with a single exhaustive `match`, so adding a
//! kind means extending this enum, [`TagKind`] and [`TagVisitor`] together.

use std::io::{self, Read, Write};

use swiff_core::{CodecError, Rect, RecordHeader, Result, SwfReader, SwfWriter};

use crate::kind::TagKind;
use crate::visitor::TagVisitor;

/// `DoABC` flag: defer script initialization until first use.
pub const DO_ABC_LAZY_INITIALIZE: u32 = 1;

/// Convert a payload size to the 32-bit length the record header carries.
fn length_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::RangeOverflow {
        what: "record length",
        bits: usize::BITS - len.leading_zeros(),
        max: 32,
    })
}

/// Bytes of the payload still unread, given what a fixed prefix consumed.
fn remaining(header: &RecordHeader, consumed: u64) -> Result<usize> {
    let declared = header.length as u64;
    if consumed > declared {
        return Err(CodecError::LengthMismatch {
            code: header.code,
            declared,
            actual: consumed,
        });
    }
    Ok((declared - consumed) as usize)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// JPEG image with its own encoding tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefineBitsJpeg2 {
    pub character_id: u16,
    pub image_data: Vec<u8>,
}

impl DefineBitsJpeg2 {
    pub fn length(&self) -> Result<u32> {
        length_u32(2 + self.image_data.len())
    }

    fn read<R: Read>(header: &RecordHeader, reader: &mut SwfReader<R>) -> Result<Self> {
        let character_id = reader.read_ui16()?;
        let image_len = remaining(header, 2)?;
        // The source may hand out the blob in pieces; read_bytes accumulates.
        let image_data = reader.read_bytes(image_len)?;
        Ok(Self {
            character_id,
            image_data,
        })
    }

    fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        writer.write_ui16(self.character_id)?;
        writer.write_bytes(&self.image_data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptLimits {
    pub max_recursion_depth: u16,
    pub script_timeout_seconds: u16,
}

/// Movie-wide flags. Reserved bits are written as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileAttributes {
    pub use_direct_blit: bool,
    pub use_gpu: bool,
    pub has_metadata: bool,
    pub actionscript3: bool,
    pub use_network: bool,
}

impl FileAttributes {
    fn read<R: Read>(reader: &mut SwfReader<R>) -> Result<Self> {
        reader.read_ub(1)?;
        let use_direct_blit = reader.read_ub(1)? == 1;
        let use_gpu = reader.read_ub(1)? == 1;
        let has_metadata = reader.read_ub(1)? == 1;
        let actionscript3 = reader.read_ub(1)? == 1;
        reader.read_ub(2)?;
        let use_network = reader.read_ub(1)? == 1;
        reader.read_ub(24)?;
        Ok(Self {
            use_direct_blit,
            use_gpu,
            has_metadata,
            actionscript3,
            use_network,
        })
    }

    fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        writer.write_ub(1, 0)?;
        writer.write_ub(1, self.use_direct_blit as u32)?;
        writer.write_ub(1, self.use_gpu as u32)?;
        writer.write_ub(1, self.has_metadata as u32)?;
        writer.write_ub(1, self.actionscript3 as u32)?;
        writer.write_ub(2, 0)?;
        writer.write_ub(1, self.use_network as u32)?;
        writer.write_ub(24, 0)
    }
}

/// Links character ids to ActionScript class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolClass {
    pub symbols: Vec<(u16, String)>,
}

impl SymbolClass {
    pub fn length(&self) -> Result<u32> {
        let names: usize = self.symbols.iter().map(|(_, name)| 2 + name.len() + 1).sum();
        length_u32(2 + names)
    }

    fn read<R: Read>(reader: &mut SwfReader<R>) -> Result<Self> {
        let count = reader.read_ui16()?;
        let mut symbols = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = reader.read_ui16()?;
            let name = reader.read_string()?;
            symbols.push((id, name));
        }
        Ok(Self { symbols })
    }

    fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        let count = u16::try_from(self.symbols.len()).map_err(|_| CodecError::RangeOverflow {
            what: "symbol count",
            bits: usize::BITS - self.symbols.len().leading_zeros(),
            max: 16,
        })?;
        writer.write_ui16(count)?;
        for (id, name) in &self.symbols {
            writer.write_ui16(*id)?;
            writer.write_string(name)?;
        }
        Ok(())
    }
}

/// Nine-slice scaling grid for a sprite or button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefineScalingGrid {
    pub character_id: u16,
    pub splitter: Rect,
}

/// ABC bytecode block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoAbc {
    pub flags: u32,
    pub name: String,
    pub abc_data: Vec<u8>,
}

impl DoAbc {
    pub fn is_lazy(&self) -> bool {
        self.flags & DO_ABC_LAZY_INITIALIZE != 0
    }

    pub fn length(&self) -> Result<u32> {
        length_u32(4 + self.name.len() + 1 + self.abc_data.len())
    }

    fn read<R: Read>(header: &RecordHeader, reader: &mut SwfReader<R>) -> Result<Self> {
        let start = reader.position();
        let flags = reader.read_ui32()?;
        let name = reader.read_string()?;
        let abc_len = remaining(header, reader.position() - start)?;
        let abc_data = reader.read_bytes(abc_len)?;
        Ok(Self {
            flags,
            name,
            abc_data,
        })
    }

    fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        writer.write_ui32(self.flags)?;
        writer.write_string(&self.name)?;
        writer.write_bytes(&self.abc_data)
    }
}

/// Embedded arbitrary binary data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefineBinaryData {
    pub character_id: u16,
    /// Must be zero; kept so foreign files round-trip.
    pub reserved: u32,
    pub data: Vec<u8>,
}

impl DefineBinaryData {
    pub fn length(&self) -> Result<u32> {
        length_u32(6 + self.data.len())
    }

    fn read<R: Read>(header: &RecordHeader, reader: &mut SwfReader<R>) -> Result<Self> {
        let character_id = reader.read_ui16()?;
        let reserved = reader.read_ui32()?;
        let data = reader.read_bytes(remaining(header, 6)?)?;
        Ok(Self {
            character_id,
            reserved,
            data,
        })
    }

    fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        writer.write_ui16(self.character_id)?;
        writer.write_ui32(self.reserved)?;
        writer.write_bytes(&self.data)
    }
}

/// Record of a kind this crate does not model, kept byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnknownTag {
    pub code: u16,
    pub data: Vec<u8>,
}

/// A decoded record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    End,
    ShowFrame,
    SetBackgroundColor(Rgb),
    DefineBitsJpeg2(DefineBitsJpeg2),
    ScriptLimits(ScriptLimits),
    FileAttributes(FileAttributes),
    SymbolClass(SymbolClass),
    /// XML metadata.
    Metadata(String),
    DefineScalingGrid(DefineScalingGrid),
    DoAbc(DoAbc),
    DefineBinaryData(DefineBinaryData),
    Unknown(UnknownTag),
}

impl Tag {
    /// Kind of this tag, `None` for unknown records.
    pub fn kind(&self) -> Option<TagKind> {
        Some(match self {
            Self::End => TagKind::End,
            Self::ShowFrame => TagKind::ShowFrame,
            Self::SetBackgroundColor(_) => TagKind::SetBackgroundColor,
            Self::DefineBitsJpeg2(_) => TagKind::DefineBitsJpeg2,
            Self::ScriptLimits(_) => TagKind::ScriptLimits,
            Self::FileAttributes(_) => TagKind::FileAttributes,
            Self::SymbolClass(_) => TagKind::SymbolClass,
            Self::Metadata(_) => TagKind::Metadata,
            Self::DefineScalingGrid(_) => TagKind::DefineScalingGrid,
            Self::DoAbc(_) => TagKind::DoAbc,
            Self::DefineBinaryData(_) => TagKind::DefineBinaryData,
            Self::Unknown(_) => return None,
        })
    }

    /// Record code written in the header.
    pub fn code(&self) -> u16 {
        match self {
            Self::Unknown(tag) => tag.code,
            _ => self.kind().map_or(0, TagKind::code),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().map_or("Unknown", TagKind::name)
    }

    /// Whether [`length`](Self::length) is computed without serializing.
    ///
    /// Bit-packed payloads are measured by writing them out instead.
    pub fn is_length_known(&self) -> bool {
        !matches!(self, Self::DefineScalingGrid(_))
    }

    /// Payload length in bytes, excluding the record header.
    pub fn length(&self) -> Result<u32> {
        match self {
            Self::End | Self::ShowFrame => Ok(0),
            Self::SetBackgroundColor(_) => Ok(3),
            Self::DefineBitsJpeg2(tag) => tag.length(),
            Self::ScriptLimits(_) | Self::FileAttributes(_) => Ok(4),
            Self::SymbolClass(tag) => tag.length(),
            Self::Metadata(xml) => length_u32(xml.len() + 1),
            Self::DefineScalingGrid(_) => self.measure(),
            Self::DoAbc(tag) => tag.length(),
            Self::DefineBinaryData(tag) => tag.length(),
            Self::Unknown(tag) => length_u32(tag.data.len()),
        }
    }

    /// Serialize into a byte counter.
    fn measure(&self) -> Result<u32> {
        let mut counter = SwfWriter::new(io::sink());
        self.write(&mut counter)?;
        counter.align()?;
        length_u32(counter.position() as usize)
    }

    /// Decode the payload that follows `header`.
    ///
    /// Consumes exactly `header.length` bytes for blob-carrying kinds; fixed
    /// layouts consume their own size and leave any excess to the caller.
    /// Codes without a variant become [`Tag::Unknown`].
    pub fn read<R: Read>(header: &RecordHeader, reader: &mut SwfReader<R>) -> Result<Self> {
        let Some(kind) = TagKind::from_code(header.code) else {
            let data = reader.read_bytes(header.length as usize)?;
            return Ok(Self::Unknown(UnknownTag {
                code: header.code,
                data,
            }));
        };

        Ok(match kind {
            TagKind::End => Self::End,
            TagKind::ShowFrame => Self::ShowFrame,
            TagKind::SetBackgroundColor => Self::SetBackgroundColor(Rgb {
                r: reader.read_ui8()?,
                g: reader.read_ui8()?,
                b: reader.read_ui8()?,
            }),
            TagKind::DefineBitsJpeg2 => Self::DefineBitsJpeg2(DefineBitsJpeg2::read(header, reader)?),
            TagKind::ScriptLimits => Self::ScriptLimits(ScriptLimits {
                max_recursion_depth: reader.read_ui16()?,
                script_timeout_seconds: reader.read_ui16()?,
            }),
            TagKind::FileAttributes => Self::FileAttributes(FileAttributes::read(reader)?),
            TagKind::SymbolClass => Self::SymbolClass(SymbolClass::read(reader)?),
            TagKind::Metadata => Self::Metadata(reader.read_string()?),
            TagKind::DefineScalingGrid => Self::DefineScalingGrid(DefineScalingGrid {
                character_id: reader.read_ui16()?,
                splitter: Rect::read(reader)?,
            }),
            TagKind::DoAbc => Self::DoAbc(DoAbc::read(header, reader)?),
            TagKind::DefineBinaryData => {
                Self::DefineBinaryData(DefineBinaryData::read(header, reader)?)
            }
        })
    }

    /// Encode the payload only; the caller writes the record header first.
    pub fn write<W: Write>(&self, writer: &mut SwfWriter<W>) -> Result<()> {
        match self {
            Self::End | Self::ShowFrame => Ok(()),
            Self::SetBackgroundColor(rgb) => writer.write_bytes(&[rgb.r, rgb.g, rgb.b]),
            Self::DefineBitsJpeg2(tag) => tag.write(writer),
            Self::ScriptLimits(limits) => {
                writer.write_ui16(limits.max_recursion_depth)?;
                writer.write_ui16(limits.script_timeout_seconds)
            }
            Self::FileAttributes(attrs) => attrs.write(writer),
            Self::SymbolClass(tag) => tag.write(writer),
            Self::Metadata(xml) => writer.write_string(xml),
            Self::DefineScalingGrid(grid) => {
                writer.write_ui16(grid.character_id)?;
                grid.splitter.write(writer)
            }
            Self::DoAbc(tag) => tag.write(writer),
            Self::DefineBinaryData(tag) => tag.write(writer),
            Self::Unknown(tag) => writer.write_bytes(&tag.data),
        }
    }

    /// Call the visitor method matching this tag's kind.
    pub fn accept<'a, V: TagVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        match self {
            Self::End => visitor.visit_end(),
            Self::ShowFrame => visitor.visit_show_frame(),
            Self::SetBackgroundColor(rgb) => visitor.visit_set_background_color(rgb),
            Self::DefineBitsJpeg2(tag) => visitor.visit_define_bits_jpeg2(tag),
            Self::ScriptLimits(tag) => visitor.visit_script_limits(tag),
            Self::FileAttributes(tag) => visitor.visit_file_attributes(tag),
            Self::SymbolClass(tag) => visitor.visit_symbol_class(tag),
            Self::Metadata(xml) => visitor.visit_metadata(xml),
            Self::DefineScalingGrid(tag) => visitor.visit_define_scaling_grid(tag),
            Self::DoAbc(tag) => visitor.visit_do_abc(tag),
            Self::DefineBinaryData(tag) => visitor.visit_define_binary_data(tag),
            Self::Unknown(tag) => visitor.visit_unknown(tag),
        }
    }
}
