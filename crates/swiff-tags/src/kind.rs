//! Record codes of the supported tag kinds.

/// Tag kinds with a dedicated [`Tag`](crate::Tag) variant.
///
/// Discriminants are the record codes used on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
pub enum TagKind {
    End = 0,
    ShowFrame = 1,
    SetBackgroundColor = 9,
    DefineBitsJpeg2 = 21,
    ScriptLimits = 65,
    FileAttributes = 69,
    SymbolClass = 76,
    Metadata = 77,
    DefineScalingGrid = 78,
    DoAbc = 82,
    DefineBinaryData = 87,
}

/// Codes that conforming writers always frame with a long record header.
const LONG_HEADER_CODES: [u16; 7] = [
    6,  // DefineBits
    19, // SoundStreamBlock
    20, // DefineBitsLossless
    21, // DefineBitsJPEG2
    35, // DefineBitsJPEG3
    36, // DefineBitsLossless2
    90, // DefineBitsJPEG4
];

impl TagKind {
    pub const ALL: [TagKind; 11] = [
        Self::End,
        Self::ShowFrame,
        Self::SetBackgroundColor,
        Self::DefineBitsJpeg2,
        Self::ScriptLimits,
        Self::FileAttributes,
        Self::SymbolClass,
        Self::Metadata,
        Self::DefineScalingGrid,
        Self::DoAbc,
        Self::DefineBinaryData,
    ];

    /// Convert from a record code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::End),
            1 => Some(Self::ShowFrame),
            9 => Some(Self::SetBackgroundColor),
            21 => Some(Self::DefineBitsJpeg2),
            65 => Some(Self::ScriptLimits),
            69 => Some(Self::FileAttributes),
            76 => Some(Self::SymbolClass),
            77 => Some(Self::Metadata),
            78 => Some(Self::DefineScalingGrid),
            82 => Some(Self::DoAbc),
            87 => Some(Self::DefineBinaryData),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    /// Name as used in the SWF file format documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::ShowFrame => "ShowFrame",
            Self::SetBackgroundColor => "SetBackgroundColor",
            Self::DefineBitsJpeg2 => "DefineBitsJPEG2",
            Self::ScriptLimits => "ScriptLimits",
            Self::FileAttributes => "FileAttributes",
            Self::SymbolClass => "SymbolClass",
            Self::Metadata => "Metadata",
            Self::DefineScalingGrid => "DefineScalingGrid",
            Self::DoAbc => "DoABC",
            Self::DefineBinaryData => "DefineBinaryData",
        }
    }

    /// Whether the payload starts with a UI16 character id.
    pub fn has_character_id(self) -> bool {
        matches!(
            self,
            Self::DefineBitsJpeg2 | Self::DefineScalingGrid | Self::DefineBinaryData
        )
    }
}

/// Whether records with `code` are framed with a long header regardless of length.
pub fn requires_long_header(code: u16) -> bool {
    LONG_HEADER_CODES.contains(&code)
}
