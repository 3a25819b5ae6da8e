//! The type lattice: a flat, closed set of static types.
//!
//! There is no subtyping here. Two types are the same iff they are equal;
//! anything else needs an explicit conversion (see [`TaasType::conversion_op`]).

use std::fmt;

use crate::bytecode::Conversion;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TaasType {
    /// The untyped `*`.
    Any,
    /// Type of `undefined`.
    Void,
    Null,
    Boolean,
    Int,
    UInt,
    Number,
    String,
    Object,
}

impl TaasType {
    pub const ALL: [TaasType; 9] = [
        Self::Any,
        Self::Void,
        Self::Null,
        Self::Boolean,
        Self::Int,
        Self::UInt,
        Self::Number,
        Self::String,
        Self::Object,
    ];

    /// Name as written in ActionScript 3 type annotations.
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "*",
            Self::Void => "void",
            Self::Null => "null",
            Self::Boolean => "Boolean",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Number => "Number",
            Self::String => "String",
            Self::Object => "Object",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Number)
    }

    /// The operation converting any value to this type.
    ///
    /// `null` and `void` have none: nothing converts *to* them.
    pub fn conversion_op(self) -> Option<Conversion> {
        match self {
            Self::Any => Some(Conversion::ToAny),
            Self::Void | Self::Null => None,
            Self::Boolean => Some(Conversion::ToBoolean),
            Self::Int => Some(Conversion::ToInt),
            Self::UInt => Some(Conversion::ToUInt),
            Self::Number => Some(Conversion::ToNumber),
            Self::String => Some(Conversion::ToString),
            Self::Object => Some(Conversion::ToObject),
        }
    }
}

impl fmt::Display for TaasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
