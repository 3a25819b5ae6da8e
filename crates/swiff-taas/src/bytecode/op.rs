//! Straight-line AVM2 operations and their byte encoding.
//!
//! Operands are variable-length `u30` integers (7 bits per byte, low bits
//! first, at most 5 bytes) except `pushbyte` (one raw byte) and the branch
//! offsets (`s24`, three little-endian bytes).

use crate::error::{Result, TaasError};
use crate::types::TaasType;

/// Operations taking one operand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    Negate,
    Increment,
    Decrement,
    TypeOf,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn opcode(self) -> u8 {
        match self {
            Self::Negate => 0x90,
            Self::Increment => 0x91,
            Self::Decrement => 0x93,
            Self::TypeOf => 0x95,
            Self::Not => 0x96,
            Self::BitNot => 0x97,
        }
    }

    fn from_opcode(opcode: u8) -> Option<Self> {
        Some(match opcode {
            0x90 => Self::Negate,
            0x91 => Self::Increment,
            0x93 => Self::Decrement,
            0x95 => Self::TypeOf,
            0x96 => Self::Not,
            0x97 => Self::BitNot,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::TypeOf => "typeof",
            Self::Not => "not",
            Self::BitNot => "bitnot",
        }
    }
}

/// Operations taking two operands, `lhs` pushed first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LShift,
    RShift,
    URShift,
    BitAnd,
    BitOr,
    BitXor,
    Equals,
    StrictEquals,
    LessThan,
    LessEquals,
    GreaterThan,
    GreaterEquals,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 17] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::LShift,
        Self::RShift,
        Self::URShift,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Equals,
        Self::StrictEquals,
        Self::LessThan,
        Self::LessEquals,
        Self::GreaterThan,
        Self::GreaterEquals,
    ];

    /// Opcodes are contiguous from `add` (0xa0) to `greaterequals` (0xb0).
    pub fn opcode(self) -> u8 {
        0xa0 + self as u8
    }

    fn from_opcode(opcode: u8) -> Option<Self> {
        let index = opcode.checked_sub(0xa0)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::LShift => "lshift",
            Self::RShift => "rshift",
            Self::URShift => "urshift",
            Self::BitAnd => "bitand",
            Self::BitOr => "bitor",
            Self::BitXor => "bitxor",
            Self::Equals => "equals",
            Self::StrictEquals => "strictequals",
            Self::LessThan => "lessthan",
            Self::LessEquals => "lessequals",
            Self::GreaterThan => "greaterthan",
            Self::GreaterEquals => "greaterequals",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::StrictEquals
                | Self::LessThan
                | Self::LessEquals
                | Self::GreaterThan
                | Self::GreaterEquals
        )
    }
}

/// Explicit conversions of the top of stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Conversion {
    /// `convert_s`
    ToString,
    /// `convert_i`
    ToInt,
    /// `convert_u`
    ToUInt,
    /// `convert_d`
    ToNumber,
    /// `convert_b`
    ToBoolean,
    /// `convert_o`
    ToObject,
    /// `coerce_a`
    ToAny,
    /// `coerce_s`: like `convert_s`, but `null` and `undefined` become `null`.
    CoerceString,
}

impl Conversion {
    pub fn opcode(self) -> u8 {
        match self {
            Self::ToString => 0x70,
            Self::ToInt => 0x73,
            Self::ToUInt => 0x74,
            Self::ToNumber => 0x75,
            Self::ToBoolean => 0x76,
            Self::ToObject => 0x77,
            Self::ToAny => 0x82,
            Self::CoerceString => 0x85,
        }
    }

    fn from_opcode(opcode: u8) -> Option<Self> {
        Some(match opcode {
            0x70 => Self::ToString,
            0x73 => Self::ToInt,
            0x74 => Self::ToUInt,
            0x75 => Self::ToNumber,
            0x76 => Self::ToBoolean,
            0x77 => Self::ToObject,
            0x82 => Self::ToAny,
            0x85 => Self::CoerceString,
            _ => return None,
        })
    }

    /// Static type of the converted value.
    pub fn target(self) -> TaasType {
        match self {
            Self::ToString | Self::CoerceString => TaasType::String,
            Self::ToInt => TaasType::Int,
            Self::ToUInt => TaasType::UInt,
            Self::ToNumber => TaasType::Number,
            Self::ToBoolean => TaasType::Boolean,
            Self::ToObject => TaasType::Object,
            Self::ToAny => TaasType::Any,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ToString => "convert_s",
            Self::ToInt => "convert_i",
            Self::ToUInt => "convert_u",
            Self::ToNumber => "convert_d",
            Self::ToBoolean => "convert_b",
            Self::ToObject => "convert_o",
            Self::ToAny => "coerce_a",
            Self::CoerceString => "coerce_s",
        }
    }
}

/// One decoded operation. Pool operands are constant pool indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    Nop,
    Label,
    Jump(i32),
    IfTrue(i32),
    IfFalse(i32),
    PushNull,
    PushUndefined,
    PushByte(i8),
    PushShort(i16),
    PushTrue,
    PushFalse,
    PushNaN,
    Pop,
    Dup,
    Swap,
    PushString(u32),
    PushInt(u32),
    PushUInt(u32),
    PushDouble(u32),
    ReturnVoid,
    ReturnValue,
    GetLocal(u32),
    SetLocal(u32),
    Convert(Conversion),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

const OP_NOP: u8 = 0x02;
const OP_LABEL: u8 = 0x09;
const OP_JUMP: u8 = 0x10;
const OP_IFTRUE: u8 = 0x11;
const OP_IFFALSE: u8 = 0x12;
const OP_PUSHNULL: u8 = 0x20;
const OP_PUSHUNDEFINED: u8 = 0x21;
const OP_PUSHBYTE: u8 = 0x24;
const OP_PUSHSHORT: u8 = 0x25;
const OP_PUSHTRUE: u8 = 0x26;
const OP_PUSHFALSE: u8 = 0x27;
const OP_PUSHNAN: u8 = 0x28;
const OP_POP: u8 = 0x29;
const OP_DUP: u8 = 0x2a;
const OP_SWAP: u8 = 0x2b;
const OP_PUSHSTRING: u8 = 0x2c;
const OP_PUSHINT: u8 = 0x2d;
const OP_PUSHUINT: u8 = 0x2e;
const OP_PUSHDOUBLE: u8 = 0x2f;
const OP_RETURNVOID: u8 = 0x47;
const OP_RETURNVALUE: u8 = 0x48;
const OP_GETLOCAL: u8 = 0x62;
const OP_SETLOCAL: u8 = 0x63;
const OP_GETLOCAL_0: u8 = 0xd0;
const OP_SETLOCAL_0: u8 = 0xd4;

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Label => "label",
            Self::Jump(_) => "jump",
            Self::IfTrue(_) => "iftrue",
            Self::IfFalse(_) => "iffalse",
            Self::PushNull => "pushnull",
            Self::PushUndefined => "pushundefined",
            Self::PushByte(_) => "pushbyte",
            Self::PushShort(_) => "pushshort",
            Self::PushTrue => "pushtrue",
            Self::PushFalse => "pushfalse",
            Self::PushNaN => "pushnan",
            Self::Pop => "pop",
            Self::Dup => "dup",
            Self::Swap => "swap",
            Self::PushString(_) => "pushstring",
            Self::PushInt(_) => "pushint",
            Self::PushUInt(_) => "pushuint",
            Self::PushDouble(_) => "pushdouble",
            Self::ReturnVoid => "returnvoid",
            Self::ReturnValue => "returnvalue",
            Self::GetLocal(_) => "getlocal",
            Self::SetLocal(_) => "setlocal",
            Self::Convert(conversion) => conversion.name(),
            Self::Unary(op) => op.name(),
            Self::Binary(op) => op.name(),
        }
    }

    /// Values popped and pushed.
    pub fn stack_effect(self) -> (u32, u32) {
        match self {
            Self::Nop | Self::Label | Self::Jump(_) | Self::ReturnVoid => (0, 0),
            Self::IfTrue(_) | Self::IfFalse(_) | Self::Pop | Self::ReturnValue => (1, 0),
            Self::SetLocal(_) => (1, 0),
            Self::PushNull
            | Self::PushUndefined
            | Self::PushByte(_)
            | Self::PushShort(_)
            | Self::PushTrue
            | Self::PushFalse
            | Self::PushNaN
            | Self::PushString(_)
            | Self::PushInt(_)
            | Self::PushUInt(_)
            | Self::PushDouble(_)
            | Self::GetLocal(_) => (0, 1),
            Self::Dup => (1, 2),
            Self::Swap => (2, 2),
            Self::Convert(_) | Self::Unary(_) => (1, 1),
            Self::Binary(_) => (2, 1),
        }
    }

    /// Whether control may leave the straight-line sequence here.
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Jump(_) | Self::IfTrue(_) | Self::IfFalse(_))
    }

    /// Append the encoding. Locals 0..=3 use the one-byte short forms.
    pub fn encode(self, out: &mut Vec<u8>) {
        match self {
            Self::Nop => out.push(OP_NOP),
            Self::Label => out.push(OP_LABEL),
            Self::Jump(offset) => encode_branch(out, OP_JUMP, offset),
            Self::IfTrue(offset) => encode_branch(out, OP_IFTRUE, offset),
            Self::IfFalse(offset) => encode_branch(out, OP_IFFALSE, offset),
            Self::PushNull => out.push(OP_PUSHNULL),
            Self::PushUndefined => out.push(OP_PUSHUNDEFINED),
            Self::PushByte(value) => out.extend_from_slice(&[OP_PUSHBYTE, value as u8]),
            Self::PushShort(value) => {
                out.push(OP_PUSHSHORT);
                write_u30(out, value as u16 as u32);
            }
            Self::PushTrue => out.push(OP_PUSHTRUE),
            Self::PushFalse => out.push(OP_PUSHFALSE),
            Self::PushNaN => out.push(OP_PUSHNAN),
            Self::Pop => out.push(OP_POP),
            Self::Dup => out.push(OP_DUP),
            Self::Swap => out.push(OP_SWAP),
            Self::PushString(index) => encode_indexed(out, OP_PUSHSTRING, index),
            Self::PushInt(index) => encode_indexed(out, OP_PUSHINT, index),
            Self::PushUInt(index) => encode_indexed(out, OP_PUSHUINT, index),
            Self::PushDouble(index) => encode_indexed(out, OP_PUSHDOUBLE, index),
            Self::ReturnVoid => out.push(OP_RETURNVOID),
            Self::ReturnValue => out.push(OP_RETURNVALUE),
            Self::GetLocal(index @ 0..=3) => out.push(OP_GETLOCAL_0 + index as u8),
            Self::GetLocal(index) => encode_indexed(out, OP_GETLOCAL, index),
            Self::SetLocal(index @ 0..=3) => out.push(OP_SETLOCAL_0 + index as u8),
            Self::SetLocal(index) => encode_indexed(out, OP_SETLOCAL, index),
            Self::Convert(conversion) => out.push(conversion.opcode()),
            Self::Unary(op) => out.push(op.opcode()),
            Self::Binary(op) => out.push(op.opcode()),
        }
    }

    /// Decode one operation at `*pos`, advancing past it.
    pub fn decode(code: &[u8], pos: &mut usize) -> Result<Self> {
        let offset = *pos;
        let opcode = *code.get(offset).ok_or(TaasError::Truncated { offset })?;
        *pos += 1;

        let op = match opcode {
            OP_NOP => Self::Nop,
            OP_LABEL => Self::Label,
            OP_JUMP => Self::Jump(read_s24(code, pos)?),
            OP_IFTRUE => Self::IfTrue(read_s24(code, pos)?),
            OP_IFFALSE => Self::IfFalse(read_s24(code, pos)?),
            OP_PUSHNULL => Self::PushNull,
            OP_PUSHUNDEFINED => Self::PushUndefined,
            OP_PUSHBYTE => {
                let byte = *code.get(*pos).ok_or(TaasError::Truncated { offset: *pos })?;
                *pos += 1;
                Self::PushByte(byte as i8)
            }
            OP_PUSHSHORT => Self::PushShort(read_u30(code, pos)? as u16 as i16),
            OP_PUSHTRUE => Self::PushTrue,
            OP_PUSHFALSE => Self::PushFalse,
            OP_PUSHNAN => Self::PushNaN,
            OP_POP => Self::Pop,
            OP_DUP => Self::Dup,
            OP_SWAP => Self::Swap,
            OP_PUSHSTRING => Self::PushString(read_u30(code, pos)?),
            OP_PUSHINT => Self::PushInt(read_u30(code, pos)?),
            OP_PUSHUINT => Self::PushUInt(read_u30(code, pos)?),
            OP_PUSHDOUBLE => Self::PushDouble(read_u30(code, pos)?),
            OP_RETURNVOID => Self::ReturnVoid,
            OP_RETURNVALUE => Self::ReturnValue,
            OP_GETLOCAL => Self::GetLocal(read_u30(code, pos)?),
            OP_SETLOCAL => Self::SetLocal(read_u30(code, pos)?),
            0xd0..=0xd3 => Self::GetLocal((opcode - OP_GETLOCAL_0) as u32),
            0xd4..=0xd7 => Self::SetLocal((opcode - OP_SETLOCAL_0) as u32),
            _ => {
                if let Some(conversion) = Conversion::from_opcode(opcode) {
                    Self::Convert(conversion)
                } else if let Some(op) = UnaryOp::from_opcode(opcode) {
                    Self::Unary(op)
                } else if let Some(op) = BinaryOp::from_opcode(opcode) {
                    Self::Binary(op)
                } else {
                    return Err(TaasError::UnknownOpcode { opcode, offset });
                }
            }
        };
        Ok(op)
    }
}

fn encode_indexed(out: &mut Vec<u8>, opcode: u8, index: u32) {
    out.push(opcode);
    write_u30(out, index);
}

fn encode_branch(out: &mut Vec<u8>, opcode: u8, offset: i32) {
    out.push(opcode);
    out.extend_from_slice(&offset.to_le_bytes()[..3]);
}

/// Append a variable-length integer, 7 bits per byte, low bits first.
pub fn write_u30(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read a variable-length integer of at most 5 bytes.
pub fn read_u30(code: &[u8], pos: &mut usize) -> Result<u32> {
    let mut value: u64 = 0;
    for shift in (0..35).step_by(7) {
        let byte = *code.get(*pos).ok_or(TaasError::Truncated { offset: *pos })?;
        *pos += 1;
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            break;
        }
    }
    Ok(value as u32)
}

fn read_s24(code: &[u8], pos: &mut usize) -> Result<i32> {
    let bytes = code
        .get(*pos..*pos + 3)
        .ok_or(TaasError::Truncated { offset: *pos })?;
    *pos += 3;
    let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
    // sign-extend from 24 bits
    Ok((raw << 8) >> 8)
}

/// An instruction list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bytecode {
    ops: Vec<Op>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.ops.iter()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ops.len() * 2);
        for op in &self.ops {
            op.encode(&mut out);
        }
        out
    }

    pub fn decode(code: &[u8]) -> Result<Self> {
        let mut ops = Vec::new();
        let mut pos = 0;
        while pos < code.len() {
            ops.push(Op::decode(code, &mut pos)?);
        }
        Ok(Self { ops })
    }

    /// Deepest stack reached when running the ops in sequence from an empty stack.
    pub fn max_stack(&self) -> u32 {
        let mut depth: u32 = 0;
        let mut max = 0;
        for op in &self.ops {
            let (pops, pushes) = op.stack_effect();
            depth = depth.saturating_sub(pops) + pushes;
            max = max.max(depth);
        }
        max
    }
}

impl From<Vec<Op>> for Bytecode {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

impl<'a> IntoIterator for &'a Bytecode {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for Bytecode {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
