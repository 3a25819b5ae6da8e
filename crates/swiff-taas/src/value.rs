//! Taas values: typed constants and computed expressions.
//!
//! Every value answers four questions: its static type ([`TaasValue::ty`]),
//! an independent copy of itself ([`TaasValue::dup`]), a view of itself at
//! another type ([`TaasValue::widen`]) and the ops that push it onto the
//! operand stack ([`TaasValue::emit_ops`]).
//!
//! `widen` is the only place conversions are decided. Constants never
//! convert: a literal of the wrong type is an error, not a coercion. Computed
//! values convert by wrapping themselves in an explicit [`TaasValue::Convert`].

use crate::bytecode::{AbcEnvironment, BinaryOp, Bytecode, Conversion, MethodBody, Op, UnaryOp};
use crate::error::{Result, TaasError};
use crate::types::TaasType;

/// A literal with a statically known value.
#[derive(Clone, Debug, PartialEq)]
pub enum TaasConstant {
    String(String),
    Int(i32),
    UInt(u32),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

impl TaasConstant {
    pub fn ty(&self) -> TaasType {
        match self {
            Self::String(_) => TaasType::String,
            Self::Int(_) => TaasType::Int,
            Self::UInt(_) => TaasType::UInt,
            Self::Number(_) => TaasType::Number,
            Self::Boolean(_) => TaasType::Boolean,
            Self::Null => TaasType::Null,
            Self::Undefined => TaasType::Void,
        }
    }

    pub fn dup(&self) -> Self {
        self.clone()
    }

    /// Identity for the constant's own type, [`TaasError::TypeMismatch`] otherwise.
    pub fn widen(&self, to: TaasType) -> Result<Self> {
        let from = self.ty();
        if from != to {
            return Err(TaasError::TypeMismatch { from, to });
        }
        Ok(self.dup())
    }

    fn emit_into(&self, env: &mut AbcEnvironment, out: &mut Vec<Op>) {
        let op = match self {
            Self::String(value) => Op::PushString(env.pool.intern_string(value)),
            Self::Int(value) => {
                if let Ok(byte) = i8::try_from(*value) {
                    Op::PushByte(byte)
                } else if let Ok(short) = i16::try_from(*value) {
                    Op::PushShort(short)
                } else {
                    Op::PushInt(env.pool.intern_int(*value))
                }
            }
            Self::UInt(value) => Op::PushUInt(env.pool.intern_uint(*value)),
            Self::Number(value) if value.is_nan() => Op::PushNaN,
            Self::Number(value) => Op::PushDouble(env.pool.intern_double(*value)),
            Self::Boolean(true) => Op::PushTrue,
            Self::Boolean(false) => Op::PushFalse,
            Self::Null => Op::PushNull,
            Self::Undefined => Op::PushUndefined,
        };
        out.push(op);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TaasValue {
    Constant(TaasConstant),
    /// Read of a local register.
    Local { index: u32, ty: TaasType },
    Unary {
        op: UnaryOp,
        operand: Box<TaasValue>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<TaasValue>,
        rhs: Box<TaasValue>,
        /// Result type, fixed at construction from the operand types.
        ty: TaasType,
    },
    Convert {
        value: Box<TaasValue>,
        to: Conversion,
    },
}

impl From<TaasConstant> for TaasValue {
    fn from(constant: TaasConstant) -> Self {
        Self::Constant(constant)
    }
}

impl TaasValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(TaasConstant::String(value.into()))
    }

    pub fn int(value: i32) -> Self {
        Self::Constant(TaasConstant::Int(value))
    }

    pub fn uint(value: u32) -> Self {
        Self::Constant(TaasConstant::UInt(value))
    }

    pub fn number(value: f64) -> Self {
        Self::Constant(TaasConstant::Number(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Constant(TaasConstant::Boolean(value))
    }

    pub fn local(index: u32, ty: TaasType) -> Self {
        Self::Local { index, ty }
    }

    pub fn unary(op: UnaryOp, operand: TaasValue) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: TaasValue, rhs: TaasValue) -> Self {
        let ty = binary_type(op, lhs.ty(), rhs.ty());
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            ty,
        }
    }

    pub fn convert(value: TaasValue, to: Conversion) -> Self {
        Self::Convert {
            value: Box::new(value),
            to,
        }
    }

    pub fn as_constant(&self) -> Option<&TaasConstant> {
        match self {
            Self::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    /// Static type, without walking subexpressions.
    pub fn ty(&self) -> TaasType {
        match self {
            Self::Constant(constant) => constant.ty(),
            Self::Local { ty, .. } | Self::Binary { ty, .. } => *ty,
            Self::Unary { op, .. } => match op {
                UnaryOp::Negate | UnaryOp::Increment | UnaryOp::Decrement => TaasType::Number,
                UnaryOp::TypeOf => TaasType::String,
                UnaryOp::Not => TaasType::Boolean,
                UnaryOp::BitNot => TaasType::Int,
            },
            Self::Convert { to, .. } => to.target(),
        }
    }

    /// Independent copy with the same type and payload.
    pub fn dup(&self) -> Self {
        self.clone()
    }

    /// This value seen at type `to`.
    ///
    /// Same type: a duplicate. Constants of another type fail. Computed values
    /// are wrapped in the conversion for `to`, which fails for `null` and
    /// `void` since nothing converts to those.
    pub fn widen(&self, to: TaasType) -> Result<Self> {
        match self {
            Self::Constant(constant) => constant.widen(to).map(Self::Constant),
            _ if self.ty() == to => Ok(self.dup()),
            _ => match to.conversion_op() {
                Some(conversion) => Ok(Self::convert(self.dup(), conversion)),
                None => Err(TaasError::TypeMismatch {
                    from: self.ty(),
                    to,
                }),
            },
        }
    }

    /// Whether evaluating this value reads local `index`.
    pub fn reads_local(&self, index: u32) -> bool {
        match self {
            Self::Constant(_) => false,
            Self::Local { index: i, .. } => *i == index,
            Self::Unary { operand, .. } => operand.reads_local(index),
            Self::Binary { lhs, rhs, .. } => lhs.reads_local(index) || rhs.reads_local(index),
            Self::Convert { value, .. } => value.reads_local(index),
        }
    }

    /// Append the ops leaving this value on top of the stack, operands first.
    ///
    /// Literals are interned into `env`'s pool. Nothing is appended to `code`
    /// if the value cannot be emitted.
    pub fn emit_ops(
        &self,
        env: &mut AbcEnvironment,
        body: &MethodBody,
        code: &mut Bytecode,
    ) -> Result<()> {
        let mut ops = Vec::new();
        self.emit_into(env, body, &mut ops)?;
        code.extend(ops);
        Ok(())
    }

    fn emit_into(&self, env: &mut AbcEnvironment, body: &MethodBody, out: &mut Vec<Op>) -> Result<()> {
        match self {
            Self::Constant(constant) => constant.emit_into(env, out),
            Self::Local { index, .. } => {
                check_local(*index, body)?;
                out.push(Op::GetLocal(*index));
            }
            Self::Unary { op, operand } => {
                operand.emit_into(env, body, out)?;
                out.push(Op::Unary(*op));
            }
            Self::Binary { op, lhs, rhs, .. } => {
                lhs.emit_into(env, body, out)?;
                rhs.emit_into(env, body, out)?;
                out.push(Op::Binary(*op));
            }
            Self::Convert { value, to } => {
                value.emit_into(env, body, out)?;
                out.push(Op::Convert(*to));
            }
        }
        Ok(())
    }
}

/// Only `add` depends on its operands.
fn binary_type(op: BinaryOp, lhs: TaasType, rhs: TaasType) -> TaasType {
    match op {
        BinaryOp::Add => {
            if lhs == TaasType::String || rhs == TaasType::String {
                TaasType::String
            } else if lhs.is_numeric() && rhs.is_numeric() {
                TaasType::Number
            } else {
                TaasType::Any
            }
        }
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
            TaasType::Number
        }
        BinaryOp::LShift
        | BinaryOp::RShift
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor => TaasType::Int,
        BinaryOp::URShift => TaasType::UInt,
        _ => TaasType::Boolean,
    }
}

pub(crate) fn check_local(index: u32, body: &MethodBody) -> Result<()> {
    if index >= body.local_count {
        return Err(TaasError::LocalOutOfRange {
            index,
            local_count: body.local_count,
        });
    }
    Ok(())
}
