//! Constant folding.
//!
//! Folding is bottom-up and never changes a value's static type: an
//! expression whose folded result would have a different [`TaasType`] than
//! the expression itself is left alone. Conversions follow the ECMAScript
//! abstract operations (ToNumber, ToString, ToInt32, ToUint32, ToBoolean) but
//! only fold where the result is exact; string-to-number only accepts plain
//! decimal literals and number-to-string only integral values.

use tracing::trace;

use crate::bytecode::{BinaryOp, Conversion, UnaryOp};
use crate::lift::{LiftedBlock, Statement};
use crate::types::TaasType;
use crate::value::{TaasConstant, TaasValue};

/// Largest magnitude printed without an exponent, and exact in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn to_number(constant: &TaasConstant) -> Option<f64> {
    Some(match constant {
        TaasConstant::Int(v) => *v as f64,
        TaasConstant::UInt(v) => *v as f64,
        TaasConstant::Number(v) => *v,
        TaasConstant::Boolean(b) => *b as u8 as f64,
        TaasConstant::Null => 0.0,
        TaasConstant::Undefined => f64::NAN,
        TaasConstant::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            if !trimmed
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
            {
                return None;
            }
            trimmed.parse().ok()?
        }
    })
}

fn number_to_string(v: f64) -> Option<String> {
    if v.is_nan() {
        return Some("NaN".to_owned());
    }
    if v.is_infinite() {
        return Some(if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned());
    }
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        // also maps -0 to "0"
        return Some((v as i64).to_string());
    }
    None
}

fn to_string(constant: &TaasConstant) -> Option<String> {
    Some(match constant {
        TaasConstant::String(s) => s.clone(),
        TaasConstant::Int(v) => v.to_string(),
        TaasConstant::UInt(v) => v.to_string(),
        TaasConstant::Number(v) => return number_to_string(*v),
        TaasConstant::Boolean(b) => b.to_string(),
        TaasConstant::Null => "null".to_owned(),
        TaasConstant::Undefined => "undefined".to_owned(),
    })
}

fn to_boolean(constant: &TaasConstant) -> bool {
    match constant {
        TaasConstant::String(s) => !s.is_empty(),
        TaasConstant::Int(v) => *v != 0,
        TaasConstant::UInt(v) => *v != 0,
        TaasConstant::Number(v) => *v != 0.0 && !v.is_nan(),
        TaasConstant::Boolean(b) => *b,
        TaasConstant::Null | TaasConstant::Undefined => false,
    }
}

fn to_uint32(v: f64) -> u32 {
    if !v.is_finite() {
        return 0;
    }
    v.trunc().rem_euclid(4_294_967_296.0) as u32
}

fn to_int32(v: f64) -> i32 {
    to_uint32(v) as i32
}

fn type_of(constant: &TaasConstant) -> &'static str {
    match constant {
        TaasConstant::String(_) => "string",
        TaasConstant::Int(_) | TaasConstant::UInt(_) | TaasConstant::Number(_) => "number",
        TaasConstant::Boolean(_) => "boolean",
        TaasConstant::Null => "object",
        TaasConstant::Undefined => "undefined",
    }
}

fn fold_unary(op: UnaryOp, operand: &TaasConstant) -> Option<TaasConstant> {
    Some(match op {
        UnaryOp::Negate => TaasConstant::Number(-to_number(operand)?),
        UnaryOp::Increment => TaasConstant::Number(to_number(operand)? + 1.0),
        UnaryOp::Decrement => TaasConstant::Number(to_number(operand)? - 1.0),
        UnaryOp::TypeOf => TaasConstant::String(type_of(operand).to_owned()),
        UnaryOp::Not => TaasConstant::Boolean(!to_boolean(operand)),
        UnaryOp::BitNot => TaasConstant::Int(!to_int32(to_number(operand)?)),
    })
}

/// Equality between constants of the same kind, or between numbers.
fn fold_equality(op: BinaryOp, lhs: &TaasConstant, rhs: &TaasConstant) -> Option<bool> {
    use TaasConstant as C;

    if lhs.ty().is_numeric() && rhs.ty().is_numeric() {
        return Some(to_number(lhs)? == to_number(rhs)?);
    }
    match (lhs, rhs) {
        (C::String(a), C::String(b)) => Some(a == b),
        (C::Boolean(a), C::Boolean(b)) => Some(a == b),
        (C::Null, C::Null) | (C::Undefined, C::Undefined) => Some(true),
        (C::Null, C::Undefined) | (C::Undefined, C::Null) => Some(op == BinaryOp::Equals),
        _ => None,
    }
}

fn fold_binary(
    op: BinaryOp,
    ty: TaasType,
    lhs: &TaasConstant,
    rhs: &TaasConstant,
) -> Option<TaasConstant> {
    let numbers = || Some((to_number(lhs)?, to_number(rhs)?));
    let shift = || Some((to_number(lhs)?, to_uint32(to_number(rhs)?) & 31));

    Some(match op {
        BinaryOp::Add => match ty {
            TaasType::String => {
                let mut joined = to_string(lhs)?;
                joined.push_str(&to_string(rhs)?);
                TaasConstant::String(joined)
            }
            TaasType::Number => {
                let (a, b) = numbers()?;
                TaasConstant::Number(a + b)
            }
            _ => return None,
        },
        BinaryOp::Subtract => numbers().map(|(a, b)| TaasConstant::Number(a - b))?,
        BinaryOp::Multiply => numbers().map(|(a, b)| TaasConstant::Number(a * b))?,
        BinaryOp::Divide => numbers().map(|(a, b)| TaasConstant::Number(a / b))?,
        BinaryOp::Modulo => numbers().map(|(a, b)| TaasConstant::Number(a % b))?,
        BinaryOp::LShift => {
            let (a, s) = shift()?;
            TaasConstant::Int(to_int32(a).wrapping_shl(s))
        }
        BinaryOp::RShift => {
            let (a, s) = shift()?;
            TaasConstant::Int(to_int32(a) >> s)
        }
        BinaryOp::URShift => {
            let (a, s) = shift()?;
            TaasConstant::UInt(to_uint32(a) >> s)
        }
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            let (a, b) = numbers()?;
            let (a, b) = (to_int32(a), to_int32(b));
            TaasConstant::Int(match op {
                BinaryOp::BitAnd => a & b,
                BinaryOp::BitOr => a | b,
                _ => a ^ b,
            })
        }
        BinaryOp::Equals | BinaryOp::StrictEquals => {
            TaasConstant::Boolean(fold_equality(op, lhs, rhs)?)
        }
        BinaryOp::LessThan
        | BinaryOp::LessEquals
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterEquals => {
            // Relational folding only between numbers: string ordering is by
            // UTF-16 code unit, which `str` ordering does not match.
            if !(lhs.ty().is_numeric() && rhs.ty().is_numeric()) {
                return None;
            }
            let (a, b) = numbers()?;
            TaasConstant::Boolean(match op {
                BinaryOp::LessThan => a < b,
                BinaryOp::LessEquals => a <= b,
                BinaryOp::GreaterThan => a > b,
                _ => a >= b,
            })
        }
    })
}

fn fold_conversion(to: Conversion, constant: &TaasConstant) -> Option<TaasConstant> {
    Some(match to {
        Conversion::ToString => TaasConstant::String(to_string(constant)?),
        // coerce_s keeps null and undefined as null, which is not a string constant.
        Conversion::CoerceString => match constant {
            TaasConstant::Null | TaasConstant::Undefined => return None,
            other => TaasConstant::String(to_string(other)?),
        },
        Conversion::ToNumber => TaasConstant::Number(to_number(constant)?),
        Conversion::ToInt => TaasConstant::Int(to_int32(to_number(constant)?)),
        Conversion::ToUInt => TaasConstant::UInt(to_uint32(to_number(constant)?)),
        Conversion::ToBoolean => TaasConstant::Boolean(to_boolean(constant)),
        Conversion::ToObject | Conversion::ToAny => return None,
    })
}

/// Whether applying `to` to a value of type `ty` returns it unchanged.
///
/// `convert_s` is excluded: a `String`-typed value may be `null`, which it
/// turns into `"null"`. `convert_o` throws on `null`.
fn is_identity(to: Conversion, ty: TaasType) -> bool {
    ty == to.target() && !matches!(to, Conversion::ToString | Conversion::ToObject)
}

/// Fold every constant subexpression of `value`. The result has the same `ty()`.
pub fn fold_constants(value: &TaasValue) -> TaasValue {
    let ty = value.ty();
    let folded = match value {
        TaasValue::Constant(_) | TaasValue::Local { .. } => return value.dup(),
        TaasValue::Unary { op, operand } => {
            let operand = fold_constants(operand);
            match operand.as_constant().and_then(|c| fold_unary(*op, c)) {
                Some(constant) => TaasValue::Constant(constant),
                None => TaasValue::unary(*op, operand),
            }
        }
        TaasValue::Binary { op, lhs, rhs, .. } => {
            let lhs = fold_constants(lhs);
            let rhs = fold_constants(rhs);
            let constant = match (lhs.as_constant(), rhs.as_constant()) {
                (Some(l), Some(r)) => fold_binary(*op, ty, l, r),
                _ => None,
            };
            match constant {
                Some(constant) => TaasValue::Constant(constant),
                None => TaasValue::binary(*op, lhs, rhs),
            }
        }
        TaasValue::Convert { value: inner, to } => {
            let inner = fold_constants(inner);
            if let Some(constant) = inner.as_constant().and_then(|c| fold_conversion(*to, c)) {
                TaasValue::Constant(constant)
            } else if inner.as_constant().is_none() && is_identity(*to, inner.ty()) {
                inner
            } else {
                TaasValue::convert(inner, *to)
            }
        }
    };

    if folded.ty() != ty {
        trace!(from = %ty, to = %folded.ty(), "fold would change type, keeping expression");
        return value.dup();
    }
    if folded.as_constant().is_some() {
        trace!(%ty, "folded to constant");
    }
    folded
}

/// [`fold_constants`] over every statement and stack slot.
pub fn fold_block(block: &LiftedBlock) -> LiftedBlock {
    let statements = block
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::SetLocal { index, value } => Statement::SetLocal {
                index: *index,
                value: fold_constants(value),
            },
            Statement::Discard(value) => Statement::Discard(fold_constants(value)),
            Statement::Return(value) => Statement::Return(value.as_ref().map(fold_constants)),
        })
        .collect();
    LiftedBlock {
        statements,
        stack: block.stack.iter().map(fold_constants).collect(),
    }
}
