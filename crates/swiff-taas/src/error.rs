//! Errors of the Taas IR layer.

use crate::types::TaasType;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaasError {
    /// A widening request that no conversion can satisfy.
    #[error("can not convert from {from} to {to}")]
    TypeMismatch { from: TaasType, to: TaasType },

    /// `offset` is the instruction index in the block being lifted.
    #[error("stack underflow at {op} (instruction {offset})")]
    StackUnderflow { op: &'static str, offset: usize },

    #[error("{op} is not supported here (instruction {offset})")]
    UnsupportedOp { op: &'static str, offset: usize },

    /// `offset` is the byte offset in the encoded code.
    #[error("unknown opcode 0x{opcode:02x} at byte {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("code ends inside an operand at byte {offset}")]
    Truncated { offset: usize },

    #[error("no {pool} constant at index {index}")]
    MissingConstant { pool: &'static str, index: u32 },

    #[error("local {index} out of range: method has {local_count} locals")]
    LocalOutOfRange { index: u32, local_count: u32 },
}

pub type Result<T> = std::result::Result<T, TaasError>;
