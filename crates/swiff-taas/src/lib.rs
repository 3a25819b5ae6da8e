#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Taas: a typed IR for ActionScript 3 bytecode.
//!
//! Method-body code is lifted into [`TaasValue`] trees, simplified by
//! [`fold_constants`], and emitted back as [`bytecode::Op`]s. The type
//! lattice ([`TaasType`]) is flat; [`TaasValue::widen`] is the one place
//! where a value is allowed to change type.

pub mod bytecode;
pub mod error;
pub mod fold;
pub mod lift;
pub mod types;
pub mod value;

#[cfg(test)]
mod fold_tests;

pub use bytecode::{AbcEnvironment, Bytecode, ConstantPool, MethodBody, Op};
pub use error::{Result, TaasError};
pub use fold::{fold_block, fold_constants};
pub use lift::{LiftedBlock, Statement, lift};
pub use types::TaasType;
pub use value::{TaasConstant, TaasValue};
