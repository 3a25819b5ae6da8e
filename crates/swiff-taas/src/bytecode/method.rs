//! Emission context: the shared constant pool and the method being built.

use tracing::trace;

use super::op::Bytecode;
use super::pool::ConstantPool;
use crate::error::Result;
use crate::value::TaasValue;

/// State shared by every method of one ABC file.
#[derive(Clone, Debug, Default)]
pub struct AbcEnvironment {
    pub pool: ConstantPool,
}

impl AbcEnvironment {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodBody {
    /// Register count, `this` included.
    pub local_count: u32,
    pub max_stack: u32,
    pub init_scope_depth: u32,
    pub max_scope_depth: u32,
    pub code: Bytecode,
}

impl MethodBody {
    pub fn new(local_count: u32) -> Self {
        Self {
            local_count,
            ..Self::default()
        }
    }

    /// Append the ops pushing `value` and keep `max_stack` in step.
    pub fn emit_value(&mut self, env: &mut AbcEnvironment, value: &TaasValue) -> Result<()> {
        let mut code = Bytecode::new();
        value.emit_ops(env, self, &mut code)?;
        trace!(ops = code.len(), ty = %value.ty(), "emitted value");
        self.code.extend(code);
        self.max_stack = self.max_stack.max(self.code.max_stack());
        Ok(())
    }
}
