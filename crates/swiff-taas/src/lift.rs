//! Lifting straight-line bytecode into Taas values.
//!
//! The operand stack is executed symbolically: pushes become constants,
//! operators build expression trees, and the ops that consume values without
//! producing one become [`Statement`]s. A block is re-emitted as its
//! statements in order followed by whatever is left on the stack.

use tracing::trace;

use crate::bytecode::{AbcEnvironment, Bytecode, MethodBody, Op};
use crate::error::{Result, TaasError};
use crate::types::TaasType;
use crate::value::{TaasConstant, TaasValue, check_local};

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    SetLocal { index: u32, value: TaasValue },
    /// A value computed and then popped.
    Discard(TaasValue),
    Return(Option<TaasValue>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiftedBlock {
    pub statements: Vec<Statement>,
    /// Values left on the operand stack, bottom first.
    pub stack: Vec<TaasValue>,
}

struct Lifter<'a> {
    env: &'a AbcEnvironment,
    block: LiftedBlock,
}

impl Lifter<'_> {
    fn pop(&mut self, op: Op, offset: usize) -> Result<TaasValue> {
        self.block.stack.pop().ok_or(TaasError::StackUnderflow {
            op: op.name(),
            offset,
        })
    }

    fn push_constant(&mut self, constant: TaasConstant) {
        self.block.stack.push(TaasValue::Constant(constant));
    }

    /// Returns `false` once the block has returned.
    fn step(&mut self, op: Op, offset: usize) -> Result<bool> {
        let env = self.env;
        let pool = &env.pool;
        match op {
            Op::Nop | Op::Label => {}
            Op::Jump(_) | Op::IfTrue(_) | Op::IfFalse(_) => {
                return Err(TaasError::UnsupportedOp {
                    op: op.name(),
                    offset,
                });
            }
            Op::PushNull => self.push_constant(TaasConstant::Null),
            Op::PushUndefined => self.push_constant(TaasConstant::Undefined),
            Op::PushByte(value) => self.push_constant(TaasConstant::Int(value as i32)),
            Op::PushShort(value) => self.push_constant(TaasConstant::Int(value as i32)),
            Op::PushTrue => self.push_constant(TaasConstant::Boolean(true)),
            Op::PushFalse => self.push_constant(TaasConstant::Boolean(false)),
            Op::PushNaN => self.push_constant(TaasConstant::Number(f64::NAN)),
            Op::PushString(index) => {
                let value = pool.string(index)?.to_owned();
                self.push_constant(TaasConstant::String(value));
            }
            Op::PushInt(index) => {
                let value = pool.int(index)?;
                self.push_constant(TaasConstant::Int(value));
            }
            Op::PushUInt(index) => {
                let value = pool.uint(index)?;
                self.push_constant(TaasConstant::UInt(value));
            }
            Op::PushDouble(index) => {
                let value = pool.double(index)?;
                self.push_constant(TaasConstant::Number(value));
            }
            Op::Pop => {
                let value = self.pop(op, offset)?;
                self.block.statements.push(Statement::Discard(value));
            }
            Op::Dup => {
                let top = self
                    .block
                    .stack
                    .last()
                    .ok_or(TaasError::StackUnderflow {
                        op: op.name(),
                        offset,
                    })?
                    .dup();
                self.block.stack.push(top);
            }
            Op::Swap => {
                let len = self.block.stack.len();
                if len < 2 {
                    return Err(TaasError::StackUnderflow {
                        op: op.name(),
                        offset,
                    });
                }
                self.block.stack.swap(len - 1, len - 2);
            }
            Op::GetLocal(index) => self.block.stack.push(TaasValue::local(index, TaasType::Any)),
            Op::SetLocal(index) => {
                let value = self.pop(op, offset)?;
                // Pending stack values are emitted after the statements, so
                // they must not observe the write.
                if self.block.stack.iter().any(|v| v.reads_local(index)) {
                    return Err(TaasError::UnsupportedOp {
                        op: op.name(),
                        offset,
                    });
                }
                self.block.statements.push(Statement::SetLocal { index, value });
            }
            Op::Convert(conversion) => {
                let value = self.pop(op, offset)?;
                self.block.stack.push(TaasValue::convert(value, conversion));
            }
            Op::Unary(unary) => {
                let operand = self.pop(op, offset)?;
                self.block.stack.push(TaasValue::unary(unary, operand));
            }
            Op::Binary(binary) => {
                let rhs = self.pop(op, offset)?;
                let lhs = self.pop(op, offset)?;
                self.block.stack.push(TaasValue::binary(binary, lhs, rhs));
            }
            Op::ReturnVoid => {
                self.block.statements.push(Statement::Return(None));
                self.block.stack.clear();
                return Ok(false);
            }
            Op::ReturnValue => {
                let value = self.pop(op, offset)?;
                self.block.statements.push(Statement::Return(Some(value)));
                self.block.stack.clear();
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Lift a straight-line sequence. Ops after a return are ignored.
///
/// Error offsets are instruction indices into `code`.
pub fn lift(code: &Bytecode, env: &AbcEnvironment) -> Result<LiftedBlock> {
    let mut lifter = Lifter {
        env,
        block: LiftedBlock::default(),
    };
    for (offset, op) in code.iter().enumerate() {
        trace!(offset, op = op.name(), depth = lifter.block.stack.len(), "lift");
        if !lifter.step(*op, offset)? {
            let ignored = code.len() - offset - 1;
            if ignored > 0 {
                trace!(ignored, "ops after return");
            }
            break;
        }
    }
    Ok(lifter.block)
}

impl LiftedBlock {
    /// Re-emit: statements in order, then the remaining stack bottom first.
    pub fn emit_ops(
        &self,
        env: &mut AbcEnvironment,
        body: &MethodBody,
        code: &mut Bytecode,
    ) -> Result<()> {
        let mut out = Bytecode::new();
        for statement in &self.statements {
            match statement {
                Statement::SetLocal { index, value } => {
                    check_local(*index, body)?;
                    value.emit_ops(env, body, &mut out)?;
                    out.push(Op::SetLocal(*index));
                }
                Statement::Discard(value) => {
                    value.emit_ops(env, body, &mut out)?;
                    out.push(Op::Pop);
                }
                Statement::Return(None) => out.push(Op::ReturnVoid),
                Statement::Return(Some(value)) => {
                    value.emit_ops(env, body, &mut out)?;
                    out.push(Op::ReturnValue);
                }
            }
        }
        for value in &self.stack {
            value.emit_ops(env, body, &mut out)?;
        }
        code.extend(out);
        Ok(())
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.statements.last(), Some(Statement::Return(_)))
    }
}
