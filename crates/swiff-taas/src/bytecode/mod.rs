//! ABC method-body bytecode: operations, constant pool, method context.

mod method;
mod op;
mod pool;


pub use method::{AbcEnvironment, MethodBody};
pub use op::{BinaryOp, Bytecode, Conversion, Op, UnaryOp, read_u30, write_u30};
pub use pool::ConstantPool;
