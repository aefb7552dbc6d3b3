//! Bytecode data model: opcodes, instructions, constants and modules.

pub mod constant_pool;
pub mod instruction;
pub mod module;
pub mod opcode;
pub mod value;

pub use constant_pool::ConstantPool;
pub use instruction::{size_of, Instruction};
pub use module::{emit, Module, MODULE_TAG};
pub use opcode::Opcode;
pub use value::{Function, Value};
