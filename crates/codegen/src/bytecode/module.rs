//! Compiled module and the output byte stream.

use super::constant_pool::ConstantPool;
use super::instruction::Instruction;
use super::value::TYPE_TERMINATOR;
use serde::Serialize;

/// Header byte opening every module in the stream.
pub const MODULE_TAG: u8 = 0x4D;

/// One compiled package: its constants and top-level instructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub name: String,
    pub entry: bool,
    pub constants: ConstantPool,
    pub instructions: Vec<Instruction>,
}

impl Module {
    /// `[tag, entry-flag, big-endian i32 body size, body]`. The body is
    /// the encoded constant pool (terminated) followed by the instruction
    /// stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for constant in self.constants.iter() {
            constant.encode(&mut body);
        }
        body.push(TYPE_TERMINATOR);
        for instruction in &self.instructions {
            instruction.encode(&mut body);
        }

        let mut bytes = Vec::with_capacity(body.len() + 6);
        bytes.push(MODULE_TAG);
        bytes.push(u8::from(self.entry));
        bytes.extend_from_slice(&(body.len() as i32).to_be_bytes());
        bytes.extend_from_slice(&body);
        bytes
    }
}

/// Serialize a set of modules, entry modules first, the rest in the given
/// order.
pub fn emit(modules: &[Module]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for module in modules.iter().filter(|module| module.entry) {
        bytes.extend_from_slice(&module.to_bytes());
    }
    for module in modules.iter().filter(|module| !module.entry) {
        bytes.extend_from_slice(&module.to_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::opcode::Opcode;

    fn module(name: &str, entry: bool) -> Module {
        Module {
            name: name.to_string(),
            entry,
            constants: ConstantPool::new(),
            instructions: vec![Instruction::new(Opcode::Noop)],
        }
    }

    #[test]
    fn header_carries_tag_flag_and_size() {
        let bytes = module("main", true).to_bytes();
        assert_eq!(bytes[0], MODULE_TAG);
        assert_eq!(bytes[1], 1);
        // empty pool terminator plus one noop
        assert_eq!(&bytes[2..6], &2i32.to_be_bytes());
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn entry_modules_lead_the_stream() {
        let stream = emit(&[module("lib", false), module("main", true)]);
        assert_eq!(stream[1], 1);
        let second = module("lib", false).to_bytes().len();
        assert_eq!(stream[second + 1], 0);
    }
}
