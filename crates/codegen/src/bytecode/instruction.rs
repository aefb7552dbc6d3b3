//! Instructions and their byte layout.

use super::opcode::Opcode;
use serde::Serialize;
use smallvec::SmallVec;

/// One instruction: an opcode and its 32-bit operands. Jump operands are
/// relative byte counts over the encoded instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: SmallVec<[u32; 2]>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Instruction {
            opcode,
            operands: SmallVec::new(),
        }
    }

    pub fn with_operand(opcode: Opcode, operand: u32) -> Self {
        let mut operands = SmallVec::new();
        operands.push(operand);
        Instruction { opcode, operands }
    }

    /// A backward jump carries a second operand of 1.
    pub fn backward_jump(distance: u32) -> Self {
        let mut operands = SmallVec::new();
        operands.push(distance);
        operands.push(1);
        Instruction {
            opcode: Opcode::Jump,
            operands,
        }
    }

    /// Encoded byte length: one opcode byte plus four per operand.
    pub fn get_size(&self) -> u32 {
        1 + 4 * self.operands.len() as u32
    }

    pub fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.push(self.opcode.byte());
        for operand in &self.operands {
            buffer.extend_from_slice(&operand.to_be_bytes());
        }
    }
}

/// Total encoded size of an instruction slice; jump operands are computed
/// from this.
pub fn size_of(instructions: &[Instruction]) -> u32 {
    instructions.iter().map(Instruction::get_size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_operand_count() {
        assert_eq!(Instruction::new(Opcode::Pop).get_size(), 1);
        assert_eq!(Instruction::with_operand(Opcode::Jump, 0).get_size(), 5);
        assert_eq!(Instruction::backward_jump(12).get_size(), 9);
    }

    #[test]
    fn encoding_is_big_endian() {
        let mut bytes = Vec::new();
        Instruction::with_operand(Opcode::Constant, 258).encode(&mut bytes);
        assert_eq!(bytes, vec![11, 0, 0, 1, 2]);
    }
}
