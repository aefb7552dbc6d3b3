//! Opcode table.
//!
//! Numbering starts at 10 and is contiguous; the values are part of the
//! wire format shared with the virtual machine and must never be
//! reordered. There is no opcode for `<` or `<=`: the compiler swaps the
//! operands and emits `GreaterThan` / `GreaterThanOrEqual` instead.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum Opcode {
    Noop = 10,
    /// Push a constant-pool entry; operand is the pool index.
    Constant = 11,
    /// Bind the top of stack to a global slot; operand is the slot.
    Set = 12,
    Get = 13,
    /// Invoke the callee on top of stack; operand is the argument count.
    Call = 14,
    Pop = 15,
    Return = 16,
    True = 17,
    False = 18,
    /// Relative jump in bytes. One operand forward; a second operand of 1
    /// marks a backward jump.
    Jump = 19,
    /// Pop a bool, jump forward by the operand when it is false.
    JumpIfFalse = 20,
    Add = 21,
    Sub = 22,
    Mul = 23,
    Div = 24,
    Mod = 25,
    Negate = 26,
    Equal = 27,
    NotEqual = 28,
    GreaterThan = 29,
    GreaterThanOrEqual = 30,
    GetLocal = 31,
    SetLocal = 32,
    ReturnEmpty = 33,
    Yield = 34,
    Break = 35,
    Continue = 36,
    /// Index the container under the top of stack by the top of stack;
    /// member access compiles to a string push followed by this.
    Index = 37,
    /// Build a list from the top `operand` stack values.
    Array = 38,
    /// Build a map from the top `operand` stack values (key/value pairs).
    Hash = 39,
    Not = 40,
    And = 41,
    Or = 42,
}

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }
}
