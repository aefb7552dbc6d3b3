//! Constant values and their typed wire encoding.
//!
//! Each value is written as a type byte followed by its payload: numbers
//! big-endian, strings and lists terminated by the 0 byte. The type bytes
//! are shared with the virtual machine's archive format.

use super::instruction::Instruction;
use serde::Serialize;

pub const TYPE_TERMINATOR: u8 = 0;
pub const TYPE_FALSE: u8 = 10;
pub const TYPE_TRUE: u8 = 11;
pub const TYPE_STRING: u8 = 12;
pub const TYPE_RUNE: u8 = 13;
pub const TYPE_INT64: u8 = 17;
pub const TYPE_FLOAT64: u8 = 23;
pub const TYPE_LIST: u8 = 24;
pub const TYPE_FUN: u8 = 26;

/// A function object: its own instruction slice, loaded into the caller
/// through the constant that wraps it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
    Rune(char),
    Bool(bool),
    List(Vec<Value>),
    Function(Function),
}

impl Value {
    pub fn encode(&self, buffer: &mut Vec<u8>) {
        match self {
            Value::Bool(true) => buffer.push(TYPE_TRUE),
            Value::Bool(false) => buffer.push(TYPE_FALSE),
            Value::Str(text) => {
                buffer.push(TYPE_STRING);
                buffer.extend_from_slice(text.as_bytes());
                buffer.push(TYPE_TERMINATOR);
            }
            Value::Rune(rune) => {
                buffer.push(TYPE_RUNE);
                buffer.extend_from_slice(&(*rune as u32).to_be_bytes());
            }
            Value::Integer(value) => {
                buffer.push(TYPE_INT64);
                buffer.extend_from_slice(&value.to_be_bytes());
            }
            Value::Float(value) => {
                buffer.push(TYPE_FLOAT64);
                buffer.extend_from_slice(&value.to_be_bytes());
            }
            Value::List(elements) => {
                buffer.push(TYPE_LIST);
                for element in elements {
                    element.encode(buffer);
                }
                buffer.push(TYPE_TERMINATOR);
            }
            Value::Function(function) => {
                // functions are length-prefixed; their body may contain 0
                buffer.push(TYPE_FUN);
                let mut body = Vec::new();
                for instruction in &function.instructions {
                    instruction.encode(&mut body);
                }
                buffer.extend_from_slice(&(body.len() as u32).to_be_bytes());
                buffer.extend_from_slice(&body);
            }
        }
    }
}
