//! Bytecode back end for the Moonbite compiler.
//!
//! Lowers a parsed [`Ast`](moonbite_parser::Ast) to a flat stack-machine
//! instruction stream. Each package compiles to one [`Module`]; a set of
//! modules serializes to the archive the virtual machine loads, entry
//! modules first.
//!
//! ```
//! use moonbite_codegen::compile;
//! use moonbite_parser::parse;
//!
//! let ast = parse("package main\nconst answer = 42", "main.mb").unwrap();
//! let module = compile(&ast).unwrap();
//! assert!(module.entry);
//! ```

pub mod bytecode;
pub mod compiler;

pub use bytecode::{emit, ConstantPool, Instruction, Module, Opcode, Value};
pub use compiler::{compile, CompileResult, Compiler};
