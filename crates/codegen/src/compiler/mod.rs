//! AST lowering to the stack-machine instruction set.

mod expr;
mod stmt;
pub mod symbol_table;

pub use symbol_table::{Scope, Symbol, SymbolTable, VarKind};

use crate::bytecode::{ConstantPool, Instruction, Module, Opcode};
use moonbite_parser::ast::Ast;
use moonbite_parser::error::Error;

pub type CompileResult<T> = Result<T, Box<Error>>;

/// Compile one package to a module. The module is flagged as an entry
/// when its package is `main`.
pub fn compile(ast: &Ast) -> CompileResult<Module> {
    Compiler::new().compile(ast)
}

pub struct Compiler {
    symbols: SymbolTable,
    constants: ConstantPool,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            symbols: SymbolTable::new(),
            constants: ConstantPool::new(),
        }
    }

    pub fn compile(mut self, ast: &Ast) -> CompileResult<Module> {
        let mut instructions = Vec::new();
        for statement in &ast.definitions {
            self.compile_statement(statement, &mut instructions, true)?;
        }
        let name = ast.package_name().to_string();
        Ok(Module {
            entry: name == "main",
            name,
            constants: self.constants,
            instructions,
        })
    }

    fn get_instruction(symbol: &Symbol) -> Instruction {
        let opcode = match symbol.scope {
            Scope::Global => Opcode::Get,
            Scope::Local => Opcode::GetLocal,
        };
        Instruction::with_operand(opcode, symbol.index)
    }

    fn set_instruction(symbol: &Symbol) -> Instruction {
        let opcode = match symbol.scope {
            Scope::Global => Opcode::Set,
            Scope::Local => Opcode::SetLocal,
        };
        Instruction::with_operand(opcode, symbol.index)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}
