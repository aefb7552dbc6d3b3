//! Statement lowering.

use super::{CompileResult, Compiler, VarKind};
use crate::bytecode::{size_of, Function, Instruction, Opcode, Value};
use moonbite_parser::ast::{Expr, Stmt, TypeLiteral};
use moonbite_parser::error::{compile as compile_error, MessageCode};

/// Byte size of a one-operand jump, the "terminating jump" every branch
/// scheme accounts for.
const JUMP_SIZE: u32 = 5;
/// Byte size of a backward jump (distance plus direction operand).
const BACK_JUMP_SIZE: u32 = 9;

impl Compiler {
    pub(super) fn compile_statement(
        &mut self,
        statement: &Stmt,
        out: &mut Vec<Instruction>,
        should_clean: bool,
    ) -> CompileResult<()> {
        match statement {
            Stmt::Package { .. }
            | Stmt::Use { .. }
            | Stmt::TypeDefinition { .. }
            | Stmt::TraitDefinition { .. }
            | Stmt::SingleLineComment { .. }
            | Stmt::MultiLineComment { .. } => Ok(()),

            Stmt::Declaration {
                name,
                constant,
                ty,
                value,
                ..
            } => {
                match value {
                    Some(value) => self.compile_expression(value, out)?,
                    None => {
                        let index = self.constants.add(default_value(ty.as_ref()));
                        out.push(Instruction::with_operand(Opcode::Constant, index));
                    }
                }
                let kind = if *constant { VarKind::Const } else { VarKind::Var };
                let symbol = self.symbols.define(&name.value, kind);
                out.push(Compiler::set_instruction(&symbol));
                Ok(())
            }

            Stmt::UnboundFunDefinition {
                signature, body, ..
            } => self.compile_fun_binding(&signature.name.value, body, out),
            Stmt::BoundFunDefinition {
                signature, body, ..
            } => self.compile_fun_binding(&signature.signature.name.value, body, out),

            Stmt::Return { value, .. } => {
                match value {
                    Some(value) => {
                        self.compile_expression(value, out)?;
                        out.push(Instruction::new(Opcode::Return));
                    }
                    None => out.push(Instruction::new(Opcode::ReturnEmpty)),
                }
                Ok(())
            }

            Stmt::Yield { value, location } => match value {
                Some(value) => {
                    self.compile_expression(value, out)?;
                    out.push(Instruction::new(Opcode::Yield));
                    Ok(())
                }
                None => Err(compile_error(
                    MessageCode::EmptyYield,
                    &[],
                    location.clone(),
                )),
            },

            Stmt::Break { .. } => {
                out.push(Instruction::new(Opcode::Break));
                Ok(())
            }
            Stmt::Continue { .. } => {
                out.push(Instruction::new(Opcode::Continue));
                Ok(())
            }

            Stmt::Defer { location, .. } => Err(compile_error(
                MessageCode::NotImplemented,
                &["defer"],
                location.clone(),
            )),

            Stmt::If {
                predicate,
                body,
                else_ifs,
                else_body,
                ..
            } => self.compile_if(predicate, body, else_ifs, else_body.as_deref(), out),

            Stmt::Loop {
                predicate, body, ..
            } => self.compile_loop(predicate.as_ref(), body, out),

            Stmt::Assignment {
                target,
                operator,
                value,
                ..
            } => self.compile_assignment(target, operator, value, out),

            Stmt::Expression { expression, .. } => {
                self.compile_expression(expression, out)?;
                if should_clean {
                    out.push(Instruction::new(Opcode::Pop));
                }
                Ok(())
            }
        }
    }

    /// Compile a body in its own scope and bind the resulting function
    /// object constant to `name`.
    fn compile_fun_binding(
        &mut self,
        name: &str,
        body: &[Stmt],
        out: &mut Vec<Instruction>,
    ) -> CompileResult<()> {
        let function = self.compile_function(body)?;
        let index = self.constants.add(Value::Function(function));
        out.push(Instruction::with_operand(Opcode::Constant, index));
        let symbol = self.symbols.define(name, VarKind::Const);
        out.push(Compiler::set_instruction(&symbol));
        Ok(())
    }

    pub(super) fn compile_function(&mut self, body: &[Stmt]) -> CompileResult<Function> {
        let instructions = self.compile_block(body)?;
        Ok(Function { instructions })
    }

    fn compile_block(&mut self, body: &[Stmt]) -> CompileResult<Vec<Instruction>> {
        self.symbols.enter_scope();
        let mut instructions = Vec::new();
        for statement in body {
            if let Err(error) = self.compile_statement(statement, &mut instructions, true) {
                self.symbols.leave_scope();
                return Err(error);
            }
        }
        self.symbols.leave_scope();
        Ok(instructions)
    }

    /// Branch scheme: every block is followed by a terminating jump over
    /// what remains, and every predicate by a `JumpIfFalse` over its block
    /// plus that jump. Operands are byte counts of the encoded region.
    fn compile_if(
        &mut self,
        predicate: &Expr,
        body: &[Stmt],
        else_ifs: &[moonbite_parser::ast::ElseIfBlock],
        else_body: Option<&[Stmt]>,
        out: &mut Vec<Instruction>,
    ) -> CompileResult<()> {
        self.compile_expression(predicate, out)?;
        let main_block = self.compile_block(body)?;
        out.push(Instruction::with_operand(
            Opcode::JumpIfFalse,
            size_of(&main_block) + JUMP_SIZE,
        ));
        out.extend(main_block);

        let count = else_ifs.len();
        for (position, else_if) in else_ifs.iter().enumerate() {
            let mut block_predicate = Vec::new();
            self.compile_expression(&else_if.predicate, &mut block_predicate)?;
            let block = self.compile_block(&else_if.body)?;

            out.push(Instruction::with_operand(
                Opcode::Jump,
                size_of(&block) + size_of(&block_predicate) + JUMP_SIZE,
            ));
            out.append(&mut block_predicate);
            let last = position + 1 == count;
            let distance = if last {
                size_of(&block)
            } else {
                size_of(&block) + JUMP_SIZE
            };
            out.push(Instruction::with_operand(Opcode::JumpIfFalse, distance));
            out.extend(block);
        }

        if let Some(else_body) = else_body {
            let block = self.compile_block(else_body)?;
            out.push(Instruction::with_operand(Opcode::Jump, size_of(&block)));
            out.extend(block);
        } else if else_ifs.is_empty() {
            out.push(Instruction::with_operand(Opcode::Jump, 0));
        }
        Ok(())
    }

    /// Body first, then the predicate guarded by `JumpIfFalse`, then the
    /// backward jump forming the back-edge.
    fn compile_loop(
        &mut self,
        predicate: Option<&Expr>,
        body: &[Stmt],
        out: &mut Vec<Instruction>,
    ) -> CompileResult<()> {
        let block = self.compile_block(body)?;
        let body_size = size_of(&block);
        match predicate {
            Some(predicate) => {
                let mut predicate_block = Vec::new();
                self.compile_expression(predicate, &mut predicate_block)?;
                let predicate_size = size_of(&predicate_block);
                out.extend(block);
                out.extend(predicate_block);
                out.push(Instruction::with_operand(
                    Opcode::JumpIfFalse,
                    body_size + BACK_JUMP_SIZE,
                ));
                out.push(Instruction::backward_jump(body_size + predicate_size));
            }
            None => {
                out.extend(block);
                out.push(Instruction::backward_jump(body_size));
            }
        }
        Ok(())
    }

    fn compile_assignment(
        &mut self,
        target: &Expr,
        operator: &str,
        value: &Expr,
        out: &mut Vec<Instruction>,
    ) -> CompileResult<()> {
        let Expr::Identifier {
            value: name,
            location,
        } = target
        else {
            return Err(compile_error(
                MessageCode::NotImplemented,
                &["assignment to this target"],
                target.location().clone(),
            ));
        };
        let symbol = match self.symbols.resolve(name) {
            Some(symbol) => symbol.clone(),
            None => {
                return Err(compile_error(
                    MessageCode::UnresolvedSymbol,
                    &[name],
                    location.clone(),
                ));
            }
        };

        if operator == "=" {
            self.compile_expression(value, out)?;
        } else {
            out.push(Compiler::get_instruction(&symbol));
            self.compile_expression(value, out)?;
            let opcode = match operator {
                "+=" => Opcode::Add,
                "-=" => Opcode::Sub,
                "*=" => Opcode::Mul,
                "/=" => Opcode::Div,
                "%=" => Opcode::Mod,
                _ => {
                    return Err(compile_error(
                        MessageCode::NotImplemented,
                        &[operator],
                        location.clone(),
                    ));
                }
            };
            out.push(Instruction::new(opcode));
        }
        out.push(Compiler::set_instruction(&symbol));
        Ok(())
    }
}

/// Default for a declaration without an initializer; the parser guarantees
/// a declared type is present in that case.
fn default_value(ty: Option<&TypeLiteral>) -> Value {
    let Some(TypeLiteral::TypeIdentifier { name, .. }) = ty else {
        return Value::Integer(0);
    };
    match name.value.as_str() {
        "bool" | "Bool" => Value::Bool(false),
        "string" | "String" => Value::Str(String::new()),
        "float32" | "float64" | "Float32" | "Float64" => Value::Float(0.0),
        "List" | "iterable" => Value::List(Vec::new()),
        _ => Value::Integer(0),
    }
}
