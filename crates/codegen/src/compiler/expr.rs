//! Expression lowering.

use super::{CompileResult, Compiler};
use crate::bytecode::{Instruction, Opcode, Value};
use moonbite_parser::ast::{Expr, NumberValue};
use moonbite_parser::error::{compile as compile_error, MessageCode};
use moonbite_parser::Location;

impl Compiler {
    pub(super) fn compile_expression(
        &mut self,
        expression: &Expr,
        out: &mut Vec<Instruction>,
    ) -> CompileResult<()> {
        match expression {
            Expr::BoolLiteral { value, .. } => {
                let opcode = if *value { Opcode::True } else { Opcode::False };
                out.push(Instruction::new(opcode));
                Ok(())
            }

            Expr::NumberLiteral { value, .. } => {
                let constant = match value {
                    NumberValue::Int(value) => Value::Integer(*value),
                    NumberValue::Float(value) => Value::Float(*value),
                };
                self.push_constant(constant, out);
                Ok(())
            }

            Expr::StringLiteral { value, .. } => {
                self.push_constant(Value::Str(value.clone()), out);
                Ok(())
            }

            Expr::RuneLiteral { value, location } => {
                // the lexer guarantees exactly one character
                let rune = value.chars().next().ok_or_else(|| {
                    compile_error(MessageCode::InvalidValue, &["rune"], location.clone())
                })?;
                self.push_constant(Value::Rune(rune), out);
                Ok(())
            }

            Expr::Identifier { value, location } => match self.symbols.resolve(value) {
                Some(symbol) => {
                    out.push(Compiler::get_instruction(symbol));
                    Ok(())
                }
                None => Err(compile_error(
                    MessageCode::UnresolvedSymbol,
                    &[value],
                    location.clone(),
                )),
            },

            Expr::GroupExpression { expression, .. } => self.compile_expression(expression, out),

            Expr::NotExpression { expression, .. } => {
                self.compile_expression(expression, out)?;
                out.push(Instruction::new(Opcode::Not));
                Ok(())
            }

            Expr::ArithmeticExpression {
                left,
                operator,
                right,
                location,
            } => {
                let opcode = match operator.as_str() {
                    "+" => Opcode::Add,
                    "-" => Opcode::Sub,
                    "*" => Opcode::Mul,
                    "/" => Opcode::Div,
                    "%" => Opcode::Mod,
                    _ => {
                        return Err(not_implemented("the power operator", location));
                    }
                };
                self.compile_expression(left, out)?;
                self.compile_expression(right, out)?;
                out.push(Instruction::new(opcode));
                Ok(())
            }

            // `<` and `<=` have no opcode; the operands swap and the
            // mirrored comparison is emitted.
            Expr::ComparisonExpression {
                left,
                operator,
                right,
                location,
            } => {
                let (first, second, opcode) = match operator.as_str() {
                    "==" => (left, right, Opcode::Equal),
                    "!=" => (left, right, Opcode::NotEqual),
                    ">" => (left, right, Opcode::GreaterThan),
                    ">=" => (left, right, Opcode::GreaterThanOrEqual),
                    "<" => (right, left, Opcode::GreaterThan),
                    "<=" => (right, left, Opcode::GreaterThanOrEqual),
                    _ => return Err(not_implemented(operator, location)),
                };
                self.compile_expression(first, out)?;
                self.compile_expression(second, out)?;
                out.push(Instruction::new(opcode));
                Ok(())
            }

            Expr::BinaryExpression {
                left,
                operator,
                right,
                location,
            } => {
                let opcode = match operator.as_str() {
                    "&&" => Opcode::And,
                    "||" => Opcode::Or,
                    _ => return Err(not_implemented(operator, location)),
                };
                self.compile_expression(left, out)?;
                self.compile_expression(right, out)?;
                out.push(Instruction::new(opcode));
                Ok(())
            }

            Expr::CallExpression {
                target, arguments, ..
            } => {
                for argument in arguments {
                    self.compile_expression(argument, out)?;
                }
                self.compile_expression(target, out)?;
                out.push(Instruction::with_operand(
                    Opcode::Call,
                    arguments.len() as u32,
                ));
                Ok(())
            }

            Expr::MemberExpression {
                target, property, ..
            } => {
                self.compile_expression(target, out)?;
                self.push_constant(Value::Str(property.value.clone()), out);
                out.push(Instruction::new(Opcode::Index));
                Ok(())
            }

            Expr::IndexExpression { target, index, .. } => {
                self.compile_expression(target, out)?;
                self.compile_expression(index, out)?;
                out.push(Instruction::new(Opcode::Index));
                Ok(())
            }

            Expr::ListLiteral { elements, .. } => {
                for element in elements {
                    self.compile_expression(element, out)?;
                }
                out.push(Instruction::with_operand(
                    Opcode::Array,
                    elements.len() as u32,
                ));
                Ok(())
            }

            Expr::MapLiteral { entries, .. } => {
                for entry in entries {
                    self.compile_expression(&entry.key, out)?;
                    self.compile_expression(&entry.value, out)?;
                }
                out.push(Instruction::with_operand(
                    Opcode::Hash,
                    entries.len() as u32 * 2,
                ));
                Ok(())
            }

            Expr::InstanceLiteral { members, .. } => {
                for member in members {
                    self.push_constant(Value::Str(member.name.value.clone()), out);
                    self.compile_expression(&member.value, out)?;
                }
                out.push(Instruction::with_operand(
                    Opcode::Hash,
                    members.len() as u32 * 2,
                ));
                Ok(())
            }

            Expr::AnonymousFunExpression { body, .. } => {
                let function = self.compile_function(body)?;
                self.push_constant(Value::Function(function), out);
                Ok(())
            }

            // the coroutine and generator wrappers are transparent here;
            // scheduling is the virtual machine's concern
            Expr::CoroutFunExpression { function, .. }
            | Expr::GenFunExpression { function, .. } => self.compile_expression(function, out),

            // casts are erased; the typechecker has already judged them
            Expr::TypeCastExpression { target, .. } => self.compile_expression(target, out),

            Expr::InstanceofExpression { location, .. } => {
                Err(not_implemented("instanceof", location))
            }
            Expr::MatchExpression { location, .. } => {
                Err(not_implemented("match expressions", location))
            }
            Expr::MatchSelfExpression { location } => {
                Err(not_implemented("the match subject", location))
            }
            Expr::OrExpression { location, .. } => Err(not_implemented("or fallbacks", location)),
            Expr::GiveupExpression { location } => Err(not_implemented("giveup", location)),
            Expr::WarnExpression { location, .. } => Err(not_implemented("warn", location)),
            Expr::CaretExpression { location } => Err(not_implemented("^", location)),
            Expr::ThisExpression { location } => Err(not_implemented("this", location)),
            Expr::ArithmeticUnaryExpression { location, .. } => {
                Err(not_implemented("increment and decrement", location))
            }
        }
    }

    fn push_constant(&mut self, value: Value, out: &mut Vec<Instruction>) {
        let index = self.constants.add(value);
        out.push(Instruction::with_operand(Opcode::Constant, index));
    }
}

fn not_implemented(what: &str, location: &Location) -> Box<moonbite_parser::Error> {
    compile_error(MessageCode::NotImplemented, &[what], location.clone())
}
