//! Nominal-but-structural typechecker.
//!
//! Types are identified by a base, the product of one fresh prime per
//! ancestor, so assignability is a single divisibility check. The
//! typechecker owns the top-level symbol table and the prime generator;
//! nested resolutions receive a transient frame carrying the generics in
//! scope.

pub mod builtins;
pub mod primes;
pub mod ty;

pub use primes::PrimeGenerator;
pub use ty::{GenericBinding, LiteralValue, ParameterStack, Type, TypeKind};

use crate::ast::{Expr, GenericParameter, NumberValue, Parameter, Stmt, TypeLiteral};
use crate::error::{type_error, Error, ErrorKind, MessageCode};
use crate::location::Location;
use indexmap::IndexMap;
use std::rc::Rc;

pub type TypeResult<T> = Result<T, Box<Error>>;

pub struct Typechecker {
    symbols: IndexMap<String, Rc<Type>>,
    primes: PrimeGenerator,
}

impl Typechecker {
    pub fn new() -> Self {
        Typechecker {
            symbols: IndexMap::new(),
            primes: PrimeGenerator::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Rc<Type>> {
        self.symbols.get(name)
    }

    /// Child of `parent` with a fresh prime factored into its base.
    pub fn extend(
        &mut self,
        parent: &Rc<Type>,
        arguments: Vec<Rc<Type>>,
        parameters: ParameterStack,
    ) -> Rc<Type> {
        let mut child = Type::new(parent.base * self.primes.next_prime(), parent.kind);
        child.arguments = arguments;
        child.parameters = parameters;
        Rc::new(child)
    }

    /// Register the types introduced by a top-level definition. Statements
    /// that define no type are accepted unchanged.
    pub fn define(&mut self, statement: &Stmt) -> TypeResult<()> {
        match statement {
            Stmt::TypeDefinition {
                name,
                generics,
                definition,
                ..
            } => self.define_type(name, generics, definition),
            Stmt::TraitDefinition {
                name,
                generics,
                methods,
                ..
            } => self.define_trait(name, generics, methods),
            _ => Ok(()),
        }
    }

    /// Run every definition of a parsed file through [`Typechecker::define`].
    pub fn check(&mut self, ast: &crate::ast::Ast) -> TypeResult<()> {
        for definition in &ast.definitions {
            self.define(definition)?;
        }
        Ok(())
    }

    pub fn resolve_type_literal(
        &mut self,
        literal: &TypeLiteral,
        frame: Option<&ParameterStack>,
    ) -> TypeResult<Rc<Type>> {
        match literal {
            TypeLiteral::TypeIdentifier {
                name,
                generics,
                location,
            } => {
                let target = match self.symbols.get(&name.value) {
                    Some(ty) => Rc::clone(ty),
                    None => match frame.and_then(|frame| frame.generic(&name.value)) {
                        Some(binding) => Rc::clone(&binding.bound),
                        None => {
                            return Err(type_error(
                                MessageCode::UnknownType,
                                &[&name.value],
                                name.location.clone(),
                            ));
                        }
                    },
                };
                // every open slot must receive exactly one written argument
                let open: Vec<u32> = target
                    .parameters
                    .open_generics()
                    .map(|binding| binding.index)
                    .collect();
                if generics.len() != open.len() {
                    return Err(type_error(
                        MessageCode::WrongArgumentCount,
                        &[
                            &name.value,
                            &open.len().to_string(),
                            &generics.len().to_string(),
                        ],
                        location.clone(),
                    ));
                }
                if generics.is_empty() {
                    return Ok(target);
                }

                let mut stack = target.parameters.clone();
                let mut arguments = Vec::new();
                for (slot, argument) in open.into_iter().zip(generics) {
                    let resolved = self.resolve_type_literal(argument, frame)?;
                    stack.bind_generic(slot, Rc::clone(&resolved));
                    arguments.push(resolved);
                }
                Ok(self.extend(&target, arguments, stack))
            }
            TypeLiteral::GroupType { ty, .. } => self.resolve_type_literal(ty, frame),
            TypeLiteral::OperatedType {
                left,
                operator,
                right,
                ..
            } => {
                let left = self.resolve_type_literal(left, frame)?;
                let right = self.resolve_type_literal(right, frame)?;
                let kind = if operator == "|" {
                    TypeKind::Union
                } else {
                    TypeKind::Intersection
                };
                let mut composed = Type::new(left.base * right.base, kind);
                composed.arguments = vec![left, right];
                Ok(Rc::new(composed))
            }
            TypeLiteral::TypedLiteral { target, value, .. } => {
                let parent = self.resolve_type_literal(target, frame)?;
                let mut child = Type::new(parent.base * self.primes.next_prime(), TypeKind::Literal);
                child.parameters = parent.parameters.clone();
                child.metadata = Some(literal_value(value)?);
                Ok(Rc::new(child))
            }
            TypeLiteral::StructLiteral { fields, location } => {
                let map = self.builtin("map", location)?;
                let mut stack = ParameterStack::new();
                for field in fields {
                    let ty = self.resolve_type_literal(&field.ty, frame)?;
                    if !stack.set_property(&field.name.value, ty) {
                        return Err(type_error(
                            MessageCode::DuplicateField,
                            &[&field.name.value],
                            field.name.location.clone(),
                        ));
                    }
                }
                let mut composed =
                    Type::new(map.base * self.primes.next_prime(), TypeKind::Struct);
                composed.parameters = stack;
                Ok(Rc::new(composed))
            }
            TypeLiteral::FunctionType {
                signature,
                location,
            } => self.resolve_signature(
                &signature.generics,
                &signature.parameters,
                signature.returns.as_ref(),
                frame,
                location,
            ),
        }
    }

    /// Resolve a function signature to a `function`-based type. Parameter
    /// and return types see the signature's own generics through a partial
    /// extension, layered over the caller's frame.
    pub(crate) fn resolve_signature(
        &mut self,
        generics: &[GenericParameter],
        parameters: &[Parameter],
        returns: Option<&TypeLiteral>,
        frame: Option<&ParameterStack>,
        location: &Location,
    ) -> TypeResult<Rc<Type>> {
        let function = self.builtin("function", location)?;

        let mut stack = ParameterStack::new();
        for generic in generics {
            let bound = match &generic.constraint {
                Some(constraint) => self.resolve_type_literal(constraint, frame)?,
                None => self.builtin("any", location)?,
            };
            stack.push_generic(&generic.name.value, bound);
        }

        let partial = self.extend(&function, Vec::new(), stack.clone());
        let mut scope = partial.parameters.clone();
        if let Some(outer) = frame {
            for binding in outer.generics() {
                if scope.generic(&binding.name).is_none() {
                    scope.push_generic(&binding.name, Rc::clone(&binding.bound));
                }
            }
        }

        for (index, parameter) in parameters.iter().enumerate() {
            let ty = self.resolve_type_literal(&parameter.ty, Some(&scope))?;
            stack.set_parameter(index as u32, ty);
        }
        if let Some(returns) = returns {
            let ty = self.resolve_type_literal(returns, Some(&scope))?;
            stack.set_return(ty);
        }

        Ok(self.extend(&function, Vec::new(), stack))
    }

    fn define_type(
        &mut self,
        name: &crate::ast::Identifier,
        generics: &[GenericParameter],
        definition: &TypeLiteral,
    ) -> TypeResult<()> {
        if self.symbols.contains_key(&name.value) {
            return Err(type_error(
                MessageCode::DuplicateDefinition,
                &[&name.value],
                name.location.clone(),
            ));
        }

        let mut own = ParameterStack::new();
        for generic in generics {
            let bound = match &generic.constraint {
                Some(constraint) => self.resolve_type_literal(constraint, None)?,
                None => self.builtin("any", &name.location)?,
            };
            own.push_generic(&generic.name.value, bound);
        }

        let reference = self.resolve_type_literal(definition, Some(&own))?;
        let slots = reference.parameters.generics().len();
        if generics.len() > slots {
            return Err(type_error(
                MessageCode::WrongArgumentCount,
                &[
                    &name.value,
                    &slots.to_string(),
                    &generics.len().to_string(),
                ],
                name.location.clone(),
            ));
        }

        // carry the reference's slots under this definition's own names;
        // binding first keeps the alias open with the declared constraint
        let mut stack = reference.parameters.clone();
        for (index, generic) in generics.iter().enumerate() {
            if let Some(own_binding) = own.generic_at(index as u32) {
                stack.bind_generic(index as u32, Rc::clone(&own_binding.bound));
            }
            stack.alias_generic(index as u32, &generic.name.value);
        }

        let registered = self.extend(&reference, Vec::new(), stack);
        self.symbols.insert(name.value.clone(), registered);
        Ok(())
    }

    fn define_trait(
        &mut self,
        name: &crate::ast::Identifier,
        generics: &[GenericParameter],
        methods: &[crate::ast::UnboundSignature],
    ) -> TypeResult<()> {
        if self.symbols.contains_key(&name.value) {
            return Err(type_error(
                MessageCode::DuplicateDefinition,
                &[&name.value],
                name.location.clone(),
            ));
        }

        let map = self.builtin("map", &name.location)?;
        let mut stack = ParameterStack::new();
        for generic in generics {
            let bound = match &generic.constraint {
                Some(constraint) => self.resolve_type_literal(constraint, None)?,
                None => self.builtin("any", &name.location)?,
            };
            stack.push_generic(&generic.name.value, bound);
        }

        let frame = stack.clone();
        for (index, method) in methods.iter().enumerate() {
            let ty = self.resolve_signature(
                &method.generics,
                &method.parameters,
                method.returns.as_ref(),
                Some(&frame),
                &method.location,
            )?;
            stack.set_method(index as u32, ty);
        }

        let mut composed = Type::new(map.base * self.primes.next_prime(), TypeKind::Trait);
        composed.parameters = stack;
        self.symbols.insert(name.value.clone(), Rc::new(composed));
        Ok(())
    }

    fn builtin(&self, name: &str, location: &Location) -> TypeResult<Rc<Type>> {
        match self.symbols.get(name) {
            Some(ty) => Ok(Rc::clone(ty)),
            None => Err(type_error(
                MessageCode::UnknownType,
                &[name],
                location.clone(),
            )),
        }
    }
}

impl Default for Typechecker {
    fn default() -> Self {
        Typechecker::new()
    }
}

fn literal_value(expr: &Expr) -> TypeResult<LiteralValue> {
    match expr {
        Expr::StringLiteral { value, .. } => Ok(LiteralValue::Str(value.clone())),
        Expr::RuneLiteral { value, .. } => Ok(LiteralValue::Rune(value.clone())),
        Expr::BoolLiteral { value, .. } => Ok(LiteralValue::Bool(*value)),
        Expr::NumberLiteral { value, .. } => Ok(match value {
            NumberValue::Int(value) => LiteralValue::Int(*value),
            NumberValue::Float(value) => LiteralValue::Float(*value),
        }),
        _ => Err(Error::anonymous(
            ErrorKind::TypeError,
            MessageCode::InvalidValue,
            &["typed"],
        )),
    }
}
