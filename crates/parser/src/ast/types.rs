//! Type literal and signature nodes.

use super::{Expr, Identifier};
use crate::location::Location;
use serde::Serialize;

/// One `name<index>` generic slot, optionally constrained to a type.
/// Indices are contiguous from 0 within each definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericParameter {
    pub name: Identifier,
    pub index: u32,
    pub constraint: Option<TypeLiteral>,
    pub location: Location,
}

/// One `name type` function parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: Identifier,
    #[serde(rename = "type")]
    pub ty: TypeLiteral,
    pub variadic: bool,
    pub location: Location,
}

/// One `name type;` field of a struct literal type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructField {
    pub name: Identifier,
    #[serde(rename = "type")]
    pub ty: TypeLiteral,
    pub hidden: bool,
    pub location: Location,
}

/// Signature of an anonymous function expression or a function type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymousSignature {
    pub generics: Vec<GenericParameter>,
    pub parameters: Vec<Parameter>,
    pub returns: Option<TypeLiteral>,
    pub location: Location,
}

/// Signature of a free function definition or a trait method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnboundSignature {
    pub name: Identifier,
    pub generics: Vec<GenericParameter>,
    pub parameters: Vec<Parameter>,
    pub returns: Option<TypeLiteral>,
    pub location: Location,
}

/// Signature of a `fun for T name(…)` bound function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundSignature {
    pub receiver: TypeLiteral,
    pub signature: UnboundSignature,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type_kind")]
pub enum TypeLiteral {
    /// `T` or `T<A, B>`.
    TypeIdentifier {
        name: Identifier,
        generics: Vec<TypeLiteral>,
        location: Location,
    },
    /// `{ field type; … }`.
    StructLiteral {
        fields: Vec<StructField>,
        location: Location,
    },
    /// `A | B` (union) or `A & B` (intersection); right-associative.
    OperatedType {
        left: Box<TypeLiteral>,
        operator: String,
        right: Box<TypeLiteral>,
        location: Location,
    },
    /// `(T)`.
    GroupType {
        #[serde(rename = "type")]
        ty: Box<TypeLiteral>,
        location: Location,
    },
    /// `T(literal)`, a named subtype tagged with one literal value.
    TypedLiteral {
        target: Box<TypeLiteral>,
        value: Box<Expr>,
        location: Location,
    },
    /// `fun(…) T`; boxed since the signature's return type recurses.
    FunctionType {
        signature: Box<AnonymousSignature>,
        location: Location,
    },
}

impl TypeLiteral {
    pub fn location(&self) -> &Location {
        match self {
            TypeLiteral::TypeIdentifier { location, .. }
            | TypeLiteral::StructLiteral { location, .. }
            | TypeLiteral::OperatedType { location, .. }
            | TypeLiteral::GroupType { location, .. }
            | TypeLiteral::TypedLiteral { location, .. }
            | TypeLiteral::FunctionType { location, .. } => location,
        }
    }
}
