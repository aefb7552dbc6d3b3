//! Expression nodes.

use super::types::{AnonymousSignature, TypeLiteral};
use super::{Identifier, Stmt};
use crate::location::Location;
use serde::Serialize;

/// A number literal's parsed value. Serializes as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

/// One `key: value` entry of a map literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
    pub location: Location,
}

/// One `name: value` member of an instance literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceMember {
    pub name: Identifier,
    pub value: Expr,
    pub location: Location,
}

/// One `(predicate) { body }` arm of a match expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBlock {
    pub predicate: Expr,
    pub body: Vec<Stmt>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Identifier {
        value: String,
        location: Location,
    },
    StringLiteral {
        value: String,
        location: Location,
    },
    RuneLiteral {
        value: String,
        location: Location,
    },
    NumberLiteral {
        value: NumberValue,
        location: Location,
    },
    BoolLiteral {
        value: bool,
        location: Location,
    },
    ListLiteral {
        elements: Vec<Expr>,
        location: Location,
    },
    MapLiteral {
        entries: Vec<MapEntry>,
        location: Location,
    },
    /// `T{…}` or `T<G>{…}`, target is an identifier or member expression.
    InstanceLiteral {
        target: Box<Expr>,
        generics: Vec<TypeLiteral>,
        members: Vec<InstanceMember>,
        location: Location,
    },
    ArithmeticExpression {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
        location: Location,
    },
    /// Boolean `&&` / `||`.
    BinaryExpression {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
        location: Location,
    },
    ComparisonExpression {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
        location: Location,
    },
    CallExpression {
        target: Box<Expr>,
        arguments: Vec<Expr>,
        location: Location,
    },
    MemberExpression {
        target: Box<Expr>,
        property: Identifier,
        location: Location,
    },
    IndexExpression {
        target: Box<Expr>,
        index: Box<Expr>,
        location: Location,
    },
    GroupExpression {
        expression: Box<Expr>,
        location: Location,
    },
    MatchExpression {
        subject: Box<Expr>,
        blocks: Vec<MatchBlock>,
        base: Option<Vec<Stmt>>,
        location: Location,
    },
    /// The implicit scrutinee `.` inside a match predicate.
    MatchSelfExpression {
        location: Location,
    },
    /// `^`, the last raised warning.
    CaretExpression {
        location: Location,
    },
    InstanceofExpression {
        left: Box<Expr>,
        #[serde(rename = "type")]
        right: TypeLiteral,
        location: Location,
    },
    ThisExpression {
        location: Location,
    },
    /// `++x`, `x++`, `--x`, `x--`.
    ArithmeticUnaryExpression {
        target: Box<Expr>,
        operator: String,
        prefix: bool,
        location: Location,
    },
    AnonymousFunExpression {
        signature: AnonymousSignature,
        body: Vec<Stmt>,
        location: Location,
    },
    /// `call() or fallback`; the fallback may be `giveup`.
    OrExpression {
        target: Box<Expr>,
        fallback: Box<Expr>,
        location: Location,
    },
    NotExpression {
        expression: Box<Expr>,
        location: Location,
    },
    GiveupExpression {
        location: Location,
    },
    CoroutFunExpression {
        function: Box<Expr>,
        location: Location,
    },
    GenFunExpression {
        function: Box<Expr>,
        location: Location,
    },
    WarnExpression {
        value: Box<Expr>,
        location: Location,
    },
    /// `expr.(T)`.
    TypeCastExpression {
        target: Box<Expr>,
        #[serde(rename = "type")]
        ty: TypeLiteral,
        location: Location,
    },
}

impl Expr {
    pub fn location(&self) -> &Location {
        match self {
            Expr::Identifier { location, .. }
            | Expr::StringLiteral { location, .. }
            | Expr::RuneLiteral { location, .. }
            | Expr::NumberLiteral { location, .. }
            | Expr::BoolLiteral { location, .. }
            | Expr::ListLiteral { location, .. }
            | Expr::MapLiteral { location, .. }
            | Expr::InstanceLiteral { location, .. }
            | Expr::ArithmeticExpression { location, .. }
            | Expr::BinaryExpression { location, .. }
            | Expr::ComparisonExpression { location, .. }
            | Expr::CallExpression { location, .. }
            | Expr::MemberExpression { location, .. }
            | Expr::IndexExpression { location, .. }
            | Expr::GroupExpression { location, .. }
            | Expr::MatchExpression { location, .. }
            | Expr::MatchSelfExpression { location }
            | Expr::CaretExpression { location }
            | Expr::InstanceofExpression { location, .. }
            | Expr::ThisExpression { location }
            | Expr::ArithmeticUnaryExpression { location, .. }
            | Expr::AnonymousFunExpression { location, .. }
            | Expr::OrExpression { location, .. }
            | Expr::NotExpression { location, .. }
            | Expr::GiveupExpression { location }
            | Expr::CoroutFunExpression { location, .. }
            | Expr::GenFunExpression { location, .. }
            | Expr::WarnExpression { location, .. }
            | Expr::TypeCastExpression { location, .. } => location,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expr::CallExpression { .. })
    }

    /// Expressions that can name a type in an instance literal.
    pub fn names_type(&self) -> bool {
        matches!(
            self,
            Expr::Identifier { .. } | Expr::MemberExpression { .. }
        )
    }
}

impl From<Identifier> for Expr {
    fn from(identifier: Identifier) -> Self {
        Expr::Identifier {
            value: identifier.value,
            location: identifier.location,
        }
    }
}
