//! Statement nodes.

use super::types::{BoundSignature, GenericParameter, TypeLiteral, UnboundSignature};
use super::{Expr, Identifier};
use crate::location::Location;
use serde::Serialize;

/// One `else if (predicate) { body }` block of an if statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseIfBlock {
    pub predicate: Expr,
    pub body: Vec<Stmt>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    #[serde(rename = "PackageStatement")]
    Package {
        name: Identifier,
        location: Location,
    },
    #[serde(rename = "UseStatement")]
    Use {
        resource: String,
        #[serde(rename = "as")]
        alias: Option<Identifier>,
        location: Location,
    },
    #[serde(rename = "DeclarationStatement")]
    Declaration {
        name: Identifier,
        /// `const` rather than `var`.
        constant: bool,
        hidden: bool,
        #[serde(rename = "type")]
        ty: Option<TypeLiteral>,
        value: Option<Expr>,
        location: Location,
    },
    #[serde(rename = "AssignmentStatement")]
    Assignment {
        target: Expr,
        /// `=` or one of the arithmetic assignment operators.
        operator: String,
        value: Expr,
        location: Location,
    },
    #[serde(rename = "TypeDefinitionStatement")]
    TypeDefinition {
        name: Identifier,
        generics: Vec<GenericParameter>,
        definition: TypeLiteral,
        hidden: bool,
        location: Location,
    },
    #[serde(rename = "TraitDefinitionStatement")]
    TraitDefinition {
        name: Identifier,
        generics: Vec<GenericParameter>,
        methods: Vec<UnboundSignature>,
        hidden: bool,
        location: Location,
    },
    #[serde(rename = "UnboundFunDefinitionStatement")]
    UnboundFunDefinition {
        signature: UnboundSignature,
        body: Vec<Stmt>,
        hidden: bool,
        location: Location,
    },
    #[serde(rename = "BoundFunDefinitionStatement")]
    BoundFunDefinition {
        signature: BoundSignature,
        body: Vec<Stmt>,
        hidden: bool,
        location: Location,
    },
    #[serde(rename = "ReturnStatement")]
    Return {
        value: Option<Expr>,
        location: Location,
    },
    #[serde(rename = "YieldStatement")]
    Yield {
        value: Option<Expr>,
        location: Location,
    },
    #[serde(rename = "BreakStatement")]
    Break { location: Location },
    #[serde(rename = "ContinueStatement")]
    Continue { location: Location },
    #[serde(rename = "DeferStatement")]
    Defer {
        value: Expr,
        location: Location,
    },
    #[serde(rename = "ExpressionStatement")]
    Expression {
        expression: Expr,
        location: Location,
    },
    #[serde(rename = "LoopStatement")]
    Loop {
        /// Absent for an unconditional loop.
        predicate: Option<Expr>,
        body: Vec<Stmt>,
        location: Location,
    },
    #[serde(rename = "IfStatement")]
    If {
        predicate: Expr,
        body: Vec<Stmt>,
        else_ifs: Vec<ElseIfBlock>,
        else_body: Option<Vec<Stmt>>,
        location: Location,
    },
    #[serde(rename = "SingleLineComment")]
    SingleLineComment {
        text: String,
        location: Location,
    },
    #[serde(rename = "MultiLineComment")]
    MultiLineComment {
        text: String,
        location: Location,
    },
}

impl Stmt {
    pub fn location(&self) -> &Location {
        match self {
            Stmt::Package { location, .. }
            | Stmt::Use { location, .. }
            | Stmt::Declaration { location, .. }
            | Stmt::Assignment { location, .. }
            | Stmt::TypeDefinition { location, .. }
            | Stmt::TraitDefinition { location, .. }
            | Stmt::UnboundFunDefinition { location, .. }
            | Stmt::BoundFunDefinition { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Yield { location, .. }
            | Stmt::Break { location }
            | Stmt::Continue { location }
            | Stmt::Defer { location, .. }
            | Stmt::Expression { location, .. }
            | Stmt::Loop { location, .. }
            | Stmt::If { location, .. }
            | Stmt::SingleLineComment { location, .. }
            | Stmt::MultiLineComment { location, .. } => location,
        }
    }

    /// Whether a top-level statement may carry the `hidden` flag.
    pub fn supports_hidden(&self) -> bool {
        matches!(
            self,
            Stmt::Declaration { .. }
                | Stmt::TypeDefinition { .. }
                | Stmt::TraitDefinition { .. }
                | Stmt::UnboundFunDefinition { .. }
                | Stmt::BoundFunDefinition { .. }
        )
    }
}
