//! AST data model shared by the parser, typechecker and compiler.
//!
//! The tree serializes to the JSON wire format tools consume: statement and
//! expression nodes carry a `kind` string tag, type nodes a `type_kind`
//! tag, and every node a `location` object. Tags are stable; renaming one
//! is a breaking change for downstream consumers.

pub mod expr;
pub mod stmt;
pub mod types;

pub use expr::{Expr, InstanceMember, MapEntry, MatchBlock, NumberValue};
pub use stmt::{ElseIfBlock, Stmt};
pub use types::{
    AnonymousSignature, BoundSignature, GenericParameter, Parameter, StructField, TypeLiteral,
    UnboundSignature,
};

use crate::location::Location;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A named reference or name-introducing occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: Location,
}

impl Identifier {
    pub fn new(value: impl Into<String>, location: Location) -> Self {
        Identifier {
            value: value.into(),
            location,
        }
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Identifier", 3)?;
        state.serialize_field("kind", "Identifier")?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("location", &self.location)?;
        state.end()
    }
}

/// A comment lifted off the token stream and preserved alongside the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub multiline: bool,
    pub location: Location,
}

/// A fully parsed source file.
///
/// `package` is always the `PackageStatement` variant and `uses` holds only
/// `UseStatement` variants; the parser enforces both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ast {
    pub file_name: String,
    pub file_path: String,
    pub package: Stmt,
    pub uses: Vec<Stmt>,
    pub definitions: Vec<Stmt>,
    pub comments: Vec<Comment>,
}

impl Ast {
    pub fn package_name(&self) -> &str {
        match &self.package {
            Stmt::Package { name, .. } => &name.value,
            _ => "",
        }
    }

    /// The JSON wire format consumed by surrounding tools.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
