//! Front end of the Moonbite language: a hand-written lexer, a
//! recursive-descent parser producing a JSON-serializable AST, and a
//! typechecker whose subtype oracle is prime-factor divisibility.
//!
//! ```
//! let ast = moonbite_parser::parse("package main", "main.mb").unwrap();
//! assert_eq!(ast.package_name(), "main");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod typecheck;

pub use ast::Ast;
pub use error::{Error, ErrorKind};
pub use lexer::{lex, Token, TokenKind};
pub use location::{Location, Position};
pub use parser::{parse, ParseResult};
pub use typecheck::{Type, Typechecker};
