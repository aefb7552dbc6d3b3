//! Shared error value for the whole compiler.
//!
//! All three phases report failures through the same [`Error`] struct so
//! that tools downstream see one wire format: `{kind, reason, location,
//! exists, anonymous}`. The first error encountered aborts the phase; there
//! is no recovery pass and no partial result travels alongside an error.

pub mod catalog;

pub use catalog::{render, MessageCode};

use crate::location::Location;
use serde::Serialize;

/// Which phase produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    SyntaxError,
    TypeError,
    CompileError,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::CompileError => "CompileError",
        }
    }
}

/// A single diagnostic. `anonymous` errors carry no meaningful location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub reason: String,
    pub location: Option<Location>,
    pub exists: bool,
    pub anonymous: bool,
}

impl Error {
    pub fn new(kind: ErrorKind, code: MessageCode, args: &[&str], location: Location) -> Box<Self> {
        Box::new(Error {
            kind,
            reason: render(code, args),
            location: Some(location),
            exists: true,
            anonymous: false,
        })
    }

    /// An error with no meaningful source location.
    pub fn anonymous(kind: ErrorKind, code: MessageCode, args: &[&str]) -> Box<Self> {
        Box::new(Error {
            kind,
            reason: render(code, args),
            location: None,
            exists: true,
            anonymous: true,
        })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => {
                write!(f, "{}: {} at {}", self.kind.name(), self.reason, location)
            }
            None => write!(f, "{}: {}", self.kind.name(), self.reason),
        }
    }
}

impl std::error::Error for Error {}

/// Create a syntax error at `location`.
#[inline]
pub fn syntax(code: MessageCode, args: &[&str], location: Location) -> Box<Error> {
    Error::new(ErrorKind::SyntaxError, code, args, location)
}

/// Create a type error at `location`.
#[inline]
pub fn type_error(code: MessageCode, args: &[&str], location: Location) -> Box<Error> {
    Error::new(ErrorKind::TypeError, code, args, location)
}

/// Create a compile error at `location`.
#[inline]
pub fn compile(code: MessageCode, args: &[&str], location: Location) -> Box<Error> {
    Error::new(ErrorKind::CompileError, code, args, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Position;
    use text_size::TextSize;

    fn loc() -> Location {
        Location::new("main.mb", TextSize::from(4), Position::new(2, 3), Position::new(2, 7))
    }

    #[test]
    fn display_includes_position_and_file() {
        let err = syntax(MessageCode::UnexpectedToken, &["}"], loc());
        assert_eq!(err.to_string(), "SyntaxError: unexpected token '}' at 2:3 in main.mb");
    }

    #[test]
    fn anonymous_errors_omit_location() {
        let err = Error::anonymous(ErrorKind::CompileError, MessageCode::EmptyYield, &[]);
        assert!(err.anonymous);
        assert_eq!(err.to_string(), "CompileError: yield requires a value");
    }
}
