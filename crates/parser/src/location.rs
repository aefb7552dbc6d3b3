//! Source positions carried by every token and AST node.

use serde::Serialize;
use text_size::TextSize;

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

/// Where a token or node came from: file name, byte offset, and the
/// 1-based start/end line/column of the covered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub offset: u32,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(file: impl Into<String>, offset: TextSize, start: Position, end: Position) -> Self {
        Location {
            file: file.into(),
            offset: offset.into(),
            start,
            end,
        }
    }

    /// A location covering both `self` and `other`.
    ///
    /// `other` is assumed to come later in the same file.
    pub fn cover(&self, other: &Location) -> Location {
        Location {
            file: self.file.clone(),
            offset: self.offset,
            start: self.start,
            end: other.end,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} in {}",
            self.start.line, self.start.column, self.file
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_spans_both_locations() {
        let a = Location::new("t.mb", TextSize::from(0), Position::new(1, 1), Position::new(1, 4));
        let b = Location::new("t.mb", TextSize::from(10), Position::new(2, 1), Position::new(2, 9));
        let c = a.cover(&b);
        assert_eq!(c.offset, 0);
        assert_eq!(c.start, Position::new(1, 1));
        assert_eq!(c.end, Position::new(2, 9));
    }
}
