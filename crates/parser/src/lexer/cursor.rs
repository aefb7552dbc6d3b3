//! Low-level character cursor with position tracking.

use crate::location::Position;
use text_size::TextSize;

/// A cursor over the source's characters that tracks the byte offset and
/// the 1-based line/column of the next character.
///
/// Column resets to 1 after a line break; `\n` and `\r` each count as one
/// break.
pub struct Cursor<'s> {
    source: &'s str,
    chars: Vec<char>,
    position: usize,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Self {
        Cursor {
            source,
            chars: source.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    pub fn peek_second(&self) -> Option<char> {
        self.chars.get(self.position + 2).copied()
    }

    /// Consume and return the current character, updating offset and
    /// line/column bookkeeping.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.position += 1;
        self.offset += ch.len_utf8();
        if ch == '\n' || ch == '\r' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Byte offset of the next character.
    pub fn offset(&self) -> TextSize {
        TextSize::from(self.offset as u32)
    }

    /// Position of the next character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The raw source slice between two byte offsets.
    pub fn slice(&self, from: TextSize, to: TextSize) -> &'s str {
        &self.source[u32::from(from) as usize..u32::from(to) as usize]
    }
}
