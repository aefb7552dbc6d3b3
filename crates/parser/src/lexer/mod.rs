//! Hand-written lexer for Moonbite source.
//!
//! The lexer preserves every byte of the input: whitespace, newlines and
//! comments are tokens, and each token's `raw` field is the exact source
//! slice it was scanned from. The parser elides the insignificant kinds
//! with explicit skip steps.
//!
//! The first lexical error aborts the scan; no partial token stream is
//! exposed.

pub mod cursor;
pub mod token;

pub use token::{classify_word, Token, TokenKind};

use crate::error::{syntax, Error, MessageCode};
use crate::location::{Location, Position};
use cursor::Cursor;
use text_size::TextSize;

/// Tokenize `source`. `file_name` is attached to every location.
pub fn lex(source: &str, file_name: &str) -> Result<Vec<Token>, Box<Error>> {
    let mut lexer = Lexer::new(source, file_name);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'s> {
    cursor: Cursor<'s>,
    file: &'s str,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str, file: &'s str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            file,
        }
    }

    fn location(&self, offset: TextSize, start: Position) -> Location {
        Location::new(self.file, offset, start, self.cursor.position())
    }

    fn error(&self, code: MessageCode, args: &[&str], offset: TextSize, start: Position) -> Box<Error> {
        syntax(code, args, self.location(offset, start))
    }

    fn next_token(&mut self) -> Result<Token, Box<Error>> {
        let offset = self.cursor.offset();
        let start = self.cursor.position();

        let Some(ch) = self.cursor.current() else {
            return Ok(Token::new(
                TokenKind::Eof,
                String::new(),
                String::new(),
                self.location(offset, start),
            ));
        };

        match ch {
            '\n' | '\r' => {
                self.cursor.bump();
                Ok(self.token(TokenKind::Newline, offset, start).with_newlines(1))
            }
            c if c.is_whitespace() => self.scan_whitespace(offset, start),
            '"' => self.scan_string(offset, start),
            '`' => self.scan_multiline_string(offset, start),
            '\'' => self.scan_rune(offset, start),
            c if c.is_ascii_digit() => self.scan_number(offset, start),
            c if c.is_alphabetic() || c == '_' => self.scan_word(offset, start),
            '/' if self.cursor.peek() == Some('/') => self.scan_line_comment(offset, start),
            '/' if self.cursor.peek() == Some('*') => self.scan_block_comment(offset, start),
            _ => self.scan_operator(offset, start),
        }
    }

    /// Build a token whose literal equals its raw slice.
    fn token(&self, kind: TokenKind, offset: TextSize, start: Position) -> Token {
        let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
        Token::new(kind, raw.clone(), raw, self.location(offset, start))
    }

    fn scan_whitespace(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        while let Some(ch) = self.cursor.current() {
            if ch.is_whitespace() && ch != '\n' && ch != '\r' {
                self.cursor.bump();
            } else {
                break;
            }
        }
        Ok(self.token(TokenKind::Whitespace, offset, start))
    }

    fn scan_string(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        self.cursor.bump(); // opening quote
        let mut literal = String::new();
        loop {
            match self.cursor.current() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error(MessageCode::UnclosedConstruct, &["string"], offset, start));
                }
                Some('"') => {
                    self.cursor.bump();
                    let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
                    return Ok(Token::new(
                        TokenKind::String,
                        literal,
                        raw,
                        self.location(offset, start),
                    ));
                }
                Some('\\') => {
                    // The backslash is stripped from the literal; the escaped
                    // character is carried verbatim. The raw slice keeps both.
                    self.cursor.bump();
                    match self.cursor.bump() {
                        Some(escaped) => literal.push(escaped),
                        None => {
                            return Err(self.error(
                                MessageCode::UnclosedConstruct,
                                &["string"],
                                offset,
                                start,
                            ));
                        }
                    }
                }
                Some(ch) => {
                    literal.push(ch);
                    self.cursor.bump();
                }
            }
        }
    }

    fn scan_multiline_string(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        self.cursor.bump(); // opening backtick
        let mut literal = String::new();
        let mut newlines = 0u32;
        loop {
            match self.cursor.current() {
                None => {
                    return Err(self.error(MessageCode::UnclosedConstruct, &["string"], offset, start));
                }
                Some('`') => {
                    self.cursor.bump();
                    let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
                    return Ok(Token::new(
                        TokenKind::MultilineString,
                        literal,
                        raw,
                        self.location(offset, start),
                    )
                    .with_newlines(newlines));
                }
                Some(ch) => {
                    if ch == '\n' || ch == '\r' {
                        newlines += 1;
                    }
                    literal.push(ch);
                    self.cursor.bump();
                }
            }
        }
    }

    fn scan_rune(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        self.cursor.bump(); // opening quote
        let mut literal = String::new();
        loop {
            match self.cursor.current() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error(MessageCode::UnclosedConstruct, &["rune"], offset, start));
                }
                Some('\'') => {
                    self.cursor.bump();
                    break;
                }
                Some('\\') => {
                    self.cursor.bump();
                    match self.cursor.bump() {
                        Some(escaped) => literal.push(escaped),
                        None => {
                            return Err(self.error(
                                MessageCode::UnclosedConstruct,
                                &["rune"],
                                offset,
                                start,
                            ));
                        }
                    }
                }
                Some(ch) => {
                    literal.push(ch);
                    self.cursor.bump();
                }
            }
        }
        if literal.chars().count() != 1 {
            return Err(self.error(MessageCode::InvalidValue, &["rune"], offset, start));
        }
        let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
        Ok(Token::new(
            TokenKind::Rune,
            literal,
            raw,
            self.location(offset, start),
        ))
    }

    fn scan_number(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        // A leading zero may not be followed by another digit.
        if self.cursor.current() == Some('0') && self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.bump();
            self.cursor.bump();
            return Err(self.error(MessageCode::InvalidValue, &["number"], offset, start));
        }

        while self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.bump();
        }

        if self.cursor.current() == Some('.') && self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.bump();
            while self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
                self.cursor.bump();
            }

            // An exponent is only recognized after a fractional part. It is
            // only consumed when a digit actually follows, so `1.5e` lexes
            // as the number `1.5` and the identifier `e`.
            if matches!(self.cursor.current(), Some('e') | Some('E')) {
                let signed = matches!(self.cursor.peek(), Some('+') | Some('-'));
                let digit = if signed {
                    self.cursor.peek_second()
                } else {
                    self.cursor.peek()
                };
                if digit.is_some_and(|c| c.is_ascii_digit()) {
                    self.cursor.bump();
                    if signed {
                        self.cursor.bump();
                    }
                    while self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
                        self.cursor.bump();
                    }
                }
            }
        }

        Ok(self.token(TokenKind::Number, offset, start))
    }

    fn scan_word(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        while let Some(ch) = self.cursor.current() {
            if ch.is_alphanumeric() || ch == '_' {
                self.cursor.bump();
            } else {
                break;
            }
        }
        let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
        let kind = classify_word(&raw);
        Ok(Token::new(
            kind,
            raw.clone(),
            raw,
            self.location(offset, start),
        ))
    }

    fn scan_line_comment(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        self.cursor.bump();
        self.cursor.bump();
        let text_start = self.cursor.offset();
        while let Some(ch) = self.cursor.current() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.cursor.bump();
        }
        let literal = self.cursor.slice(text_start, self.cursor.offset()).to_string();
        let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
        Ok(Token::new(
            TokenKind::LineComment,
            literal,
            raw,
            self.location(offset, start),
        ))
    }

    fn scan_block_comment(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        self.cursor.bump();
        self.cursor.bump();
        let text_start = self.cursor.offset();
        let mut newlines = 0u32;
        loop {
            match self.cursor.current() {
                None => {
                    return Err(self.error(MessageCode::UnclosedConstruct, &["comment"], offset, start));
                }
                Some('*') if self.cursor.peek() == Some('/') => {
                    let text_end = self.cursor.offset();
                    self.cursor.bump();
                    self.cursor.bump();
                    let literal = self.cursor.slice(text_start, text_end).to_string();
                    let raw = self.cursor.slice(offset, self.cursor.offset()).to_string();
                    return Ok(Token::new(
                        TokenKind::BlockComment,
                        literal,
                        raw,
                        self.location(offset, start),
                    )
                    .with_newlines(newlines));
                }
                Some(ch) => {
                    if ch == '\n' || ch == '\r' {
                        newlines += 1;
                    }
                    self.cursor.bump();
                }
            }
        }
    }

    fn scan_operator(&mut self, offset: TextSize, start: Position) -> Result<Token, Box<Error>> {
        let ch = self.cursor.bump().expect("caller checked current()");
        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '^' => TokenKind::Caret,
            '.' => {
                if self.cursor.current() == Some('.') && self.cursor.peek() == Some('.') {
                    self.cursor.bump();
                    self.cursor.bump();
                    TokenKind::VariadicMarker
                } else {
                    TokenKind::Dot
                }
            }
            '+' => match self.cursor.current() {
                Some('+') => {
                    self.cursor.bump();
                    TokenKind::Increment
                }
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ArithmeticAssignment
                }
                _ => TokenKind::Plus,
            },
            '-' => match self.cursor.current() {
                Some('-') => {
                    self.cursor.bump();
                    TokenKind::Decrement
                }
                Some('>') => {
                    self.cursor.bump();
                    TokenKind::Then
                }
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ArithmeticAssignment
                }
                _ => TokenKind::Minus,
            },
            '*' => match self.cursor.current() {
                Some('*') => {
                    self.cursor.bump();
                    TokenKind::Power
                }
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ArithmeticAssignment
                }
                _ => TokenKind::Star,
            },
            '/' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ArithmeticAssignment
                }
                _ => TokenKind::Slash,
            },
            '%' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ArithmeticAssignment
                }
                _ => TokenKind::Percent,
            },
            '=' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ComparisonOperator
                }
                _ => TokenKind::Assign,
            },
            '!' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ComparisonOperator
                }
                _ => TokenKind::Bang,
            },
            '<' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ComparisonOperator
                }
                Some('-') => {
                    self.cursor.bump();
                    TokenKind::Channel
                }
                _ => TokenKind::ComparisonOperator,
            },
            '>' => match self.cursor.current() {
                Some('=') => {
                    self.cursor.bump();
                    TokenKind::ComparisonOperator
                }
                _ => TokenKind::ComparisonOperator,
            },
            '&' => match self.cursor.current() {
                Some('&') => {
                    self.cursor.bump();
                    TokenKind::BinaryOperator
                }
                _ => TokenKind::Ampersand,
            },
            '|' => match self.cursor.current() {
                Some('|') => {
                    self.cursor.bump();
                    TokenKind::BinaryOperator
                }
                _ => TokenKind::Pipe,
            },
            other => {
                let text = other.to_string();
                return Err(self.error(MessageCode::UnexpectedToken, &[&text], offset, start));
            }
        };
        Ok(self.token(kind, offset, start))
    }
}
