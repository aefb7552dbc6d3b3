//! Recursive-descent parser.
//!
//! The parser owns the full token stream (whitespace included) and an
//! offset into it. Two skip flavors exist: [`Parser::skip_space`] stays on
//! the current line, which is what makes statements newline-terminated,
//! while [`Parser::skip_all`] also crosses newlines and lifts comments off
//! the stream. Structural tokens (`)`, `{`, `,`) are consumed through
//! `must_expect`, which skips everything.
//!
//! Every entry point returns `ParseResult`; the first syntax error aborts
//! the whole parse.

mod expr;
mod stmt;
mod types;

use crate::ast::{Ast, Comment, Identifier};
use crate::error::{syntax, Error, MessageCode};
use crate::lexer::{lex, Token, TokenKind};
use crate::location::Location;

pub type ParseResult<T> = Result<T, Box<Error>>;

/// Lexical context flags, threaded by value through the descent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    pub in_function: bool,
    pub in_bound_function: bool,
    pub in_generator: bool,
    pub in_loop: bool,
    pub in_match_predicate: bool,
}

impl Context {
    /// Entering a function body resets the loop and match flags; a `break`
    /// in a closure does not belong to the enclosing loop.
    pub fn function(self) -> Self {
        Context {
            in_function: true,
            in_bound_function: self.in_bound_function,
            in_generator: false,
            in_loop: false,
            in_match_predicate: false,
        }
    }

    pub fn bound_function(self) -> Self {
        Context {
            in_function: true,
            in_bound_function: true,
            in_generator: false,
            in_loop: false,
            in_match_predicate: false,
        }
    }

    pub fn generator(self) -> Self {
        Context {
            in_generator: true,
            ..self.function()
        }
    }

    pub fn looped(self) -> Self {
        Context {
            in_loop: true,
            ..self
        }
    }

    pub fn match_predicate(self) -> Self {
        Context {
            in_match_predicate: true,
            ..self
        }
    }
}

/// Parse a whole source file. Lexer errors propagate unchanged.
pub fn parse(source: &str, file_path: &str) -> ParseResult<Ast> {
    let file_name = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
        .to_string();
    let tokens = lex(source, &file_name)?;
    let mut parser = Parser::new(tokens);
    parser.parse_program(&file_name, file_path)
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    offset: usize,
    pub(crate) comments: Vec<Comment>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::Eof)
        ));
        Parser {
            tokens,
            offset: 0,
            comments: Vec::new(),
        }
    }

    /// The current token; the stream is terminated by `Eof`, which is
    /// never consumed.
    pub fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.offset.min(last)]
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.offset += 1;
        }
        token
    }

    pub fn snapshot(&self) -> usize {
        self.offset
    }

    pub fn restore(&mut self, snapshot: usize) {
        self.offset = snapshot;
    }

    /// Skip whitespace on the current line only.
    pub fn skip_space(&mut self) {
        while self.current().kind == TokenKind::Whitespace {
            self.offset += 1;
        }
    }

    /// Skip whitespace and newlines, stopping at comments so statement
    /// dispatch can turn them into comment statements.
    pub fn skip_blank(&mut self) {
        while matches!(
            self.current().kind,
            TokenKind::Whitespace | TokenKind::Newline
        ) {
            self.offset += 1;
        }
    }

    /// Skip whitespace, newlines and comments; skipped comments are
    /// preserved on the AST's comment list.
    pub fn skip_all(&mut self) {
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::Whitespace | TokenKind::Newline => {
                    self.offset += 1;
                }
                TokenKind::LineComment | TokenKind::BlockComment => {
                    self.comments.push(Comment {
                        text: token.literal.clone(),
                        multiline: token.kind == TokenKind::BlockComment,
                        location: token.location.clone(),
                    });
                    self.offset += 1;
                }
                _ => return,
            }
        }
    }

    /// Consume the next significant token, failing unless its kind is one
    /// of `kinds`.
    pub fn must_expect(&mut self, kinds: &[TokenKind]) -> ParseResult<Token> {
        self.skip_all();
        let token = self.current();
        if token.kind == TokenKind::Eof {
            return Err(syntax(
                MessageCode::UnexpectedEof,
                &[],
                token.location.clone(),
            ));
        }
        if kinds.contains(&token.kind) {
            return Ok(self.advance());
        }
        let expected = kinds
            .iter()
            .map(|kind| kind.describe())
            .collect::<Vec<_>>()
            .join(" or ");
        let literal = token.literal.clone();
        Err(syntax(
            MessageCode::UnexpectedTokenExpected,
            &[&literal, &expected],
            token.location.clone(),
        ))
    }

    /// Consume the next significant token if its kind is one of `kinds`.
    pub fn might_expect(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        self.skip_all();
        if kinds.contains(&self.current().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// `might_expect` restricted to the current line.
    pub fn might_expect_inline(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        self.skip_space();
        if kinds.contains(&self.current().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.must_expect(&[TokenKind::Ident])?;
        Ok(Identifier::new(token.literal, token.location))
    }

    pub fn unexpected<T>(&self) -> ParseResult<T> {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            return Err(syntax(
                MessageCode::UnexpectedEof,
                &[],
                token.location.clone(),
            ));
        }
        let literal = token.literal.clone();
        Err(syntax(
            MessageCode::UnexpectedToken,
            &[&literal],
            token.location.clone(),
        ))
    }

    pub fn illegal<T>(&self, what: &str, context: &str, location: Location) -> ParseResult<T> {
        Err(syntax(MessageCode::IllegalConstruct, &[what, context], location))
    }
}
