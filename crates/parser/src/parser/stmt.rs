//! Statement parsing: the top-level grammar and block bodies.

use super::expr::starts_expression;
use super::types::starts_type;
use super::{Context, ParseResult, Parser};
use crate::ast::{Ast, Comment, ElseIfBlock, Stmt};
use crate::error::{syntax, MessageCode};
use crate::lexer::TokenKind;
use crate::location::Location;

impl Parser {
    pub fn parse_program(&mut self, file_name: &str, file_path: &str) -> ParseResult<Ast> {
        let package = self.parse_package()?;
        let mut uses = Vec::new();
        let mut definitions = Vec::new();

        loop {
            self.skip_blank();
            let token = self.current().clone();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::LineComment | TokenKind::BlockComment => {
                    self.comments.push(Comment {
                        text: token.literal,
                        multiline: token.kind == TokenKind::BlockComment,
                        location: token.location,
                    });
                    self.advance();
                }
                TokenKind::Use => uses.push(self.parse_use()?),
                TokenKind::Hidden => {
                    self.advance();
                    self.skip_blank();
                    let definition = self.parse_definition(true)?;
                    definitions.push(definition);
                }
                _ => definitions.push(self.parse_definition(false)?),
            }
        }

        Ok(Ast {
            file_name: file_name.to_string(),
            file_path: file_path.to_string(),
            package,
            uses,
            definitions,
            comments: std::mem::take(&mut self.comments),
        })
    }

    fn parse_package(&mut self) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Package])?;
        let name = self.expect_identifier()?;
        let location = keyword.location.cover(&name.location);
        Ok(Stmt::Package { name, location })
    }

    fn parse_use(&mut self) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Use])?;
        let resource = self.must_expect(&[TokenKind::String])?;
        let mut location = keyword.location.cover(&resource.location);
        let alias = if self.might_expect_inline(&[TokenKind::As]).is_some() {
            let alias = self.expect_identifier()?;
            location = location.cover(&alias.location);
            Some(alias)
        } else {
            None
        };
        Ok(Stmt::Use {
            resource: resource.literal,
            alias,
            location,
        })
    }

    /// A top-level definition, after any `hidden` prefix was consumed.
    fn parse_definition(&mut self, hidden: bool) -> ParseResult<Stmt> {
        let context = Context::default();
        match self.current().kind {
            TokenKind::Var | TokenKind::Const => self.parse_declaration(context, hidden),
            TokenKind::Type => self.parse_type_definition(hidden),
            TokenKind::Trait => self.parse_trait_definition(hidden),
            TokenKind::Fun => self.parse_fun_definition(context, hidden),
            _ if hidden => {
                let token = self.current().clone();
                self.illegal("hidden", "before this statement", token.location)
            }
            _ => self.unexpected(),
        }
    }

    fn parse_declaration(&mut self, context: Context, hidden: bool) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Var, TokenKind::Const])?;
        let name = self.expect_identifier()?;
        let mut location = keyword.location.cover(&name.location);

        self.skip_space();
        let ty = if starts_type(self.current().kind) {
            let ty = self.parse_type()?;
            location = location.cover(ty.location());
            Some(ty)
        } else {
            None
        };

        let value = if self.might_expect_inline(&[TokenKind::Assign]).is_some() {
            let value = self.parse_expression(context)?;
            location = location.cover(value.location());
            Some(value)
        } else {
            None
        };

        if ty.is_none() && value.is_none() {
            return Err(syntax(
                MessageCode::BareDeclaration,
                &[&name.value],
                location,
            ));
        }

        Ok(Stmt::Declaration {
            name,
            constant: keyword.kind == TokenKind::Const,
            hidden,
            ty,
            value,
            location,
        })
    }

    fn parse_type_definition(&mut self, hidden: bool) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Type])?;
        let name = self.expect_identifier()?;
        let generics = self.parse_optional_generics()?;
        let definition = self.parse_type()?;
        let location = keyword.location.cover(definition.location());
        Ok(Stmt::TypeDefinition {
            name,
            generics,
            definition,
            hidden,
            location,
        })
    }

    fn parse_trait_definition(&mut self, hidden: bool) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Trait])?;
        let name = self.expect_identifier()?;
        let generics = self.parse_optional_generics()?;
        self.must_expect(&[TokenKind::LeftBrace])?;

        let mut methods = Vec::new();
        let close = loop {
            match self.must_expect(&[TokenKind::Fun, TokenKind::RightBrace])? {
                token if token.kind == TokenKind::RightBrace => break token,
                _ => {
                    methods.push(self.parse_unbound_signature()?);
                    self.might_expect(&[TokenKind::Semicolon]);
                }
            }
        };

        let location = keyword.location.cover(&close.location);
        Ok(Stmt::TraitDefinition {
            name,
            generics,
            methods,
            hidden,
            location,
        })
    }

    fn parse_fun_definition(&mut self, context: Context, hidden: bool) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::Fun])?;

        if self.might_expect_inline(&[TokenKind::For]).is_some() {
            let receiver = self.parse_type()?;
            let signature = self.parse_unbound_signature()?;
            let (body, close) = self.parse_block(context.bound_function())?;
            let location = keyword.location.cover(&close);
            let signature_location = receiver.location().cover(&signature.location);
            return Ok(Stmt::BoundFunDefinition {
                signature: crate::ast::BoundSignature {
                    receiver,
                    signature,
                    location: signature_location,
                },
                body,
                hidden,
                location,
            });
        }

        let signature = self.parse_unbound_signature()?;
        let (body, close) = self.parse_block(context.function())?;
        let location = keyword.location.cover(&close);
        Ok(Stmt::UnboundFunDefinition {
            signature,
            body,
            hidden,
            location,
        })
    }

    /// `{ statement* }`. Returns the body and the closing brace location.
    pub(crate) fn parse_block(&mut self, context: Context) -> ParseResult<(Vec<Stmt>, Location)> {
        self.must_expect(&[TokenKind::LeftBrace])?;
        let mut body = Vec::new();
        loop {
            self.skip_blank();
            let token = self.current();
            match token.kind {
                TokenKind::RightBrace => {
                    let close = self.advance();
                    return Ok((body, close.location));
                }
                TokenKind::Eof => {
                    return Err(syntax(
                        MessageCode::UnexpectedEof,
                        &[],
                        token.location.clone(),
                    ));
                }
                _ => body.push(self.parse_statement(context)?),
            }
        }
    }

    pub(crate) fn parse_statement(&mut self, context: Context) -> ParseResult<Stmt> {
        self.skip_blank();
        let token = self.current().clone();
        match token.kind {
            TokenKind::LineComment => {
                self.advance();
                Ok(Stmt::SingleLineComment {
                    text: token.literal,
                    location: token.location,
                })
            }
            TokenKind::BlockComment => {
                self.advance();
                Ok(Stmt::MultiLineComment {
                    text: token.literal,
                    location: token.location,
                })
            }
            TokenKind::Var | TokenKind::Const => self.parse_declaration(context, false),
            TokenKind::Hidden => self.illegal("hidden", "inside a block", token.location),
            TokenKind::Return => {
                if !context.in_function {
                    return self.illegal("return", "outside a function body", token.location);
                }
                self.advance();
                let value = self.parse_optional_value(context)?;
                let location = match &value {
                    Some(value) => token.location.cover(value.location()),
                    None => token.location,
                };
                Ok(Stmt::Return { value, location })
            }
            TokenKind::Yield => {
                if !context.in_generator {
                    return self.illegal("yield", "outside a generator body", token.location);
                }
                self.advance();
                let value = self.parse_optional_value(context)?;
                let location = match &value {
                    Some(value) => token.location.cover(value.location()),
                    None => token.location,
                };
                Ok(Stmt::Yield { value, location })
            }
            TokenKind::Break => {
                if !context.in_loop {
                    return self.illegal("break", "outside a loop body", token.location);
                }
                self.advance();
                Ok(Stmt::Break {
                    location: token.location,
                })
            }
            TokenKind::Continue => {
                if !context.in_loop {
                    return self.illegal("continue", "outside a loop body", token.location);
                }
                self.advance();
                Ok(Stmt::Continue {
                    location: token.location,
                })
            }
            TokenKind::For => self.parse_loop(context),
            TokenKind::If => self.parse_if(context),
            TokenKind::Type | TokenKind::Trait => self.unexpected(),
            TokenKind::Ident if token.literal == "defer" => {
                let snapshot = self.snapshot();
                self.advance();
                self.skip_space();
                if starts_expression(self.current().kind) {
                    let value = self.parse_expression(context)?;
                    let location = token.location.cover(value.location());
                    Ok(Stmt::Defer { value, location })
                } else {
                    self.restore(snapshot);
                    self.parse_expression_statement(context)
                }
            }
            _ => self.parse_expression_statement(context),
        }
    }

    /// An expression on the same line, if one starts there.
    fn parse_optional_value(
        &mut self,
        context: Context,
    ) -> ParseResult<Option<crate::ast::Expr>> {
        self.skip_space();
        if starts_expression(self.current().kind) {
            Ok(Some(self.parse_expression(context)?))
        } else {
            Ok(None)
        }
    }

    fn parse_loop(&mut self, context: Context) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::For])?;
        self.skip_space();
        let predicate = if self.current().kind == TokenKind::LeftParen {
            self.advance();
            let predicate = self.parse_expression(context)?;
            self.must_expect(&[TokenKind::RightParen])?;
            Some(predicate)
        } else {
            None
        };
        let (body, close) = self.parse_block(context.looped())?;
        Ok(Stmt::Loop {
            predicate,
            body,
            location: keyword.location.cover(&close),
        })
    }

    fn parse_if(&mut self, context: Context) -> ParseResult<Stmt> {
        let keyword = self.must_expect(&[TokenKind::If])?;
        self.must_expect(&[TokenKind::LeftParen])?;
        let predicate = self.parse_expression(context)?;
        self.must_expect(&[TokenKind::RightParen])?;
        let (body, mut end) = self.parse_block(context)?;

        let mut else_ifs = Vec::new();
        let mut else_body = None;
        while let Some(else_token) = self.might_expect(&[TokenKind::Else]) {
            if self.might_expect(&[TokenKind::If]).is_some() {
                self.must_expect(&[TokenKind::LeftParen])?;
                let block_predicate = self.parse_expression(context)?;
                self.must_expect(&[TokenKind::RightParen])?;
                let (block, close) = self.parse_block(context)?;
                else_ifs.push(ElseIfBlock {
                    predicate: block_predicate,
                    body: block,
                    location: else_token.location.cover(&close),
                });
                end = close;
            } else {
                let (block, close) = self.parse_block(context)?;
                else_body = Some(block);
                end = close;
                break;
            }
        }

        Ok(Stmt::If {
            predicate,
            body,
            else_ifs,
            else_body,
            location: keyword.location.cover(&end),
        })
    }

    fn parse_expression_statement(&mut self, context: Context) -> ParseResult<Stmt> {
        let expression = self.parse_expression(context)?;
        self.skip_space();
        let token = self.current();
        if matches!(
            token.kind,
            TokenKind::Assign | TokenKind::ArithmeticAssignment
        ) {
            let operator = self.advance();
            let value = self.parse_expression(context)?;
            let location = expression.location().cover(value.location());
            return Ok(Stmt::Assignment {
                target: expression,
                operator: operator.literal,
                value,
                location,
            });
        }
        let location = expression.location().clone();
        Ok(Stmt::Expression {
            expression,
            location,
        })
    }
}
