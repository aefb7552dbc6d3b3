//! Type literal and signature parsing.

use super::{ParseResult, Parser};
use crate::ast::{
    AnonymousSignature, Expr, GenericParameter, Identifier, Parameter, StructField, TypeLiteral,
    UnboundSignature,
};
use crate::error::{syntax, MessageCode};
use crate::lexer::{Token, TokenKind};

/// Token kinds that may begin a type literal.
pub(crate) fn starts_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Cardinal
            | TokenKind::Map
            | TokenKind::LeftBrace
            | TokenKind::LeftParen
            | TokenKind::Fun
    )
}

impl Parser {
    /// Operated types associate right: `A | B & C` is `A | (B & C)`.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeLiteral> {
        let left = self.parse_type_operand()?;
        self.skip_space();
        let token = self.current().clone();
        if !matches!(token.kind, TokenKind::Pipe | TokenKind::Ampersand) {
            return Ok(left);
        }
        self.advance();
        let right = self.parse_type()?;
        let location = left.location().cover(right.location());
        Ok(TypeLiteral::OperatedType {
            left: Box::new(left),
            operator: token.literal,
            right: Box::new(right),
            location,
        })
    }

    fn parse_type_operand(&mut self) -> ParseResult<TypeLiteral> {
        self.skip_all();
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident | TokenKind::Cardinal | TokenKind::Map => {
                self.advance();
                let name = Identifier::new(token.literal, token.location.clone());
                let generics = self.parse_type_arguments()?;

                if generics.is_empty() {
                    self.skip_space();
                    if self.current().kind == TokenKind::LeftParen {
                        return self.parse_typed_literal(name);
                    }
                }

                let location = match generics.last() {
                    Some(last) => token.location.cover(last.location()),
                    None => token.location,
                };
                Ok(TypeLiteral::TypeIdentifier {
                    name,
                    generics,
                    location,
                })
            }
            TokenKind::LeftBrace => self.parse_struct_literal(),
            TokenKind::LeftParen => {
                self.advance();
                let ty = self.parse_type()?;
                let close = self.must_expect(&[TokenKind::RightParen])?;
                Ok(TypeLiteral::GroupType {
                    ty: Box::new(ty),
                    location: token.location.cover(&close.location),
                })
            }
            TokenKind::Fun => {
                self.advance();
                let signature = self.parse_anonymous_signature()?;
                let location = token.location.cover(&signature.location);
                Ok(TypeLiteral::FunctionType {
                    signature: Box::new(signature),
                    location,
                })
            }
            _ => self.unexpected(),
        }
    }

    /// `<A, B>` following a type name; empty when no `<` is present.
    fn parse_type_arguments(&mut self) -> ParseResult<Vec<TypeLiteral>> {
        self.skip_space();
        let token = self.current();
        if !(token.kind == TokenKind::ComparisonOperator && token.literal == "<") {
            return Ok(Vec::new());
        }
        self.advance();
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type()?);
            self.skip_all();
            let token = self.current().clone();
            match token.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::ComparisonOperator if token.literal == ">" => {
                    self.advance();
                    return Ok(arguments);
                }
                _ => return self.unexpected(),
            }
        }
    }

    /// `T(literal)`, with the cursor on `(`.
    fn parse_typed_literal(&mut self, name: Identifier) -> ParseResult<TypeLiteral> {
        self.advance();
        let value = self.parse_literal_value()?;
        let close = self.must_expect(&[TokenKind::RightParen])?;
        let location = name.location.cover(&close.location);
        let target = TypeLiteral::TypeIdentifier {
            location: name.location.clone(),
            name,
            generics: Vec::new(),
        };
        Ok(TypeLiteral::TypedLiteral {
            target: Box::new(target),
            value: Box::new(value),
            location,
        })
    }

    /// Only plain literals may tag a typed literal.
    fn parse_literal_value(&mut self) -> ParseResult<Expr> {
        self.skip_all();
        let token = self.current().clone();
        match token.kind {
            TokenKind::String
            | TokenKind::MultilineString
            | TokenKind::Rune
            | TokenKind::Number
            | TokenKind::Bool
            | TokenKind::Minus => {
                let context = super::Context::default();
                self.parse_expression(context)
            }
            _ => Err(syntax(
                MessageCode::InvalidValue,
                &["typed"],
                token.location,
            )),
        }
    }

    fn parse_struct_literal(&mut self) -> ParseResult<TypeLiteral> {
        let open = self.must_expect(&[TokenKind::LeftBrace])?;
        let mut fields = Vec::new();
        let close = loop {
            self.skip_all();
            if self.current().kind == TokenKind::RightBrace {
                break self.advance();
            }
            let hidden = self.might_expect(&[TokenKind::Hidden]).is_some();
            let name = self.expect_identifier()?;
            let ty = self.parse_type()?;
            self.must_expect(&[TokenKind::Semicolon])?;
            let location = name.location.cover(ty.location());
            fields.push(StructField {
                name,
                ty,
                hidden,
                location,
            });
        };
        Ok(TypeLiteral::StructLiteral {
            fields,
            location: open.location.cover(&close.location),
        })
    }

    /// `<Name [constraint], …>` on a definition; empty when no `<` follows.
    pub(crate) fn parse_optional_generics(&mut self) -> ParseResult<Vec<GenericParameter>> {
        self.skip_space();
        let token = self.current();
        if !(token.kind == TokenKind::ComparisonOperator && token.literal == "<") {
            return Ok(Vec::new());
        }
        self.advance();
        let mut generics = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            self.skip_space();
            let constraint = if starts_type(self.current().kind) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let location = match &constraint {
                Some(constraint) => name.location.cover(constraint.location()),
                None => name.location.clone(),
            };
            generics.push(GenericParameter {
                name,
                index: generics.len() as u32,
                constraint,
                location,
            });
            self.skip_all();
            let token = self.current().clone();
            match token.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::ComparisonOperator if token.literal == ">" => {
                    self.advance();
                    return Ok(generics);
                }
                _ => return self.unexpected(),
            }
        }
    }

    pub(crate) fn parse_unbound_signature(&mut self) -> ParseResult<UnboundSignature> {
        let name = self.expect_identifier()?;
        let generics = self.parse_optional_generics()?;
        self.must_expect(&[TokenKind::LeftParen])?;
        let (parameters, close) = self.parse_parameters()?;
        let returns = self.parse_optional_return()?;
        let location = match &returns {
            Some(returns) => name.location.cover(returns.location()),
            None => name.location.cover(&close.location),
        };
        Ok(UnboundSignature {
            name,
            generics,
            parameters,
            returns,
            location,
        })
    }

    pub(crate) fn parse_anonymous_signature(&mut self) -> ParseResult<AnonymousSignature> {
        let generics = self.parse_optional_generics()?;
        let open = self.must_expect(&[TokenKind::LeftParen])?;
        let (parameters, close) = self.parse_parameters()?;
        let returns = self.parse_optional_return()?;
        let location = match &returns {
            Some(returns) => open.location.cover(returns.location()),
            None => open.location.cover(&close.location),
        };
        Ok(AnonymousSignature {
            generics,
            parameters,
            returns,
            location,
        })
    }

    /// Parameter list after `(`; returns the closing parenthesis too.
    fn parse_parameters(&mut self) -> ParseResult<(Vec<Parameter>, Token)> {
        self.skip_all();
        if self.current().kind == TokenKind::RightParen {
            return Ok((Vec::new(), self.advance()));
        }
        let mut parameters = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            self.skip_space();
            let variadic = self
                .might_expect_inline(&[TokenKind::VariadicMarker])
                .is_some();
            let ty = self.parse_type()?;
            let location = name.location.cover(ty.location());
            parameters.push(Parameter {
                name,
                ty,
                variadic,
                location,
            });
            let separator = self.must_expect(&[TokenKind::Comma, TokenKind::RightParen])?;
            if separator.kind == TokenKind::RightParen {
                return Ok((parameters, separator));
            }
        }
    }

    /// A return type on the same line; `{` always starts the body instead.
    fn parse_optional_return(&mut self) -> ParseResult<Option<TypeLiteral>> {
        self.skip_space();
        if matches!(
            self.current().kind,
            TokenKind::Ident
                | TokenKind::Cardinal
                | TokenKind::Map
                | TokenKind::LeftParen
                | TokenKind::Fun
        ) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }
}
