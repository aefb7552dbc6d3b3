//! Expression parsing.
//!
//! Binding, loosest to tightest: `or` and `instanceof`, then `&&`/`||`,
//! then a single non-chainable comparison, then arithmetic, then prefix and
//! postfix operators. Arithmetic parses the right side recursively and
//! left-rotates when the consumed operator is multiplicative, so `2 + 3 * 5`
//! nests the product on the right while `2 * 3 + 5` ends up with the
//! product on the left.

use super::{Context, ParseResult, Parser};
use crate::ast::{Expr, InstanceMember, MapEntry, MatchBlock, NumberValue};
use crate::error::{syntax, MessageCode};
use crate::lexer::{Token, TokenKind};

/// Token kinds that may begin an expression.
pub(crate) fn starts_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Cardinal
            | TokenKind::String
            | TokenKind::MultilineString
            | TokenKind::Rune
            | TokenKind::Number
            | TokenKind::Bool
            | TokenKind::LeftParen
            | TokenKind::LeftBracket
            | TokenKind::LeftBrace
            | TokenKind::Match
            | TokenKind::This
            | TokenKind::Fun
            | TokenKind::Corout
            | TokenKind::Gen
            | TokenKind::Giveup
            | TokenKind::Dot
            | TokenKind::Caret
            | TokenKind::Bang
            | TokenKind::Minus
            | TokenKind::Increment
            | TokenKind::Decrement
    )
}

const ARITHMETIC: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::Power,
];

fn is_multiplicative(operator: &str) -> bool {
    matches!(operator, "*" | "/" | "%" | "**")
}

impl Parser {
    pub(crate) fn parse_expression(&mut self, context: Context) -> ParseResult<Expr> {
        let mut expr = self.parse_binary(context)?;
        loop {
            self.skip_space();
            let token = self.current().clone();
            match token.kind {
                TokenKind::Instanceof => {
                    self.advance();
                    let right = self.parse_type()?;
                    let location = expr.location().cover(right.location());
                    expr = Expr::InstanceofExpression {
                        left: Box::new(expr),
                        right,
                        location,
                    };
                }
                TokenKind::Or => {
                    if !expr.is_call() {
                        return self.illegal("or", "after this expression", token.location);
                    }
                    self.advance();
                    let fallback = self.parse_expression(context)?;
                    let location = expr.location().cover(fallback.location());
                    expr = Expr::OrExpression {
                        target: Box::new(expr),
                        fallback: Box::new(fallback),
                        location,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_binary(&mut self, context: Context) -> ParseResult<Expr> {
        let mut left = self.parse_comparison(context)?;
        loop {
            self.skip_space();
            if self.current().kind != TokenKind::BinaryOperator {
                return Ok(left);
            }
            let operator = self.advance();
            let right = self.parse_comparison(context)?;
            let location = left.location().cover(right.location());
            left = Expr::BinaryExpression {
                left: Box::new(left),
                operator: operator.literal,
                right: Box::new(right),
                location,
            };
        }
    }

    /// Comparisons are single-shot: `a < b < c` stops after the first.
    fn parse_comparison(&mut self, context: Context) -> ParseResult<Expr> {
        let left = self.parse_arithmetic(context)?;
        self.skip_space();
        if self.current().kind != TokenKind::ComparisonOperator {
            return Ok(left);
        }
        let operator = self.advance();
        let right = self.parse_arithmetic(context)?;
        let location = left.location().cover(right.location());
        Ok(Expr::ComparisonExpression {
            left: Box::new(left),
            operator: operator.literal,
            right: Box::new(right),
            location,
        })
    }

    fn parse_arithmetic(&mut self, context: Context) -> ParseResult<Expr> {
        let left = self.parse_operand(context)?;
        self.skip_space();
        if !ARITHMETIC.contains(&self.current().kind) {
            return Ok(left);
        }
        let operator = self.advance();
        let right = self.parse_arithmetic(context)?;
        Ok(combine_arithmetic(left, operator.literal, right))
    }

    fn parse_operand(&mut self, context: Context) -> ParseResult<Expr> {
        self.skip_all();
        let token = self.current().clone();
        match token.kind {
            TokenKind::Bang => {
                self.advance();
                let inner = self.parse_operand(context)?;
                let location = token.location.cover(inner.location());
                Ok(Expr::NotExpression {
                    expression: Box::new(inner),
                    location,
                })
            }
            TokenKind::Increment | TokenKind::Decrement => {
                self.advance();
                let target = self.parse_operand(context)?;
                let location = token.location.cover(target.location());
                Ok(Expr::ArithmeticUnaryExpression {
                    target: Box::new(target),
                    operator: token.literal,
                    prefix: true,
                    location,
                })
            }
            TokenKind::Minus => {
                self.advance();
                let number = self.must_expect(&[TokenKind::Number])?;
                let location = token.location.cover(&number.location);
                parse_number(&number, true, location)
            }
            _ => {
                let mut expr = self.parse_primary(context)?;
                loop {
                    self.skip_space();
                    let token = self.current().clone();
                    match token.kind {
                        TokenKind::Dot => {
                            self.advance();
                            self.skip_space();
                            if self.current().kind == TokenKind::LeftParen {
                                self.advance();
                                let ty = self.parse_type()?;
                                let close = self.must_expect(&[TokenKind::RightParen])?;
                                let location = expr.location().cover(&close.location);
                                expr = Expr::TypeCastExpression {
                                    target: Box::new(expr),
                                    ty,
                                    location,
                                };
                            } else {
                                let property = self.expect_identifier()?;
                                let location = expr.location().cover(&property.location);
                                expr = Expr::MemberExpression {
                                    target: Box::new(expr),
                                    property,
                                    location,
                                };
                            }
                        }
                        TokenKind::LeftParen => {
                            expr = self.parse_call(expr, context)?;
                        }
                        TokenKind::LeftBracket => {
                            self.advance();
                            let index = self.parse_expression(context)?;
                            let close = self.must_expect(&[TokenKind::RightBracket])?;
                            let location = expr.location().cover(&close.location);
                            expr = Expr::IndexExpression {
                                target: Box::new(expr),
                                index: Box::new(index),
                                location,
                            };
                        }
                        TokenKind::LeftBrace if expr.names_type() => {
                            expr = self.parse_instance_literal(expr, Vec::new(), context)?;
                        }
                        TokenKind::Increment | TokenKind::Decrement => {
                            self.advance();
                            let location = expr.location().cover(&token.location);
                            expr = Expr::ArithmeticUnaryExpression {
                                target: Box::new(expr),
                                operator: token.literal,
                                prefix: false,
                                location,
                            };
                        }
                        TokenKind::Caret => {
                            return self.illegal("^", "after an expression", token.location);
                        }
                        _ => return Ok(expr),
                    }
                }
            }
        }
    }

    fn parse_primary(&mut self, context: Context) -> ParseResult<Expr> {
        self.skip_all();
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident | TokenKind::Cardinal => {
                if token.kind == TokenKind::Ident && token.literal == "warn" {
                    let snapshot = self.snapshot();
                    self.advance();
                    self.skip_space();
                    if starts_expression(self.current().kind) {
                        let value = self.parse_operand(context)?;
                        let location = token.location.cover(value.location());
                        return Ok(Expr::WarnExpression {
                            value: Box::new(value),
                            location,
                        });
                    }
                    self.restore(snapshot);
                }
                self.advance();
                let identifier = Expr::Identifier {
                    value: token.literal,
                    location: token.location,
                };
                self.skip_space();
                let next = self.current();
                if next.kind == TokenKind::ComparisonOperator && next.literal == "<" {
                    // `T<G>{…}` needs lookahead past the generic list; on any
                    // failure this is an ordinary comparison instead.
                    let snapshot = self.snapshot();
                    let comments = self.comments.len();
                    match self.parse_generic_instance(identifier.clone(), context) {
                        Ok(instance) => return Ok(instance),
                        Err(_) => {
                            self.restore(snapshot);
                            self.comments.truncate(comments);
                        }
                    }
                }
                Ok(identifier)
            }
            TokenKind::String | TokenKind::MultilineString => {
                self.advance();
                Ok(Expr::StringLiteral {
                    value: token.literal,
                    location: token.location,
                })
            }
            TokenKind::Rune => {
                self.advance();
                Ok(Expr::RuneLiteral {
                    value: token.literal,
                    location: token.location,
                })
            }
            TokenKind::Number => {
                self.advance();
                let location = token.location.clone();
                parse_number(&token, false, location)
            }
            TokenKind::Bool => {
                self.advance();
                Ok(Expr::BoolLiteral {
                    value: token.literal == "true",
                    location: token.location,
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression(context)?;
                let close = self.must_expect(&[TokenKind::RightParen])?;
                Ok(Expr::GroupExpression {
                    expression: Box::new(inner),
                    location: token.location.cover(&close.location),
                })
            }
            TokenKind::LeftBracket => self.parse_list_literal(context),
            TokenKind::LeftBrace => self.parse_map_literal(context),
            TokenKind::Match => self.parse_match(context),
            TokenKind::This => {
                if !context.in_bound_function {
                    return self.illegal("this", "outside a bound function body", token.location);
                }
                self.advance();
                Ok(Expr::ThisExpression {
                    location: token.location,
                })
            }
            TokenKind::Fun => self.parse_anonymous_fun(context, false),
            TokenKind::Corout => {
                self.advance();
                let function = self.parse_anonymous_fun(context, false)?;
                let location = token.location.cover(function.location());
                Ok(Expr::CoroutFunExpression {
                    function: Box::new(function),
                    location,
                })
            }
            TokenKind::Gen => {
                self.advance();
                let function = self.parse_anonymous_fun(context, true)?;
                let location = token.location.cover(function.location());
                Ok(Expr::GenFunExpression {
                    function: Box::new(function),
                    location,
                })
            }
            TokenKind::Giveup => {
                self.advance();
                Ok(Expr::GiveupExpression {
                    location: token.location,
                })
            }
            TokenKind::Dot => {
                if !context.in_match_predicate {
                    return self.illegal(".", "outside a match predicate", token.location);
                }
                self.advance();
                Ok(Expr::MatchSelfExpression {
                    location: token.location,
                })
            }
            TokenKind::Caret => {
                self.advance();
                Ok(Expr::CaretExpression {
                    location: token.location,
                })
            }
            _ => self.unexpected(),
        }
    }

    fn parse_call(&mut self, target: Expr, context: Context) -> ParseResult<Expr> {
        self.must_expect(&[TokenKind::LeftParen])?;
        let mut arguments = Vec::new();
        self.skip_all();
        let close = if self.current().kind == TokenKind::RightParen {
            self.advance()
        } else {
            // no trailing comma in argument lists
            loop {
                arguments.push(self.parse_expression(context)?);
                let separator =
                    self.must_expect(&[TokenKind::Comma, TokenKind::RightParen])?;
                if separator.kind == TokenKind::RightParen {
                    break separator;
                }
            }
        };
        let location = target.location().cover(&close.location);
        Ok(Expr::CallExpression {
            target: Box::new(target),
            arguments,
            location,
        })
    }

    fn parse_list_literal(&mut self, context: Context) -> ParseResult<Expr> {
        let open = self.must_expect(&[TokenKind::LeftBracket])?;
        let mut elements = Vec::new();
        let close = loop {
            self.skip_all();
            if self.current().kind == TokenKind::RightBracket {
                break self.advance();
            }
            elements.push(self.parse_expression(context)?);
            let separator = self.must_expect(&[TokenKind::Comma, TokenKind::RightBracket])?;
            if separator.kind == TokenKind::RightBracket {
                break separator;
            }
        };
        Ok(Expr::ListLiteral {
            elements,
            location: open.location.cover(&close.location),
        })
    }

    fn parse_map_literal(&mut self, context: Context) -> ParseResult<Expr> {
        let open = self.must_expect(&[TokenKind::LeftBrace])?;
        let mut entries = Vec::new();
        let close = loop {
            self.skip_all();
            if self.current().kind == TokenKind::RightBrace {
                break self.advance();
            }
            let key = self.parse_expression(context)?;
            self.must_expect(&[TokenKind::Colon])?;
            let value = self.parse_expression(context)?;
            let location = key.location().cover(value.location());
            entries.push(MapEntry {
                key,
                value,
                location,
            });
            let separator = self.must_expect(&[TokenKind::Comma, TokenKind::RightBrace])?;
            if separator.kind == TokenKind::RightBrace {
                break separator;
            }
        };
        Ok(Expr::MapLiteral {
            entries,
            location: open.location.cover(&close.location),
        })
    }

    /// Called with the cursor on `<` after a type-naming expression.
    fn parse_generic_instance(&mut self, target: Expr, context: Context) -> ParseResult<Expr> {
        self.advance(); // <
        let mut generics = Vec::new();
        loop {
            generics.push(self.parse_type()?);
            self.skip_all();
            let token = self.current().clone();
            match token.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::ComparisonOperator if token.literal == ">" => {
                    self.advance();
                    break;
                }
                _ => return self.unexpected(),
            }
        }
        self.skip_space();
        if self.current().kind != TokenKind::LeftBrace {
            return self.unexpected();
        }
        self.parse_instance_literal(target, generics, context)
    }

    pub(super) fn parse_instance_literal(
        &mut self,
        target: Expr,
        generics: Vec<crate::ast::TypeLiteral>,
        context: Context,
    ) -> ParseResult<Expr> {
        self.must_expect(&[TokenKind::LeftBrace])?;
        let mut members = Vec::new();
        let close = loop {
            self.skip_all();
            if self.current().kind == TokenKind::RightBrace {
                break self.advance();
            }
            let name = self.expect_identifier()?;
            self.must_expect(&[TokenKind::Colon])?;
            let value = self.parse_expression(context)?;
            let location = name.location.cover(value.location());
            members.push(InstanceMember {
                name,
                value,
                location,
            });
            let separator = self.must_expect(&[TokenKind::Comma, TokenKind::RightBrace])?;
            if separator.kind == TokenKind::RightBrace {
                break separator;
            }
        };
        let location = target.location().cover(&close.location);
        Ok(Expr::InstanceLiteral {
            target: Box::new(target),
            generics,
            members,
            location,
        })
    }

    fn parse_match(&mut self, context: Context) -> ParseResult<Expr> {
        let keyword = self.must_expect(&[TokenKind::Match])?;
        self.must_expect(&[TokenKind::LeftParen])?;
        let subject = self.parse_expression(context)?;
        self.must_expect(&[TokenKind::RightParen])?;
        self.must_expect(&[TokenKind::LeftBrace])?;

        let mut blocks = Vec::new();
        let mut base = None;
        let close = loop {
            self.skip_all();
            let token = self.current().clone();
            match token.kind {
                TokenKind::RightBrace => break self.advance(),
                TokenKind::Base => {
                    self.advance();
                    let (body, _) = self.parse_block(context)?;
                    base = Some(body);
                }
                TokenKind::LeftParen => {
                    self.advance();
                    let predicate = self.parse_expression(context.match_predicate())?;
                    self.must_expect(&[TokenKind::RightParen])?;
                    let (body, block_close) = self.parse_block(context)?;
                    let location = token.location.cover(&block_close);
                    blocks.push(MatchBlock {
                        predicate,
                        body,
                        location,
                    });
                }
                TokenKind::Eof => {
                    return Err(syntax(MessageCode::UnexpectedEof, &[], token.location));
                }
                _ => return self.unexpected(),
            }
        };

        Ok(Expr::MatchExpression {
            subject: Box::new(subject),
            blocks,
            base,
            location: keyword.location.cover(&close.location),
        })
    }

    fn parse_anonymous_fun(&mut self, context: Context, generator: bool) -> ParseResult<Expr> {
        let keyword = self.must_expect(&[TokenKind::Fun])?;
        let signature = self.parse_anonymous_signature()?;
        let body_context = if generator {
            context.generator()
        } else {
            context.function()
        };
        let (body, close) = self.parse_block(body_context)?;
        Ok(Expr::AnonymousFunExpression {
            signature,
            body,
            location: keyword.location.cover(&close),
        })
    }
}

fn combine_arithmetic(left: Expr, operator: String, right: Expr) -> Expr {
    if is_multiplicative(&operator) {
        if let Expr::ArithmeticExpression {
            left: right_left,
            operator: right_operator,
            right: right_right,
            ..
        } = right
        {
            let inner_location = left.location().cover(right_left.location());
            let inner = Expr::ArithmeticExpression {
                left: Box::new(left),
                operator,
                right: right_left,
                location: inner_location,
            };
            let location = inner.location().cover(right_right.location());
            return Expr::ArithmeticExpression {
                left: Box::new(inner),
                operator: right_operator,
                right: right_right,
                location,
            };
        }
    }
    let location = left.location().cover(right.location());
    Expr::ArithmeticExpression {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        location,
    }
}

fn parse_number(token: &Token, negative: bool, location: crate::location::Location) -> ParseResult<Expr> {
    let mut text = String::new();
    if negative {
        text.push('-');
    }
    text.push_str(&token.literal);

    let value = if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>().map(NumberValue::Float)
    } else {
        text.parse::<i64>().map(NumberValue::Int).or_else(|_| {
            // integers past i64 fall back to the float representation
            text.parse::<f64>().map(NumberValue::Float)
        })
    };
    match value {
        Ok(value) => Ok(Expr::NumberLiteral { value, location }),
        Err(_) => Err(syntax(MessageCode::InvalidValue, &["number"], location)),
    }
}
