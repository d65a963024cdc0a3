use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{ArrayExpr, BooleanExpr, Comparison, Expr, Kind, NumberExpr, StringExpr, Token},
    cursor::Cursor,
};

/// Errors produced while building an expression tree from tokens.
///
/// Positions are token indices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected token `{found}` at token {position}")]
    UnexpectedToken { found: Token, position: usize },

    #[error("expected `{expected}`, found `{found}` at token {position}")]
    ExpectedToken {
        expected: Token,
        found: Token,
        position: usize,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected} expression, found {found} expression at token {position}")]
    KindMismatch {
        expected: Kind,
        found: Kind,
        position: usize,
    },

    #[error("{function} takes {expected} argument(s), found {found} at token {position}")]
    ArgumentCount {
        function: &'static str,
        expected: &'static str,
        found: usize,
        position: usize,
    },
}

/// Recursive-descent parser over a token sequence.
///
/// Precedence, lowest first:
///
/// | level          | operators                |
/// |----------------|--------------------------|
/// | or             | `\|\|` `or`              |
/// | and            | `&&` `and`               |
/// | equality       | `==`                     |
/// | relational     | `<` `<=` `>` `>=`        |
/// | additive       | `+` `-`                  |
/// | multiplicative | `*` `/`                  |
/// | unary          | `-` `!`                  |
/// | primary        | literals, paths, `(..)`, calls |
///
/// `&&`/`and` and `||`/`or` are interchangeable and chains of them become one
/// n-ary node, as do runs of `+` and runs of `*`. Equality and relational
/// operators do not chain. The default after `?` is parsed at the unary level,
/// so `$.a ? 0 + 1` means `($.a ? 0) + 1`.
///
/// The lexer reads `-` directly before digits as part of the number. A
/// negative number that follows a complete operand is taken as binary `-`,
/// so `3 -1` and `$.a-1` subtract.
pub struct Parser {
    tokens: Cursor<Token>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: Cursor::new(tokens),
        }
    }

    fn position(&self) -> usize {
        self.tokens.position()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn advance(&mut self) -> Option<Token> {
        self.tokens.next().cloned()
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|current| std::mem::discriminant(current) == std::mem::discriminant(token))
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        let position = self.position();
        match self.advance() {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(ParseError::ExpectedToken {
                expected,
                found,
                position,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: description,
            }),
        }
    }

    /// Parses the whole token sequence as one expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;

        let position = self.position();
        if let Some(found) = self.advance() {
            return Err(ParseError::UnexpectedToken { found, position });
        }

        debug!(nodes = expr.node_count(), "parsed expression");
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        let first = self.parse_and()?;
        if !matches!(self.peek(), Some(Token::OrOr | Token::Or)) {
            return Ok(first);
        }

        let mut operands = vec![narrow::<BooleanExpr>(first, start)?];
        while matches!(self.peek(), Some(Token::OrOr | Token::Or)) {
            self.advance();
            let start = self.position();
            let operand = self.parse_and()?;
            operands.push(narrow(operand, start)?);
        }
        Ok(Expr::Boolean(BooleanExpr::or(operands)))
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        let first = self.parse_equality()?;
        if !matches!(self.peek(), Some(Token::AndAnd | Token::And)) {
            return Ok(first);
        }

        let mut operands = vec![narrow::<BooleanExpr>(first, start)?];
        while matches!(self.peek(), Some(Token::AndAnd | Token::And)) {
            self.advance();
            let start = self.position();
            let operand = self.parse_equality()?;
            operands.push(narrow(operand, start)?);
        }
        Ok(Expr::Boolean(BooleanExpr::and(operands)))
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_relational()?;

        if self.check(&Token::EqEq) {
            self.advance();
            let right = self.parse_relational()?;
            return Ok(Expr::Boolean(BooleanExpr::Equal(
                Box::new(left),
                Box::new(right),
            )));
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        let left = self.parse_additive()?;

        let op = match self.peek() {
            Some(Token::Lt) => Comparison::Less,
            Some(Token::LtEq) => Comparison::LessEqual,
            Some(Token::Gt) => Comparison::Greater,
            Some(Token::GtEq) => Comparison::GreaterEqual,
            _ => return Ok(left),
        };
        let left = narrow::<NumberExpr>(left, start)?;

        self.advance();
        let start = self.position();
        let right = self.parse_additive()?;
        let right = narrow::<NumberExpr>(right, start)?;

        Ok(Expr::Boolean(BooleanExpr::compare(op, left, right)))
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        let first = self.parse_multiplicative()?;
        if !self.at_additive_operator() {
            return Ok(first);
        }

        let mut left = narrow::<NumberExpr>(first, start)?;
        // Only sums built by this loop absorb further `+` operands.
        let mut chained = false;

        while self.at_additive_operator() {
            let operator_position = self.position();
            let Some(token) = self.advance() else { break };
            let (is_plus, start, operand) = if let Token::Number(n) = token {
                // `a -1` lexes the minus into the number; it still subtracts.
                let magnitude = Expr::Number(NumberExpr::Literal(-n));
                let operand = self.continue_multiplicative(operator_position, magnitude)?;
                (false, operator_position, operand)
            } else {
                let start = self.position();
                (token == Token::Plus, start, self.parse_multiplicative()?)
            };
            let right = narrow::<NumberExpr>(operand, start)?;

            left = match (is_plus, left) {
                (true, NumberExpr::Chain { op, mut operands }) if chained => {
                    operands.push(right);
                    NumberExpr::Chain { op, operands }
                }
                (true, left) => NumberExpr::sum(vec![left, right]),
                (false, left) => NumberExpr::Subtract(Box::new(left), Box::new(right)),
            };
            chained = is_plus;
        }
        Ok(Expr::Number(left))
    }

    /// `+`, `-`, or a negative number literal, which can only come from a
    /// `-` written directly before digits.
    fn at_additive_operator(&self) -> bool {
        match self.peek() {
            Some(Token::Plus | Token::Minus) => true,
            Some(Token::Number(n)) => n.is_sign_negative(),
            _ => false,
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        let first = self.parse_unary()?;
        self.continue_multiplicative(start, first)
    }

    /// Parses any `*` and `/` operands following `first`, which started at
    /// token `start`.
    fn continue_multiplicative(&mut self, start: usize, first: Expr) -> Result<Expr, ParseError> {
        if !matches!(self.peek(), Some(Token::Star | Token::Slash)) {
            return Ok(first);
        }

        let mut left = narrow::<NumberExpr>(first, start)?;
        let mut chained = false;

        while let Some(op) = self.peek().filter(|t| matches!(t, Token::Star | Token::Slash)) {
            let is_times = *op == Token::Star;
            self.advance();
            let start = self.position();
            let operand = self.parse_unary()?;
            let right = narrow::<NumberExpr>(operand, start)?;

            left = match (is_times, left) {
                (true, NumberExpr::Chain { op, mut operands }) if chained => {
                    operands.push(right);
                    NumberExpr::Chain { op, operands }
                }
                (true, left) => NumberExpr::product(vec![left, right]),
                (false, left) => NumberExpr::Divide(Box::new(left), Box::new(right)),
            };
            chained = is_times;
        }
        Ok(Expr::Number(left))
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let start = self.position();
                let operand = self.parse_unary()?;
                let operand = narrow::<NumberExpr>(operand, start)?;
                Ok(Expr::Number(NumberExpr::Invert(Box::new(operand))))
            }
            Some(Token::Not) => {
                self.advance();
                let start = self.position();
                let operand = self.parse_unary()?;
                let operand = narrow::<BooleanExpr>(operand, start)?;
                Ok(Expr::Boolean(BooleanExpr::Not(Box::new(operand))))
            }
            _ => self.parse_primary(),
        }
    }

    /// Parse primary expressions: literals, paths with optional defaults,
    /// parenthesized groups and the `sum`, `product`, `length` calls.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        trace!(position, token = ?self.peek(), "parse_primary");

        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "an expression",
            });
        };

        match token {
            Token::Number(n) => Ok(Expr::Number(NumberExpr::Literal(n))),
            Token::Boolean(b) => Ok(Expr::Boolean(BooleanExpr::Literal(b))),
            Token::String(s) => Ok(Expr::String(StringExpr::Literal(s))),

            Token::Path(path) => {
                if !self.check(&Token::IfNotFound) {
                    return Ok(Expr::Path(path));
                }
                self.advance();
                let default = self.parse_unary()?;
                Ok(Expr::PathWithDefault {
                    path,
                    default: Box::new(default),
                })
            }

            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(expr)
            }

            Token::Sum | Token::Product => {
                let is_sum = token == Token::Sum;
                let function = if is_sum { "sum" } else { "product" };
                let args = self.parse_arguments()?;
                if args.is_empty() {
                    return Err(ParseError::ArgumentCount {
                        function,
                        expected: "at least 1",
                        found: 0,
                        position,
                    });
                }

                let operands = args
                    .into_iter()
                    .map(|(start, arg)| narrow::<NumberExpr>(arg, start))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::Number(if is_sum {
                    NumberExpr::sum(operands)
                } else {
                    NumberExpr::product(operands)
                }))
            }

            Token::Length => {
                let mut args = self.parse_arguments()?;
                if args.len() != 1 {
                    return Err(ParseError::ArgumentCount {
                        function: "length",
                        expected: "exactly 1",
                        found: args.len(),
                        position,
                    });
                }
                let (start, arg) = args.remove(0);
                let array = narrow::<ArrayExpr>(arg, start)?;
                Ok(Expr::Number(NumberExpr::Length(array)))
            }

            found => Err(ParseError::UnexpectedToken { found, position }),
        }
    }

    /// Parses `( expr, expr, ... )` after a call keyword. Each argument is
    /// returned with the token index it starts at.
    fn parse_arguments(&mut self) -> Result<Vec<(usize, Expr)>, ParseError> {
        self.expect(Token::LParen, "`(`")?;

        let mut args = vec![];
        if self.check(&Token::RParen) {
            self.advance();
            return Ok(args);
        }

        loop {
            let start = self.position();
            args.push((start, self.parse_expression()?));

            let position = self.position();
            match self.advance() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                Some(found) => {
                    return Err(ParseError::ExpectedToken {
                        expected: Token::RParen,
                        found,
                        position,
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "`,` or `)`",
                    });
                }
            }
        }
    }
}

/// Narrows an operand that started at token `position` to the kind its
/// operator requires.
fn narrow<T>(expr: Expr, position: usize) -> Result<T, ParseError>
where
    T: TryFrom<Expr, Error = Kind> + Typed,
{
    T::try_from(expr).map_err(|found| ParseError::KindMismatch {
        expected: T::KIND,
        found,
        position,
    })
}

trait Typed {
    const KIND: Kind;
}

impl Typed for NumberExpr {
    const KIND: Kind = Kind::Number;
}

impl Typed for BooleanExpr {
    const KIND: Kind = Kind::Boolean;
}

impl Typed for ArrayExpr {
    const KIND: Kind = Kind::Array;
}

/// Parses a token sequence produced by [`lex`](crate::lex).
///
/// # Examples
///
/// ```
/// use sprig_lang::{lex, parser::parse_tokens, Expr, NumberExpr};
///
/// let expr = parse_tokens(lex("sum(1, 2)").unwrap()).unwrap();
/// assert_eq!(
///     expr,
///     Expr::Number(NumberExpr::sum(vec![
///         NumberExpr::Literal(1.0),
///         NumberExpr::Literal(2.0),
///     ]))
/// );
/// ```
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}
