use std::fmt;

use crate::ast::{Path, display::write_string};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Path into the evaluation context
    ///
    /// # Examples
    /// ```text
    /// $.user.name
    /// $.items[0]
    /// $['odd key']
    /// ```
    Path(Path),

    /// Number, always a 64-bit float
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// -1.5
    /// ```
    Number(f64),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// String literal enclosed in single quotes
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// 'it\'s'
    /// ```
    String(String),

    // Operators
    /// If-not-found operator, supplies a default for a path
    ///
    /// # Examples
    /// ```text
    /// $.retries ? 3
    /// ```
    IfNotFound,

    /// Subtraction or unary negation
    Minus,

    /// Addition
    Plus,

    /// Multiplication
    Star,

    /// Division
    Slash,

    /// Logical negation
    Not,

    // Comparison
    /// Equality operator
    EqEq,

    /// Less than
    Lt,

    /// Less than or equal
    LtEq,

    /// Greater than
    Gt,

    /// Greater than or equal
    GtEq,

    // Logical
    /// Symbolic logical AND (`&&`)
    AndAnd,

    /// Word logical AND (`and`)
    And,

    /// Symbolic logical OR (`||`)
    OrOr,

    /// Word logical OR (`or`)
    Or,

    // Keywords
    /// `sum(...)` call
    Sum,

    /// `product(...)` call
    Product,

    /// `length(...)` call
    Length,

    // Delimiters
    /// Left parenthesis for grouping or calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma separating call arguments
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Path(path) => write!(f, "{}", path),
            Token::Number(n) => write!(f, "{}", n),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::String(s) => write_string(f, s),
            Token::IfNotFound => f.write_str("?"),
            Token::Minus => f.write_str("-"),
            Token::Plus => f.write_str("+"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Not => f.write_str("!"),
            Token::EqEq => f.write_str("=="),
            Token::Lt => f.write_str("<"),
            Token::LtEq => f.write_str("<="),
            Token::Gt => f.write_str(">"),
            Token::GtEq => f.write_str(">="),
            Token::AndAnd => f.write_str("&&"),
            Token::And => f.write_str("and"),
            Token::OrOr => f.write_str("||"),
            Token::Or => f.write_str("or"),
            Token::Sum => f.write_str("sum"),
            Token::Product => f.write_str("product"),
            Token::Length => f.write_str("length"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}
