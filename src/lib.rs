pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod cursor;
pub mod evaluator;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod reduce;
pub mod value;

use thiserror::Error;
use tracing::debug;

pub use ast::{
    ArrayExpr, Associative, BooleanExpr, Comparison, Expr, Kind, Logical, NumberExpr, Path,
    PathSegment, StringExpr, Token,
};
pub use context::{Context, EmptyContext};
pub use lexer::{LexError, Lexer, lex};
pub use parser::{ParseError, Parser};
pub use value::Value;

/// Any error raised while turning text into an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Lexes and parses `text` without reducing it.
pub fn parse(text: &str) -> Result<Expr, Error> {
    let tokens = lex(text)?;
    Ok(Parser::new(tokens).parse()?)
}

/// Lexes, parses and reduces `text`. The result is the form to store and
/// evaluate repeatedly.
///
/// # Examples
///
/// ```
/// use sprig_lang::{compile, EmptyContext, Value};
///
/// let expr = compile("-(42 + 43.2)").unwrap();
/// assert_eq!(expr.value(&EmptyContext), Some(Value::Number(-85.2)));
/// ```
pub fn compile(text: &str) -> Result<Expr, Error> {
    let expr = parse(text)?;
    let before = expr.node_count();
    let reduced = expr.reduce();
    debug!(before, after = reduced.node_count(), "reduced expression");
    Ok(reduced)
}
