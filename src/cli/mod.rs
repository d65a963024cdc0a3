//! CLI support for sprig-lang
//!
//! Provides programmatic access to the `sprig` commands so other tools can
//! embed them.

mod check;
mod eval;

pub use check::{CheckOptions, execute_check};
pub use eval::{EvalOptions, execute_eval};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Expression did not lex or parse
    #[error("Invalid expression: {0}")]
    Expression(#[from] crate::Error),

    /// JSON parsing or printing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

/// Compiles an expression, reducing it unless `reduce` is off.
fn build(expression: &str, reduce: bool) -> Result<crate::Expr, CliError> {
    let expr = if reduce {
        crate::compile(expression)?
    } else {
        crate::parse(expression)?
    };
    Ok(expr)
}
