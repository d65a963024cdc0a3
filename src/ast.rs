//! # Sprig Expression Language - Abstract Syntax Tree
//!
//! Sprig is a small embeddable expression language. A host stores an
//! expression string once, compiles it, and evaluates it repeatedly against
//! different data contexts.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[path]** - Paths addressing values in an evaluation context
//! - **[expressions]** - Typed expression families (number, boolean, string, array, generic)
//! - **[operators]** - Operator tags shared by evaluation and reduction
//! - **[display]** - Canonical source rendering of expressions
//!
//! ## Quick Start
//!
//! ```text
//! length($.arr1) + length($.arr2) < 3
//! ```
//!
//! ## Typing
//!
//! Every operator fixes the kind of its operands: `+ - * /`, `sum`, `product`
//! and the comparisons take numbers, `! && || and or` take booleans, `length`
//! takes an array. A path used as such an operand becomes a typed path node.
//! A path in any other position, and the sides of `==`, stay untyped ([`Expr`]).
//!
//! ## Missing values
//!
//! Lookups never fail. A typed path that misses evaluates to the zero value of
//! its kind (`0`, `false`, `''`, empty array) unless a default was supplied with
//! the if-not-found operator:
//!
//! ```text
//! $.doAThing ? true
//! ```
pub mod display;
pub mod expressions;
pub mod operators;
pub mod path;
pub mod tokens;

pub use expressions::{ArrayExpr, BooleanExpr, Expr, Kind, NumberExpr, StringExpr};
pub use operators::{Associative, Comparison, Logical};
pub use path::{Path, PathSegment};
pub use tokens::Token;
