//! Evaluation of expression trees against a [`Context`].
//!
//! Evaluation never fails. Missing paths fall back to defaults or zero values,
//! equality across kinds is `false`, and division follows IEEE 754.

use crate::{
    ast::{ArrayExpr, BooleanExpr, Expr, NumberExpr, StringExpr},
    context::Context,
    value::Value,
};

impl NumberExpr {
    pub fn value<C: Context + ?Sized>(&self, ctx: &C) -> f64 {
        match self {
            NumberExpr::Literal(n) => *n,
            NumberExpr::Path(path) => ctx.get_number(path).unwrap_or(0.0),
            NumberExpr::PathWithDefault { path, default } => ctx
                .get_number(path)
                .unwrap_or_else(|| default.value(ctx)),
            NumberExpr::Invert(e) => -e.value(ctx),
            NumberExpr::Chain { op, operands } => operands
                .iter()
                .fold(op.identity(), |acc, e| op.apply(acc, e.value(ctx))),
            NumberExpr::Subtract(l, r) => l.value(ctx) - r.value(ctx),
            NumberExpr::Divide(l, r) => l.value(ctx) / r.value(ctx),
            NumberExpr::Length(a) => a.value(ctx).len() as f64,
        }
    }
}

impl BooleanExpr {
    pub fn value<C: Context + ?Sized>(&self, ctx: &C) -> bool {
        match self {
            BooleanExpr::Literal(b) => *b,
            BooleanExpr::Path(path) => ctx.get_boolean(path).unwrap_or(false),
            BooleanExpr::PathWithDefault { path, default } => ctx
                .get_boolean(path)
                .unwrap_or_else(|| default.value(ctx)),
            BooleanExpr::Not(e) => !e.value(ctx),
            BooleanExpr::Compare { op, left, right } => op.apply(left.value(ctx), right.value(ctx)),
            BooleanExpr::Equal(l, r) => match (l.value(ctx), r.value(ctx)) {
                (Some(a), Some(b)) => a.scalar_eq(&b),
                _ => false,
            },
            BooleanExpr::Logic { op, operands } => {
                // Stops at the first operand that decides the outcome.
                let absorbing = op.absorbing();
                if operands.iter().any(|e| e.value(ctx) == absorbing) {
                    absorbing
                } else {
                    op.identity()
                }
            }
        }
    }
}

impl StringExpr {
    pub fn value<C: Context + ?Sized>(&self, ctx: &C) -> String {
        match self {
            StringExpr::Literal(s) => s.clone(),
            StringExpr::Path(path) => ctx.get_string(path).unwrap_or_default(),
            StringExpr::PathWithDefault { path, default } => ctx
                .get_string(path)
                .unwrap_or_else(|| default.value(ctx)),
        }
    }
}

impl ArrayExpr {
    pub fn value<C: Context + ?Sized>(&self, ctx: &C) -> Vec<Value> {
        match self {
            ArrayExpr::Path(path) => ctx.get_array(path).unwrap_or_default(),
            ArrayExpr::PathWithDefault { path, default } => ctx
                .get_array(path)
                .unwrap_or_else(|| default.value(ctx)),
        }
    }
}

impl Expr {
    /// Evaluates the expression. `None` only comes from an untyped path
    /// that misses and has no default.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig_lang::{compile, EmptyContext, Value};
    ///
    /// let expr = compile("$.doAThing ? true").unwrap();
    /// assert_eq!(expr.value(&EmptyContext), Some(Value::Boolean(true)));
    /// ```
    pub fn value<C: Context + ?Sized>(&self, ctx: &C) -> Option<Value> {
        match self {
            Expr::Number(e) => Some(Value::Number(e.value(ctx))),
            Expr::Boolean(e) => Some(Value::Boolean(e.value(ctx))),
            Expr::String(e) => Some(Value::String(e.value(ctx))),
            Expr::Array(e) => Some(Value::Array(e.value(ctx))),
            Expr::Path(path) => ctx.get_value(path),
            Expr::PathWithDefault { path, default } => {
                ctx.get_value(path).or_else(|| default.value(ctx))
            }
        }
    }
}
