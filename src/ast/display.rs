//! Canonical source rendering.
//!
//! Composite nodes are always parenthesized so the output re-parses without
//! consulting precedence. Non-finite literals, which only arise from folding,
//! render as the division that produces them. A typed path rendered on its
//! own or directly under `==` re-parses as an untyped path.

use std::fmt::{self, Display, Formatter};

use crate::ast::{ArrayExpr, BooleanExpr, Expr, Logical, NumberExpr, Path, StringExpr};

fn write_number(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("(0 / 0)")
    } else if n == f64::INFINITY {
        f.write_str("(1 / 0)")
    } else if n == f64::NEG_INFINITY {
        f.write_str("(-1 / 0)")
    } else {
        write!(f, "{}", n)
    }
}

/// Writes `s` as a single-quoted literal, escaping `'` and `\`.
pub(crate) fn write_string(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in s.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", ch)?;
    }
    f.write_str("'")
}

fn write_default(f: &mut Formatter<'_>, path: &Path, default: &dyn Display) -> fmt::Result {
    write!(f, "({} ? {})", path, default)
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for NumberExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberExpr::Literal(n) => write_number(f, *n),
            NumberExpr::Path(path) => write!(f, "{}", path),
            NumberExpr::PathWithDefault { path, default } => write_default(f, path, default),
            NumberExpr::Invert(e) => write!(f, "-({})", e),
            NumberExpr::Chain { op, operands } => {
                write!(f, "{}(", op.name())?;
                write_list(f, operands, ", ")?;
                f.write_str(")")
            }
            NumberExpr::Subtract(l, r) => write!(f, "({} - {})", l, r),
            NumberExpr::Divide(l, r) => write!(f, "({} / {})", l, r),
            NumberExpr::Length(a) => write!(f, "length({})", a),
        }
    }
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BooleanExpr::Literal(b) => write!(f, "{}", b),
            BooleanExpr::Path(path) => write!(f, "{}", path),
            BooleanExpr::PathWithDefault { path, default } => write_default(f, path, default),
            BooleanExpr::Not(e) => write!(f, "!({})", e),
            BooleanExpr::Compare { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            BooleanExpr::Equal(l, r) => write!(f, "({} == {})", l, r),
            BooleanExpr::Logic { op, operands } => match operands.as_slice() {
                [] => write!(f, "{}", op.identity()),
                // A lone operand keeps its node by pairing with the identity.
                [only] => write!(f, "({} {} {})", only, op.symbol(), op.identity()),
                _ => {
                    f.write_str("(")?;
                    let separator = match op {
                        Logical::And => " && ",
                        Logical::Or => " || ",
                    };
                    write_list(f, operands, separator)?;
                    f.write_str(")")
                }
            },
        }
    }
}

impl Display for StringExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StringExpr::Literal(s) => write_string(f, s),
            StringExpr::Path(path) => write!(f, "{}", path),
            StringExpr::PathWithDefault { path, default } => write_default(f, path, default),
        }
    }
}

impl Display for ArrayExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArrayExpr::Path(path) => write!(f, "{}", path),
            ArrayExpr::PathWithDefault { path, default } => write_default(f, path, default),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(e) => write!(f, "{}", e),
            Expr::Boolean(e) => write!(f, "{}", e),
            Expr::String(e) => write!(f, "{}", e),
            Expr::Array(e) => write!(f, "{}", e),
            Expr::Path(path) => write!(f, "{}", path),
            Expr::PathWithDefault { path, default } => write_default(f, path, default),
        }
    }
}
