use std::fmt;

use crate::ast::{Associative, Comparison, Logical, Path};

/// Result kind of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Number,
    Boolean,
    String,
    Array,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expression whose result is a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberExpr {
    /// Literal number
    ///
    /// # Example
    /// ```text
    /// 42.5
    /// ```
    Literal(f64),

    /// Number at a path, `0` when the lookup misses
    Path(Path),

    /// Number at a path, falling back to `default` when the lookup misses
    ///
    /// # Example
    /// ```text
    /// ($.retries ? 3) + 1
    /// ```
    PathWithDefault {
        path: Path,
        default: Box<NumberExpr>,
    },

    /// Unary negation
    ///
    /// # Example
    /// ```text
    /// -(42 + 43.2)
    /// ```
    Invert(Box<NumberExpr>),

    /// Left fold of the operands with a sum or product
    ///
    /// # Examples
    /// ```text
    /// sum(1, 2, 3)
    /// $.a * $.b * 2
    /// ```
    Chain {
        op: Associative,
        operands: Vec<NumberExpr>,
    },

    /// Binary subtraction
    Subtract(Box<NumberExpr>, Box<NumberExpr>),

    /// Binary division, IEEE semantics for zero divisors
    Divide(Box<NumberExpr>, Box<NumberExpr>),

    /// Element count of an array
    ///
    /// # Example
    /// ```text
    /// length($.items)
    /// ```
    Length(ArrayExpr),
}

/// Expression whose result is a boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanExpr {
    /// Literal `true` or `false`
    Literal(bool),

    /// Boolean at a path, `false` when the lookup misses
    Path(Path),

    /// Boolean at a path, falling back to `default` when the lookup misses
    PathWithDefault {
        path: Path,
        default: Box<BooleanExpr>,
    },

    /// Logical negation
    Not(Box<BooleanExpr>),

    /// Numeric comparison
    ///
    /// # Example
    /// ```text
    /// length($.items) >= 3
    /// ```
    Compare {
        op: Comparison,
        left: Box<NumberExpr>,
        right: Box<NumberExpr>,
    },

    /// Same-kind scalar equality; mismatched kinds are never equal
    ///
    /// # Example
    /// ```text
    /// $.status == 'active'
    /// ```
    Equal(Box<Expr>, Box<Expr>),

    /// Short-circuiting conjunction or disjunction, evaluated left to right
    ///
    /// # Examples
    /// ```text
    /// $.a && $.b and $.c
    /// $.a || $.b or $.c
    /// ```
    Logic {
        op: Logical,
        operands: Vec<BooleanExpr>,
    },
}

/// Expression whose result is a string.
#[derive(Debug, Clone, PartialEq)]
pub enum StringExpr {
    /// Literal string
    ///
    /// # Example
    /// ```text
    /// 'hello'
    /// ```
    Literal(String),

    /// String at a path, empty when the lookup misses
    Path(Path),

    /// String at a path, falling back to `default` when the lookup misses
    PathWithDefault {
        path: Path,
        default: Box<StringExpr>,
    },
}

/// Expression whose result is an array. There is no array literal syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayExpr {
    /// Array at a path, empty when the lookup misses
    Path(Path),

    /// Array at a path, falling back to `default` when the lookup misses
    PathWithDefault {
        path: Path,
        default: Box<ArrayExpr>,
    },
}

/// Expression whose result kind is only known at evaluation time.
///
/// The parser produces `Expr` at the root and for operands that accept any
/// kind (the sides of `==`). A typed family is wrapped in its matching variant;
/// bare paths stay untyped until evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Boolean(BooleanExpr),
    String(StringExpr),
    Array(ArrayExpr),

    /// Value of any kind at a path, nothing when the lookup misses
    ///
    /// # Example
    /// ```text
    /// $.user.name
    /// ```
    Path(Path),

    /// Value of any kind at a path, falling back to `default` when the lookup misses
    ///
    /// # Example
    /// ```text
    /// $.doAThing ? true
    /// ```
    PathWithDefault {
        path: Path,
        default: Box<Expr>,
    },
}

impl NumberExpr {
    pub fn sum(operands: Vec<NumberExpr>) -> Self {
        NumberExpr::Chain {
            op: Associative::Sum,
            operands,
        }
    }

    pub fn product(operands: Vec<NumberExpr>) -> Self {
        NumberExpr::Chain {
            op: Associative::Product,
            operands,
        }
    }

    pub fn as_literal(&self) -> Option<f64> {
        match self {
            NumberExpr::Literal(n) => Some(*n),
            _ => None,
        }
    }
}

impl BooleanExpr {
    pub fn and(operands: Vec<BooleanExpr>) -> Self {
        BooleanExpr::Logic {
            op: Logical::And,
            operands,
        }
    }

    pub fn or(operands: Vec<BooleanExpr>) -> Self {
        BooleanExpr::Logic {
            op: Logical::Or,
            operands,
        }
    }

    pub fn compare(op: Comparison, left: NumberExpr, right: NumberExpr) -> Self {
        BooleanExpr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn as_literal(&self) -> Option<bool> {
        match self {
            BooleanExpr::Literal(b) => Some(*b),
            _ => None,
        }
    }
}

impl Expr {
    /// The statically known result kind, `None` for untyped paths.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Expr::Number(_) => Some(Kind::Number),
            Expr::Boolean(_) => Some(Kind::Boolean),
            Expr::String(_) => Some(Kind::String),
            Expr::Array(_) => Some(Kind::Array),
            Expr::Path(_) | Expr::PathWithDefault { .. } => None,
        }
    }

    /// Number of nodes in the tree, counting each path reference once.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(e) => e.node_count(),
            Expr::Boolean(e) => e.node_count(),
            Expr::String(e) => e.node_count(),
            Expr::Array(e) => e.node_count(),
            Expr::Path(_) => 1,
            Expr::PathWithDefault { default, .. } => 1 + default.node_count(),
        }
    }
}

impl NumberExpr {
    pub fn node_count(&self) -> usize {
        match self {
            NumberExpr::Literal(_) | NumberExpr::Path(_) => 1,
            NumberExpr::PathWithDefault { default, .. } => 1 + default.node_count(),
            NumberExpr::Invert(e) => 1 + e.node_count(),
            NumberExpr::Chain { operands, .. } => {
                1 + operands.iter().map(NumberExpr::node_count).sum::<usize>()
            }
            NumberExpr::Subtract(l, r) | NumberExpr::Divide(l, r) => {
                1 + l.node_count() + r.node_count()
            }
            NumberExpr::Length(a) => 1 + a.node_count(),
        }
    }
}

impl BooleanExpr {
    pub fn node_count(&self) -> usize {
        match self {
            BooleanExpr::Literal(_) | BooleanExpr::Path(_) => 1,
            BooleanExpr::PathWithDefault { default, .. } => 1 + default.node_count(),
            BooleanExpr::Not(e) => 1 + e.node_count(),
            BooleanExpr::Compare { left, right, .. } => 1 + left.node_count() + right.node_count(),
            BooleanExpr::Equal(l, r) => 1 + l.node_count() + r.node_count(),
            BooleanExpr::Logic { operands, .. } => {
                1 + operands.iter().map(BooleanExpr::node_count).sum::<usize>()
            }
        }
    }
}

impl StringExpr {
    pub fn node_count(&self) -> usize {
        match self {
            StringExpr::Literal(_) | StringExpr::Path(_) => 1,
            StringExpr::PathWithDefault { default, .. } => 1 + default.node_count(),
        }
    }
}

impl ArrayExpr {
    pub fn node_count(&self) -> usize {
        match self {
            ArrayExpr::Path(_) => 1,
            ArrayExpr::PathWithDefault { default, .. } => 1 + default.node_count(),
        }
    }
}

// Narrowing a generic expression to a typed family. Paths take on the
// requested kind; anything else must already be of it. The error carries the
// kind that was found instead.

impl TryFrom<Expr> for NumberExpr {
    type Error = Kind;

    fn try_from(expr: Expr) -> Result<Self, Kind> {
        match expr {
            Expr::Number(e) => Ok(e),
            Expr::Path(path) => Ok(NumberExpr::Path(path)),
            Expr::PathWithDefault { path, default } => Ok(NumberExpr::PathWithDefault {
                path,
                default: Box::new(NumberExpr::try_from(*default)?),
            }),
            other => Err(other.kind().unwrap_or(Kind::Number)),
        }
    }
}

impl TryFrom<Expr> for BooleanExpr {
    type Error = Kind;

    fn try_from(expr: Expr) -> Result<Self, Kind> {
        match expr {
            Expr::Boolean(e) => Ok(e),
            Expr::Path(path) => Ok(BooleanExpr::Path(path)),
            Expr::PathWithDefault { path, default } => Ok(BooleanExpr::PathWithDefault {
                path,
                default: Box::new(BooleanExpr::try_from(*default)?),
            }),
            other => Err(other.kind().unwrap_or(Kind::Boolean)),
        }
    }
}

impl TryFrom<Expr> for StringExpr {
    type Error = Kind;

    fn try_from(expr: Expr) -> Result<Self, Kind> {
        match expr {
            Expr::String(e) => Ok(e),
            Expr::Path(path) => Ok(StringExpr::Path(path)),
            Expr::PathWithDefault { path, default } => Ok(StringExpr::PathWithDefault {
                path,
                default: Box::new(StringExpr::try_from(*default)?),
            }),
            other => Err(other.kind().unwrap_or(Kind::String)),
        }
    }
}

impl TryFrom<Expr> for ArrayExpr {
    type Error = Kind;

    fn try_from(expr: Expr) -> Result<Self, Kind> {
        match expr {
            Expr::Array(e) => Ok(e),
            Expr::Path(path) => Ok(ArrayExpr::Path(path)),
            Expr::PathWithDefault { path, default } => Ok(ArrayExpr::PathWithDefault {
                path,
                default: Box::new(ArrayExpr::try_from(*default)?),
            }),
            other => Err(other.kind().unwrap_or(Kind::Array)),
        }
    }
}
