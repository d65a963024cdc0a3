//! Constant folding.
//!
//! `reduce` consumes a tree and returns an equivalent one, bottom-up: literal
//! operands are folded, nested sums, products, conjunctions and disjunctions of
//! the same operator are flattened into their parent, and identity operands are
//! dropped. A reduced tree evaluates to the same value as its input in every
//! context, keeps its result kind, and reduces to itself.
//!
//! Anything that depends on the context (paths, `length`) is kept; only the
//! defaults of paths are reduced.
//!
//! Folding `0 / 0` leaves a NaN literal, and NaN is unequal to itself, so two
//! such trees compare unequal with `==` even when they are identical. Compare
//! their rendered forms instead.

use crate::ast::{Associative, BooleanExpr, Expr, Logical, NumberExpr, StringExpr};

impl NumberExpr {
    pub fn reduce(self) -> NumberExpr {
        match self {
            NumberExpr::Literal(_) | NumberExpr::Path(_) | NumberExpr::Length(_) => self,
            NumberExpr::PathWithDefault { path, default } => NumberExpr::PathWithDefault {
                path,
                default: Box::new((*default).reduce()),
            },
            NumberExpr::Invert(e) => match (*e).reduce() {
                NumberExpr::Literal(n) => NumberExpr::Literal(-n),
                e => NumberExpr::Invert(Box::new(e)),
            },
            NumberExpr::Chain { op, operands } => reduce_chain(op, operands),
            NumberExpr::Subtract(l, r) => {
                let (l, r) = ((*l).reduce(), (*r).reduce());
                match (l.as_literal(), r.as_literal()) {
                    (Some(a), Some(b)) => NumberExpr::Literal(a - b),
                    _ => NumberExpr::Subtract(Box::new(l), Box::new(r)),
                }
            }
            NumberExpr::Divide(l, r) => {
                let (l, r) = ((*l).reduce(), (*r).reduce());
                match (l.as_literal(), r.as_literal()) {
                    (Some(a), Some(b)) => NumberExpr::Literal(a / b),
                    _ => NumberExpr::Divide(Box::new(l), Box::new(r)),
                }
            }
        }
    }
}

/// Folds every literal operand, including those of nested chains of the same
/// operator, into one trailing literal. The literal is omitted when it is the
/// operator's identity.
fn reduce_chain(op: Associative, operands: Vec<NumberExpr>) -> NumberExpr {
    let mut acc = op.identity();
    let mut rest = Vec::with_capacity(operands.len());

    for operand in operands {
        match operand.reduce() {
            NumberExpr::Literal(n) => acc = op.apply(acc, n),
            NumberExpr::Chain {
                op: inner,
                operands: nested,
            } if inner == op => {
                for e in nested {
                    match e {
                        NumberExpr::Literal(n) => acc = op.apply(acc, n),
                        e => rest.push(e),
                    }
                }
            }
            other => rest.push(other),
        }
    }

    if rest.is_empty() {
        return NumberExpr::Literal(acc);
    }
    if acc != op.identity() {
        rest.push(NumberExpr::Literal(acc));
    }
    NumberExpr::Chain { op, operands: rest }
}

impl BooleanExpr {
    pub fn reduce(self) -> BooleanExpr {
        match self {
            BooleanExpr::Literal(_) | BooleanExpr::Path(_) => self,
            BooleanExpr::PathWithDefault { path, default } => BooleanExpr::PathWithDefault {
                path,
                default: Box::new((*default).reduce()),
            },
            BooleanExpr::Not(e) => match (*e).reduce() {
                BooleanExpr::Literal(b) => BooleanExpr::Literal(!b),
                e => BooleanExpr::Not(Box::new(e)),
            },
            BooleanExpr::Compare { op, left, right } => {
                let (left, right) = ((*left).reduce(), (*right).reduce());
                match (left.as_literal(), right.as_literal()) {
                    (Some(a), Some(b)) => BooleanExpr::Literal(op.apply(a, b)),
                    _ => BooleanExpr::compare(op, left, right),
                }
            }
            BooleanExpr::Equal(l, r) => {
                let (l, r) = ((*l).reduce(), (*r).reduce());
                match literal_equality(&l, &r) {
                    Some(equal) => BooleanExpr::Literal(equal),
                    None => BooleanExpr::Equal(Box::new(l), Box::new(r)),
                }
            }
            BooleanExpr::Logic { op, operands } => reduce_logic(op, operands),
        }
    }
}

/// Outcome of `==` when both sides are literals of the same kind.
fn literal_equality(l: &Expr, r: &Expr) -> Option<bool> {
    match (l, r) {
        (Expr::String(StringExpr::Literal(a)), Expr::String(StringExpr::Literal(b))) => {
            Some(a == b)
        }
        (Expr::Number(NumberExpr::Literal(a)), Expr::Number(NumberExpr::Literal(b))) => {
            Some(a == b)
        }
        (Expr::Boolean(BooleanExpr::Literal(a)), Expr::Boolean(BooleanExpr::Literal(b))) => {
            Some(a == b)
        }
        _ => None,
    }
}

/// A literal equal to the absorbing value decides the whole node; identity
/// literals are dropped. No operands left means the identity.
fn reduce_logic(op: Logical, operands: Vec<BooleanExpr>) -> BooleanExpr {
    let mut rest = Vec::with_capacity(operands.len());

    for operand in operands {
        match operand.reduce() {
            BooleanExpr::Literal(b) if b == op.absorbing() => return BooleanExpr::Literal(b),
            BooleanExpr::Literal(_) => {}
            BooleanExpr::Logic {
                op: inner,
                operands: nested,
            } if inner == op => rest.extend(nested),
            other => rest.push(other),
        }
    }

    if rest.is_empty() {
        BooleanExpr::Literal(op.identity())
    } else {
        BooleanExpr::Logic { op, operands: rest }
    }
}

impl Expr {
    /// Constant-folds the tree. See the [module docs](crate::reduce).
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig_lang::{parse, Expr, NumberExpr};
    ///
    /// let expr = parse("sum(1, sum(2, 3))").unwrap().reduce();
    /// assert_eq!(expr, Expr::Number(NumberExpr::Literal(6.0)));
    /// ```
    pub fn reduce(self) -> Expr {
        match self {
            Expr::Number(e) => Expr::Number(e.reduce()),
            Expr::Boolean(e) => Expr::Boolean(e.reduce()),
            Expr::String(_) | Expr::Array(_) | Expr::Path(_) => self,
            Expr::PathWithDefault { path, default } => Expr::PathWithDefault {
                path,
                default: Box::new((*default).reduce()),
            },
        }
    }
}
