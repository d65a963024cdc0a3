/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl Comparison {
    pub fn apply(self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Less => left < right,
            Comparison::LessEqual => left <= right,
            Comparison::Greater => left > right,
            Comparison::GreaterEqual => left >= right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterEqual => ">=",
        }
    }
}

/// Associative numeric operators that take any number of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associative {
    /// `sum(...)` and `+`
    Sum,
    /// `product(...)` and `*`
    Product,
}

impl Associative {
    /// Result of applying the operator to no operands.
    pub fn identity(self) -> f64 {
        match self {
            Associative::Sum => 0.0,
            Associative::Product => 1.0,
        }
    }

    pub fn apply(self, acc: f64, operand: f64) -> f64 {
        match self {
            Associative::Sum => acc + operand,
            Associative::Product => acc * operand,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Associative::Sum => "sum",
            Associative::Product => "product",
        }
    }
}

/// Short-circuiting logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logical {
    /// `&&` and `and`
    And,
    /// `||` and `or`
    Or,
}

impl Logical {
    /// Result of applying the operator to no operands. Operands equal to it
    /// never change the outcome.
    pub fn identity(self) -> bool {
        match self {
            Logical::And => true,
            Logical::Or => false,
        }
    }

    /// The operand value that decides the outcome on its own.
    pub fn absorbing(self) -> bool {
        !self.identity()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Logical::And => "&&",
            Logical::Or => "||",
        }
    }
}
