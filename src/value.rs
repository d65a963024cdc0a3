use std::collections::HashMap;

use crate::ast::Kind;

/// A runtime value produced by evaluation or supplied by a context.
///
/// Expressions only ever produce the four scalar and array kinds. `Null` and
/// `Object` exist because data sources hold them: they can sit inside arrays or
/// come back from an untyped path lookup.
///
/// # Examples
///
/// ```
/// use sprig_lang::Value;
/// use std::collections::HashMap;
///
/// let number = Value::Number(42.0);
/// let array = Value::Array(vec![Value::Boolean(true), Value::String("x".into())]);
///
/// let mut obj = HashMap::new();
/// obj.insert("items".to_string(), array);
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null from the data source
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// 64-bit floating-point number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Object with string keys, from the data source
    Object(HashMap<String, Value>),
}

impl Value {
    /// The expression kind this value belongs to, if any.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Boolean(_) => Some(Kind::Boolean),
            Value::Number(_) => Some(Kind::Number),
            Value::String(_) => Some(Kind::String),
            Value::Array(_) => Some(Kind::Array),
            Value::Null | Value::Object(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Equality as `==` defines it: same-kind scalars compare by value,
    /// every other pairing is unequal.
    pub fn scalar_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
