use crate::{
    ast::{Path, PathSegment},
    value::Value,
};

/// Resolves paths to values during evaluation.
///
/// `None` means the path was not found, which is never an error: evaluation
/// falls back to the default or zero value of the requested kind. Only
/// [`Context::get_value`] is required; the typed lookups narrow it and treat a
/// value of another kind as a miss. Implementations may override them to
/// avoid building intermediate values.
///
/// Each call must be safe to make from the thread doing the evaluation.
pub trait Context {
    /// Untyped lookup.
    fn get_value(&self, path: &Path) -> Option<Value>;

    fn get_number(&self, path: &Path) -> Option<f64> {
        self.get_value(path)?.as_number()
    }

    fn get_boolean(&self, path: &Path) -> Option<bool> {
        self.get_value(path)?.as_bool()
    }

    fn get_string(&self, path: &Path) -> Option<String> {
        match self.get_value(path)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn get_array(&self, path: &Path) -> Option<Vec<Value>> {
        match self.get_value(path)? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl<C: Context + ?Sized> Context for &C {
    fn get_value(&self, path: &Path) -> Option<Value> {
        (**self).get_value(path)
    }

    fn get_number(&self, path: &Path) -> Option<f64> {
        (**self).get_number(path)
    }

    fn get_boolean(&self, path: &Path) -> Option<bool> {
        (**self).get_boolean(path)
    }

    fn get_string(&self, path: &Path) -> Option<String> {
        (**self).get_string(path)
    }

    fn get_array(&self, path: &Path) -> Option<Vec<Value>> {
        (**self).get_array(path)
    }
}

/// Context with no data; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn get_value(&self, _path: &Path) -> Option<Value> {
        None
    }
}

impl Value {
    /// Walks `path` from this value. Fields index objects, indices index
    /// arrays; anything else misses.
    pub fn lookup(&self, path: &Path) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| match (current, segment) {
                (Value::Object(map), PathSegment::Field(key)) => map.get(key),
                (Value::Array(items), PathSegment::Index(i)) => items.get(*i),
                _ => None,
            })
    }
}

/// An in-memory value graph is a context rooted at itself. A `Null` at the
/// end of the path is found by the untyped lookup and a miss for typed ones.
impl Context for Value {
    fn get_value(&self, path: &Path) -> Option<Value> {
        self.lookup(path).cloned()
    }

    fn get_number(&self, path: &Path) -> Option<f64> {
        self.lookup(path)?.as_number()
    }

    fn get_boolean(&self, path: &Path) -> Option<bool> {
        self.lookup(path)?.as_bool()
    }

    fn get_string(&self, path: &Path) -> Option<String> {
        self.lookup(path)?.as_str().map(str::to_string)
    }

    fn get_array(&self, path: &Path) -> Option<Vec<Value>> {
        self.lookup(path)?.as_array().map(<[Value]>::to_vec)
    }
}
