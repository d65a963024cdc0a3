//! JSON <-> Sprig Value conversion, and JSON documents as evaluation contexts.

use serde_json::Value as Json;

use crate::{
    ast::{Path, PathSegment},
    context::Context,
    value::Value,
};

/// Convert serde_json::Value to Sprig Value
pub fn json_to_value(v: Json) -> Value {
    match v {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(b),
        // Every JSON number is representable, possibly with rounding, as f64.
        Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        Json::String(s) => Value::String(s),
        Json::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        Json::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Convert Sprig Value to serde_json::Value. Non-finite numbers become `null`.
pub fn value_to_json(v: Value) -> Json {
    match v {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(b),
        Value::Number(n) => {
            let negative_zero = n == 0.0 && n.is_sign_negative();
            if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 && !negative_zero {
                Json::Number((n as i64).into())
            } else {
                serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
            }
        }
        Value::String(s) => Json::String(s),
        Value::Array(arr) => Json::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Object(obj) => {
            Json::Object(obj.into_iter().map(|(k, v)| (k, value_to_json(v))).collect())
        }
    }
}

fn lookup<'a>(root: &'a Json, path: &Path) -> Option<&'a Json> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| match segment {
            PathSegment::Field(key) => current.as_object()?.get(key),
            PathSegment::Index(i) => current.as_array()?.get(*i),
        })
}

/// A JSON document is a context rooted at itself. Lookups walk the document
/// in place; only the value found is converted.
impl Context for Json {
    fn get_value(&self, path: &Path) -> Option<Value> {
        lookup(self, path).cloned().map(json_to_value)
    }

    fn get_number(&self, path: &Path) -> Option<f64> {
        lookup(self, path)?.as_f64()
    }

    fn get_boolean(&self, path: &Path) -> Option<bool> {
        lookup(self, path)?.as_bool()
    }

    fn get_string(&self, path: &Path) -> Option<String> {
        lookup(self, path)?.as_str().map(str::to_string)
    }

    fn get_array(&self, path: &Path) -> Option<Vec<Value>> {
        let items = lookup(self, path)?.as_array()?;
        Some(items.iter().cloned().map(json_to_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    #[test]
    fn test_json_lookups() {
        let doc = json!({"a": {"b": [1, 2.5, "x"]}, "flag": true, "nothing": null});
        assert_eq!(doc.get_number(&path!["a", "b", 1usize]), Some(2.5));
        assert_eq!(doc.get_number(&path!["a", "b", 0usize]), Some(1.0));
        assert_eq!(doc.get_boolean(&path!["flag"]), Some(true));
        assert_eq!(doc.get_string(&path!["a", "b", 2usize]), Some("x".to_string()));
        assert_eq!(doc.get_array(&path!["a", "b"]).map(|a| a.len()), Some(3));
        assert_eq!(doc.get_value(&path!["nothing"]), Some(Value::Null));
        assert_eq!(doc.get_boolean(&path!["nothing"]), None);
        assert_eq!(doc.get_value(&path!["a", 0usize]), None);
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        assert_eq!(value_to_json(Value::Number(6.0)), json!(6));
        assert_eq!(value_to_json(Value::Number(-85.2)), json!(-85.2));
        assert_eq!(value_to_json(Value::Number(f64::NAN)), Json::Null);
    }

    #[test]
    fn test_negative_zero_keeps_its_sign() {
        let json = value_to_json(Value::Number(-0.0));
        assert!(json.as_i64().is_none());
        assert!(json.as_f64().is_some_and(|n| n == 0.0 && n.is_sign_negative()));
        assert_eq!(value_to_json(Value::Number(0.0)), json!(0));
    }
}
