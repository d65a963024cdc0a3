//! Evaluate expressions against JSON input

use super::{CliError, build};
use crate::json::value_to_json;

/// Options for the eval command
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON input string
    pub input: Option<String>,
    /// Reduce before evaluating
    pub reduce: bool,
}

/// Evaluates an expression against the JSON input. A missing untyped path
/// yields JSON `null`.
pub fn execute_eval(options: &EvalOptions) -> Result<serde_json::Value, CliError> {
    let expr = build(&options.expression, options.reduce)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str)?;

    Ok(expr
        .value(&document)
        .map_or(serde_json::Value::Null, value_to_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(expression: &str, input: &str) -> Result<serde_json::Value, CliError> {
        execute_eval(&EvalOptions {
            expression: expression.to_string(),
            input: Some(input.to_string()),
            reduce: true,
        })
    }

    #[test]
    fn test_eval_against_json() {
        let result = eval("length($.arr1) + length($.arr2) < 3", r#"{"arr1": [1, 2], "arr2": [3, 4]}"#);
        assert_eq!(result.unwrap(), json!(false));
    }

    #[test]
    fn test_eval_missing_path_is_null() {
        assert_eq!(eval("$.nope", "{}").unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_eval_returns_objects() {
        assert_eq!(eval("$.user", r#"{"user": {"id": 7}}"#).unwrap(), json!({"id": 7}));
    }

    #[test]
    fn test_eval_requires_input() {
        let err = execute_eval(&EvalOptions {
            expression: "1".to_string(),
            input: None,
            reduce: true,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }

    #[test]
    fn test_eval_rejects_bad_json() {
        assert!(matches!(eval("1", "{"), Err(CliError::Json(_))));
    }
}
