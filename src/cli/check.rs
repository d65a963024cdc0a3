//! Validate expressions without evaluating them

use super::{CliError, build};

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The expression to validate
    pub expression: String,
    /// Reduce before printing
    pub reduce: bool,
}

/// Validates an expression and returns its canonical, optionally reduced, form.
pub fn execute_check(options: &CheckOptions) -> Result<String, CliError> {
    let expr = build(&options.expression, options.reduce)?;
    Ok(expr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_prints_reduced_form() {
        let options = CheckOptions {
            expression: "sum($.x, 1, 2) > 2 * 3".to_string(),
            reduce: true,
        };
        assert_eq!(execute_check(&options).unwrap(), "(sum($.x, 3) > 6)");
    }

    #[test]
    fn test_check_without_reduce() {
        let options = CheckOptions {
            expression: "1 + 2".to_string(),
            reduce: false,
        };
        assert_eq!(execute_check(&options).unwrap(), "sum(1, 2)");
    }

    #[test]
    fn test_check_reports_errors() {
        let options = CheckOptions {
            expression: "1 +".to_string(),
            reduce: true,
        };
        let err = execute_check(&options).unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));
    }
}
