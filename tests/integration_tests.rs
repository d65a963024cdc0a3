// tests/integration_tests.rs

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use serde_json::json;
use sprig_lang::{
    BooleanExpr, Context, EmptyContext, Expr, NumberExpr, Path, Value, compile, parse,
};

fn eval(expression: &str, input: serde_json::Value) -> Option<Value> {
    let expr = compile(expression).unwrap_or_else(|e| panic!("{}: {}", expression, e));
    expr.value(&input)
}

fn number(n: f64) -> Option<Value> {
    Some(Value::Number(n))
}

fn boolean(b: bool) -> Option<Value> {
    Some(Value::Boolean(b))
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_sum_reduces_and_evaluates_to_six() {
    let expr = compile("sum(1, 2, 3)").unwrap();
    assert_eq!(expr, Expr::Number(NumberExpr::Literal(6.0)));
    assert_eq!(expr.value(&EmptyContext), number(6.0));
}

#[test]
fn test_missing_path_uses_default() {
    assert_eq!(eval("$.doAThing ? true", json!({})), boolean(true));
    assert_eq!(eval("$.doAThing ? true", json!({"doAThing": false})), boolean(false));
}

#[test]
fn test_array_lengths() {
    let input = json!({"arr1": [1, 2], "arr2": ["a", "b"]});
    assert_eq!(eval("length($.arr1) + length($.arr2) < 3", input.clone()), boolean(false));
    assert_eq!(eval("length($.arr1) + length($.arr2) <= 4", input), boolean(true));
}

#[test]
fn test_invert_group() {
    assert_eq!(eval("-(42 + 43.2)", json!(null)), number(-85.2));
}

#[test]
fn test_complicated_expression() {
    let expr = "!($.doAThing ? true) && ((length($.arr1) + length($.arr2)) < 3)";
    assert_eq!(
        eval(expr, json!({"doAThing": false, "arr1": [1], "arr2": [2]})),
        boolean(true)
    );
    assert_eq!(
        eval(expr, json!({"doAThing": false, "arr1": [1, 2], "arr2": [2]})),
        boolean(false)
    );
    assert_eq!(eval(expr, json!({})), boolean(false));
}

#[test]
fn test_nested_paths() {
    let input = json!({
        "order": {
            "items": [
                {"price": 2.5, "qty": 4},
                {"price": 10, "qty": 1}
            ],
            "my key": "x"
        }
    });
    assert_eq!(
        eval(
            "$.order.items[0].price * $.order.items[0].qty + $.order.items[1].price",
            input.clone()
        ),
        number(20.0)
    );
    assert_eq!(
        eval("$.order['my key']", input.clone()),
        Some(Value::String("x".to_string()))
    );
    assert_eq!(eval("$.order.items[5].price ? -1", input), number(-1.0));
}

#[test]
fn test_equality() {
    let input = json!({"status": "active", "count": 3, "flag": true});
    assert_eq!(eval("$.status == 'active'", input.clone()), boolean(true));
    assert_eq!(eval("$.count == 1 + 2", input.clone()), boolean(true));
    assert_eq!(eval("$.flag == true", input.clone()), boolean(true));
    // Values of different kinds are never equal
    assert_eq!(eval("$.count == '3'", input.clone()), boolean(false));
    // A missing side is never equal to anything
    assert_eq!(eval("$.missing == $.other", input), boolean(false));
}

#[test]
fn test_unspaced_subtraction() {
    let input = json!({"n": 5});
    assert_eq!(eval("$.n-1", input.clone()), number(4.0));
    assert_eq!(eval("10 -$.n -2", input), number(3.0));
}

#[test]
fn test_logic_words_and_symbols() {
    let input = json!({"a": true, "b": false});
    assert_eq!(eval("$.a and $.b", input.clone()), boolean(false));
    assert_eq!(eval("$.a or $.b", input.clone()), boolean(true));
    assert_eq!(eval("$.b || !$.b && $.a", input), boolean(true));
}

// ============================================================================
// Missing and mistyped values
// ============================================================================

#[test]
fn test_zero_values_for_missing_paths() {
    assert_eq!(eval("$.n + 0", json!({})), number(0.0));
    assert_eq!(eval("!$.b", json!({})), boolean(true));
    assert_eq!(eval("length($.xs)", json!({})), number(0.0));
    assert_eq!(eval("$.n", json!({})), None);
}

#[test]
fn test_wrong_kind_counts_as_missing() {
    let input = json!({"n": "not a number", "xs": {"not": "an array"}});
    assert_eq!(eval("$.n + 1", input.clone()), number(1.0));
    assert_eq!(eval("($.n ? 5) + 1", input.clone()), number(6.0));
    assert_eq!(eval("length($.xs ? $.ys)", input), number(0.0));
}

#[test]
fn test_untyped_default_accepts_any_found_value() {
    let input = json!({"a": [1, 2], "b": null});
    assert_eq!(
        eval("$.a ? 0", input.clone()),
        Some(Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
    assert_eq!(eval("$.b ? 0", input.clone()), Some(Value::Null));
    assert_eq!(eval("$.c ? 0", input), number(0.0));
}

#[test]
fn test_division_by_zero() {
    let input = json!({"zero": 0});
    assert_eq!(eval("1 / $.zero", input.clone()), number(f64::INFINITY));
    assert_eq!(eval("-1 / $.zero", input.clone()), number(f64::NEG_INFINITY));
    match eval("$.zero / $.zero", input) {
        Some(Value::Number(n)) => assert!(n.is_nan()),
        other => panic!("expected NaN, got {:?}", other),
    }
}

// ============================================================================
// Evaluation order
// ============================================================================

/// Records every path it is asked for.
struct RecordingContext {
    document: serde_json::Value,
    lookups: RefCell<Vec<Path>>,
}

impl RecordingContext {
    fn new(document: serde_json::Value) -> Self {
        RecordingContext {
            document,
            lookups: RefCell::new(vec![]),
        }
    }

    fn looked_up(&self) -> Vec<String> {
        self.lookups.borrow().iter().map(Path::to_string).collect()
    }
}

impl Context for RecordingContext {
    fn get_value(&self, path: &Path) -> Option<Value> {
        self.lookups.borrow_mut().push(path.clone());
        self.document.get_value(path)
    }
}

#[test]
fn test_and_stops_at_first_false() {
    let ctx = RecordingContext::new(json!({"a": true, "b": false, "c": true}));
    let expr = compile("$.a && $.b && $.c").unwrap();
    assert_eq!(expr.value(&ctx), boolean(false));
    assert_eq!(ctx.looked_up(), vec!["$.a", "$.b"]);
}

#[test]
fn test_or_stops_at_first_true() {
    let ctx = RecordingContext::new(json!({"a": false, "b": true}));
    let expr = compile("$.a || $.b || $.c").unwrap();
    assert_eq!(expr.value(&ctx), boolean(true));
    assert_eq!(ctx.looked_up(), vec!["$.a", "$.b"]);
}

#[test]
fn test_default_evaluated_only_on_miss() {
    let ctx = RecordingContext::new(json!({"a": 1}));
    let expr = compile("($.a ? $.fallback) + 1").unwrap();
    assert_eq!(expr.value(&ctx), number(2.0));
    assert_eq!(ctx.looked_up(), vec!["$.a"]);

    let ctx = RecordingContext::new(json!({"fallback": 4}));
    assert_eq!(expr.value(&ctx), number(5.0));
    assert_eq!(ctx.looked_up(), vec!["$.a", "$.fallback"]);
}

// ============================================================================
// Contexts
// ============================================================================

#[test]
fn test_value_context_matches_json_context() {
    let document = json!({"user": {"age": 30, "tags": ["a", "b"], "name": "Ann"}});
    let value = sprig_lang::json::json_to_value(document.clone());
    let expr = compile("$.user.age >= 18 && length($.user.tags) == 2 && $.user.name == 'Ann'")
        .unwrap();
    assert_eq!(expr.value(&document), boolean(true));
    assert_eq!(expr.value(&value), boolean(true));
}

#[test]
fn test_trait_object_context() {
    let document = json!({"x": 2});
    let ctx: &dyn Context = &document;
    let expr = compile("$.x * 21").unwrap();
    assert_eq!(expr.value(ctx), number(42.0));
}

#[test]
fn test_compiled_expression_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expr>();

    let expr = std::sync::Arc::new(compile("$.n * 2").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let expr = expr.clone();
            std::thread::spawn(move || expr.value(&json!({"n": i})))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![number(0.0), number(2.0), number(4.0), number(6.0)]);
}

// ============================================================================
// Canonical form
// ============================================================================

#[test]
fn test_display_reparses_to_same_tree() {
    for input in [
        "sum($.a, 2) * -$.b",
        "!($.doAThing ? true) && ((length($.arr1) + length($.arr2)) < 3)",
        "$.a || $.b && $.c == 'it\\'s'",
        "($.x ? -3) - 1 / $.y",
        "$['odd key'][0] == $.b",
        "$.a ? 'fallback'",
        "product($.a, $.b) >= 0.5",
    ] {
        let expr = parse(input).unwrap();
        let rendered = expr.to_string();
        assert_eq!(parse(&rendered).unwrap(), expr, "rendered as {}", rendered);
    }
}

#[test]
fn test_display_of_folded_infinity() {
    let expr = compile("$.a + 1 / 0").unwrap();
    assert_eq!(expr.to_string(), "sum($.a, (1 / 0))");
    let reparsed = compile(&expr.to_string()).unwrap();
    assert_eq!(reparsed.value(&EmptyContext), number(f64::INFINITY));
}

#[test]
fn test_display_of_single_operand_logic() {
    let expr = Expr::Boolean(BooleanExpr::and(vec![BooleanExpr::Path(
        sprig_lang::path!["a"],
    )]));
    assert_eq!(expr.to_string(), "($.a && true)");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_display_prefixes_stage() {
    assert_eq!(
        compile("1 % 2").unwrap_err().to_string(),
        "lex error: unexpected token '%' at position 2"
    );
    assert_eq!(
        compile("1 +").unwrap_err().to_string(),
        "parse error: unexpected end of input, expected an expression"
    );
}
