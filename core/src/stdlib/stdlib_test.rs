use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    api::{Context, compile},
    evaluator::EvalError,
    stdlib::{BUILTINS, lookup, names},
    values::Value,
};

fn eval(source: &str, data: serde_json::Value) -> Option<serde_json::Value> {
    let expr = compile(source).unwrap_or_else(|e| panic!("Failed to compile '{}': {}", source, e));
    expr.evaluate(&Value::from_json(data), &Context::new())
        .unwrap_or_else(|e| panic!("Failed to evaluate '{}': {}", source, e))
        .map(|value| value.to_json())
}

fn eval_err(source: &str) -> EvalError {
    let expr = compile(source).unwrap_or_else(|e| panic!("Failed to compile '{}': {}", source, e));
    match expr.evaluate(&Value::Null, &Context::new()) {
        Ok(value) => panic!("Expected '{}' to fail, got {:?}", source, value),
        Err(err) => err,
    }
}

#[test]
fn test_table_is_sorted() {
    let names: Vec<_> = names().collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), BUILTINS.len());
}

#[test]
fn test_lookup() {
    assert_eq!(lookup("sum").map(|b| b.name), Some("sum"));
    assert!(lookup("Sum").is_none());
    assert!(lookup("nope").is_none());
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn test_sum() {
    assert_eq!(eval("$sum(c)", json!({"a": 1, "b": 2, "c": [1, 2, 3, 4, 5]})), Some(json!(15)));
    assert_eq!(eval("$sum([])", json!(null)), Some(json!(0)));
    assert_eq!(eval("$sum(7)", json!(null)), Some(json!(7)));
    assert_eq!(eval("$sum(missing)", json!({})), None);
}

#[test]
fn test_sum_rejects_non_numbers() {
    assert!(matches!(eval_err("$sum([1, 'x'])"), EvalError::Argument { .. }));
}

#[test]
fn test_count_max_min_average() {
    let data = json!({"v": [4, 1, 7]});
    assert_eq!(eval("$count(v)", data.clone()), Some(json!(3)));
    assert_eq!(eval("$count(missing)", data.clone()), Some(json!(0)));
    assert_eq!(eval("$max(v)", data.clone()), Some(json!(7)));
    assert_eq!(eval("$min(v)", data.clone()), Some(json!(1)));
    assert_eq!(eval("$average(v)", data.clone()), Some(json!(4)));
    assert_eq!(eval("$max([])", data), None);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_conversion() {
    assert_eq!(eval("$string(5)", json!(null)), Some(json!("5")));
    assert_eq!(eval("$string({'a': [true]})", json!(null)), Some(json!("{\"a\":[true]}")));
    assert_eq!(eval("$string('x')", json!(null)), Some(json!("x")));
    assert_eq!(eval("$string()", json!(12)), Some(json!("12")));
}

#[test]
fn test_length_and_case() {
    assert_eq!(eval("$length('héllo')", json!(null)), Some(json!(5)));
    assert_eq!(eval("$uppercase('abc')", json!(null)), Some(json!("ABC")));
    assert_eq!(eval("$lowercase('ABC')", json!(null)), Some(json!("abc")));
    assert_eq!(eval("$trim('  a \n b  ')", json!(null)), Some(json!("a b")));
}

#[test]
fn test_length_rejects_numbers() {
    assert!(matches!(eval_err("$length(5)"), EvalError::Argument { .. }));
}

#[test]
fn test_substring() {
    assert_eq!(eval("$substring('Hello World', 3)", json!(null)), Some(json!("lo World")));
    assert_eq!(eval("$substring('Hello World', 3, 5)", json!(null)), Some(json!("lo Wo")));
    assert_eq!(eval("$substring('Hello World', -4)", json!(null)), Some(json!("orld")));
    assert_eq!(eval("$substring('Hello', 2, 0)", json!(null)), Some(json!("")));
    assert_eq!(eval("$substring('Hello', 10)", json!(null)), Some(json!("")));
}

#[test]
fn test_contains_split_join() {
    assert_eq!(eval("$contains('abcdef', 'cd')", json!(null)), Some(json!(true)));
    assert_eq!(eval("$split('a,b,c', ',')", json!(null)), Some(json!(["a", "b", "c"])));
    assert_eq!(eval("$split('a,b,c', ',', 2)", json!(null)), Some(json!(["a", "b"])));
    assert_eq!(eval("$split('ab', '')", json!(null)), Some(json!(["a", "b"])));
    assert_eq!(eval("$join(['a', 'b'], '-')", json!(null)), Some(json!("a-b")));
    assert_eq!(eval("$join(['a', 'b'])", json!(null)), Some(json!("ab")));
}

// ============================================================================
// Numbers and booleans
// ============================================================================

#[test]
fn test_number_conversion() {
    assert_eq!(eval("$number('12.5')", json!(null)), Some(json!(12.5)));
    assert_eq!(eval("$number(true)", json!(null)), Some(json!(1)));
    assert!(matches!(eval_err("$number('abc')"), EvalError::Argument { .. }));
}

#[test]
fn test_rounding() {
    assert_eq!(eval("$floor(2.7)", json!(null)), Some(json!(2)));
    assert_eq!(eval("$ceil(2.1)", json!(null)), Some(json!(3)));
    assert_eq!(eval("$abs(-3)", json!(null)), Some(json!(3)));
    assert_eq!(eval("$round(2.5)", json!(null)), Some(json!(2)));
    assert_eq!(eval("$round(3.5)", json!(null)), Some(json!(4)));
    assert_eq!(eval("$round(2.675, 2)", json!(null)), Some(json!(2.68)));
    assert_eq!(eval("$round(1250, -2)", json!(null)), Some(json!(1200)));
}

#[test]
fn test_power_and_sqrt() {
    assert_eq!(eval("$power(2, 10)", json!(null)), Some(json!(1024)));
    assert_eq!(eval("$sqrt(16)", json!(null)), Some(json!(4)));
    assert!(matches!(eval_err("$sqrt(-1)"), EvalError::Argument { .. }));
    assert!(matches!(eval_err("$power(10, 400)"), EvalError::NumberOutOfRange { .. }));
}

#[test]
fn test_boolean_functions() {
    assert_eq!(eval("$boolean('')", json!(null)), Some(json!(false)));
    assert_eq!(eval("$boolean([0, 1])", json!(null)), Some(json!(true)));
    assert_eq!(eval("$not(0)", json!(null)), Some(json!(true)));
    assert_eq!(eval("$exists(a)", json!({"a": null})), Some(json!(true)));
    assert_eq!(eval("$exists(b)", json!({"a": null})), Some(json!(false)));
}

// ============================================================================
// Arrays and objects
// ============================================================================

#[test]
fn test_append_reverse_distinct() {
    assert_eq!(eval("$append([1, 2], 3)", json!(null)), Some(json!([1, 2, 3])));
    assert_eq!(eval("$append(missing, [1])", json!({})), Some(json!([1])));
    assert_eq!(eval("$reverse([1, 2, 3])", json!(null)), Some(json!([3, 2, 1])));
    assert_eq!(eval("$distinct([1, 2, 1, 'a', 'a'])", json!(null)), Some(json!([1, 2, "a"])));
}

#[test]
fn test_sort() {
    assert_eq!(eval("$sort([3, 1, 2])", json!(null)), Some(json!([1, 2, 3])));
    assert_eq!(eval("$sort(['b', 'a'])", json!(null)), Some(json!(["a", "b"])));
    assert_eq!(
        eval("$sort([1, 3, 2], function($a, $b) { $a < $b })", json!(null)),
        Some(json!([3, 2, 1]))
    );
    assert!(matches!(eval_err("$sort([1, 'a'])"), EvalError::Argument { .. }));
}

#[test]
fn test_sort_is_stable() {
    let data = json!({"people": [
        {"name": "a", "age": 30},
        {"name": "b", "age": 20},
        {"name": "c", "age": 30}
    ]});
    assert_eq!(
        eval("$sort(people, function($l, $r) { $l.age > $r.age }).name", data),
        Some(json!(["b", "a", "c"]))
    );
}

#[test]
fn test_keys_lookup_merge() {
    let data = json!({"o": {"a": 1, "b": 2}});
    assert_eq!(eval("$keys(o)", data.clone()), Some(json!(["a", "b"])));
    assert_eq!(eval("$lookup(o, 'b')", data.clone()), Some(json!(2)));
    assert_eq!(
        eval("$merge([o, {'b': 3, 'c': 4}])", data),
        Some(json!({"a": 1, "b": 3, "c": 4}))
    );
}

// ============================================================================
// Higher order
// ============================================================================

#[test]
fn test_map_filter_reduce() {
    assert_eq!(
        eval("$map([1, 2, 3], function($v) { $v * 2 })", json!(null)),
        Some(json!([2, 4, 6]))
    );
    assert_eq!(
        eval("$map(['a', 'b'], function($v, $i) { $v & $i })", json!(null)),
        Some(json!(["a0", "b1"]))
    );
    assert_eq!(
        eval("$filter([1, 2, 3, 4], function($v) { $v % 2 = 0 })", json!(null)),
        Some(json!([2, 4]))
    );
    assert_eq!(
        eval("$reduce([1, 2, 3, 4], function($acc, $v) { $acc + $v })", json!(null)),
        Some(json!(10))
    );
    assert_eq!(
        eval("$reduce([1, 2], function($acc, $v) { $acc * $v }, 10)", json!(null)),
        Some(json!(20))
    );
}

#[test]
fn test_map_with_builtin() {
    assert_eq!(eval("$map(['a', 'b'], $uppercase)", json!(null)), Some(json!(["A", "B"])));
}

#[test]
fn test_reduce_requires_binary_function() {
    assert!(matches!(
        eval_err("$reduce([1], function($v) { $v })"),
        EvalError::Argument { .. }
    ));
}
