//! Tests for Value conversions, truthiness and printing.

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::values::{Value, format_number};

#[test]
fn test_format_number_hides_float_noise() {
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number(1.0 / 3.0), "0.333333333333333");
}

#[test]
fn test_format_number_integers() {
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-100.0), "-100");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
}

#[test]
fn test_display_is_compact_json() {
    let value = Value::from_json(json!({"a": [1, "two", null, true], "b": {"c": 2.5}}));
    assert_eq!(value.to_string(), r#"{"a":[1,"two",null,true],"b":{"c":2.5}}"#);
}

#[test]
fn test_to_text_leaves_strings_unquoted() {
    assert_eq!(Value::string("hi").to_text(), "hi");
    assert_eq!(Value::string("hi").to_string(), "\"hi\"");
    assert_eq!(Value::Bool(false).to_text(), "false");
}

#[test]
fn test_json_round_trip_preserves_key_order() {
    let json = json!({"z": 1, "a": 2, "m": [3, {"y": null}]});
    let value = Value::from_json(json.clone());
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(value.to_json(), json);
}

#[test]
fn test_integral_numbers_become_json_integers() {
    assert_eq!(Value::Number(15.0).to_json(), json!(15));
    assert_eq!(Value::Number(2.5).to_json(), json!(2.5));
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Number(0.0).is_truthy());
    assert!(Value::Number(-1.0).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::string("x").is_truthy());
    assert!(!Value::array(vec![]).is_truthy());
    assert!(!Value::array(vec![Value::Bool(false), Value::Null]).is_truthy());
    assert!(Value::array(vec![Value::Bool(false), Value::Number(1.0)]).is_truthy());
    assert!(!Value::object(IndexMap::new()).is_truthy());
}

#[test]
fn test_equality_is_structural() {
    let a = Value::from_json(json!({"a": [1, 2], "b": "x"}));
    let b = Value::from_json(json!({"a": [1, 2], "b": "x"}));
    assert_eq!(a, b);
    assert_ne!(a, Value::from_json(json!({"a": [1, 2]})));
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::from(1.5).type_name(), "number");
    assert_eq!(Value::from("s").type_name(), "string");
    assert_eq!(Value::from(vec![Value::Null]).type_name(), "array");
}
