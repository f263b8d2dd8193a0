//! Tests for the host object model.

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::host::{HostError, HostFunction, HostStruct, HostValue};

#[test]
fn test_struct_keeps_insertion_order() {
    let s = HostStruct::new()
        .with("zeta", 1.0)
        .with("alpha", 2.0)
        .with("mid", 3.0);
    assert_eq!(s.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);

    let mut s = s;
    s.insert("zeta", 10.0);
    assert_eq!(s.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(s.get("zeta"), Some(&HostValue::Number(10.0)));
}

#[test]
fn test_struct_keys_are_case_sensitive() {
    let s = HostStruct::new().with("Name", "Zac");
    assert_eq!(s.get("name"), None);
    assert!(s.contains_key("Name"));

    let (key, value) = s.get_ignore_case("NAME").unwrap();
    assert_eq!(key, "Name");
    assert_eq!(value, &HostValue::from("Zac"));
}

#[test]
fn test_from_json_builds_structs() {
    let value = HostValue::from_json(json!({"b": [1, "x", null], "a": {"ok": true}}));
    let s = value.as_struct().unwrap();
    assert_eq!(s.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(
        s.get("b"),
        Some(&HostValue::Array(vec![
            HostValue::Number(1.0),
            HostValue::from("x"),
            HostValue::Null,
        ]))
    );
    assert_eq!(
        s.get("a").and_then(HostValue::as_struct).and_then(|a| a.get("ok")),
        Some(&HostValue::Boolean(true))
    );
}

#[test]
fn test_to_json() {
    let f = HostFunction::new(|_| Ok(HostValue::Null));
    let value = HostValue::Struct(
        HostStruct::new()
            .with("n", 15.0)
            .with("f", 2.5)
            .with("fn", f)
            .with("list", vec![HostValue::Boolean(false), HostValue::Null]),
    );
    assert_eq!(
        value.to_json(),
        json!({"n": 15, "f": 2.5, "fn": "", "list": [false, null]})
    );
}

#[test]
fn test_type_names() {
    assert_eq!(HostValue::Null.type_name(), "null");
    assert_eq!(HostValue::from(1i64).type_name(), "number");
    assert_eq!(HostValue::from(HostStruct::new()).type_name(), "struct");
    assert_eq!(
        HostValue::from(HostFunction::new(|_| Ok(HostValue::Null))).type_name(),
        "function"
    );
}

#[test]
fn test_function_identity() {
    let f = HostFunction::named("twice", |args| {
        let n = args.first().and_then(HostValue::as_f64).unwrap_or(0.0);
        Ok(HostValue::Number(n * 2.0))
    });
    let g = f.clone();
    let h = HostFunction::named("twice", |_| Ok(HostValue::Null));

    assert_eq!(f, g);
    assert!(f != h);
    assert_eq!(f.name(), Some("twice"));
    assert_eq!(format!("{:?}", f), "HostFunction(twice)");
    assert_eq!(f.call(&[HostValue::Number(4.0)]), Ok(HostValue::Number(8.0)));
}

#[test]
fn test_host_error() {
    let err = HostError::new("boom").with_detail("while fetching");
    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.detail.as_deref(), Some("while fetching"));
}
