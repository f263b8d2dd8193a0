#![allow(dead_code)]

use jsonata_bridge::{HostFunction, HostStruct, HostValue};
use once_cell::sync::Lazy;

/// Expands to a test evaluating `expr` against `data` (anything convertible
/// into a `HostValue`), optionally with a host options struct, and comparing
/// the result as JSON, or the error kind on failure.
#[macro_export]
macro_rules! test_case {
    ($name:ident, expr: $expr:expr, data: $data:expr, expect: $expect:expr $(,)?) => {
        $crate::test_case!($name, expr: $expr, data: $data, options: None, expect: $expect);
    };
    ($name:ident, expr: $expr:expr, data: $data:expr, options: $options:expr, expect: $expect:expr $(,)?) => {
        #[test]
        fn $name() {
            let data: jsonata_bridge::HostValue = $data.into();
            let options: Option<jsonata_bridge::HostStruct> = $options;
            let result = jsonata_bridge::evaluate($expr, &data, None, options.as_ref())
                .map(|value| value.to_json())
                .map_err(|err| err.kind());
            let expect: Result<serde_json::Value, jsonata_bridge::ErrorKind> = $expect;
            pretty_assertions::assert_eq!(result, expect, "expression: {}", $expr);
        }
    };
}

/// Sample invoice document used across tests, as JSON text.
pub const INVOICE: &str = r#"{
    "Account": {
        "Name": "Firefly",
        "Order": [
            {
                "OrderID": "order103",
                "Product": [
                    {"Name": "Bowler Hat", "Price": 34.45, "Quantity": 2},
                    {"Name": "Trilby hat", "Price": 21.67, "Quantity": 1}
                ]
            },
            {
                "OrderID": "order104",
                "Product": [
                    {"Name": "Bowler Hat", "Price": 34.45, "Quantity": 4},
                    {"Name": "Cloak", "Price": 107.99, "Quantity": 1}
                ]
            }
        ]
    }
}"#;

/// A host struct shaped the way a host application builds records.
pub static PERSON: Lazy<HostValue> = Lazy::new(|| {
    HostStruct::new()
        .with("name", "Zac")
        .with("age", 42.0)
        .with(
            "pets",
            vec![
                HostValue::Struct(HostStruct::new().with("kind", "cat").with("Name", "Tom")),
                HostValue::Struct(HostStruct::new().with("kind", "dog").with("Name", "Rex")),
            ],
        )
        .into()
});

/// Doubles its first argument.
pub fn double() -> HostFunction {
    HostFunction::named("double", |args| {
        let n = args.first().and_then(HostValue::as_f64).unwrap_or(0.0);
        Ok(HostValue::Number(n * 2.0))
    })
}

/// Options struct registering `functions` under the given names.
pub fn with_functions(functions: Vec<(&str, HostFunction)>) -> HostStruct {
    let functions: HostStruct = functions
        .into_iter()
        .map(|(name, f)| (name, HostValue::Function(f)))
        .collect();
    HostStruct::new().with("functions", functions)
}
