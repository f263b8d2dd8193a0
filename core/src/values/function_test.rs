//! Tests for function values.

use std::sync::Arc;

use crate::{
    stdlib,
    values::{Callable, Function, NativeError, NativeFunction, Value},
};

struct Tagged(&'static str);

impl Callable for Tagged {
    fn call(&self, _args: &[Value]) -> Result<Value, NativeError> {
        Ok(Value::string(self.0))
    }

    fn foreign(&self) -> Option<&(dyn std::any::Any + Send + Sync)> {
        Some(&self.0)
    }
}

#[test]
fn test_native_from_fn() {
    let double = NativeFunction::from_fn("double", |args| {
        let n = args.first().and_then(Value::as_f64).unwrap_or(0.0);
        Ok(Value::Number(n * 2.0))
    });
    let result = double.callable.call(&[Value::Number(21.0)]).unwrap();
    assert_eq!(result, Value::Number(42.0));
    assert_eq!(&*double.name, "double");
}

#[test]
fn test_foreign_access() {
    let callable: Arc<dyn Callable> = Arc::new(Tagged("host"));
    let foreign = callable.foreign().and_then(|any| any.downcast_ref::<&str>());
    assert_eq!(foreign, Some(&"host"));

    let plain = NativeFunction::from_fn("plain", |_| Ok(Value::Null));
    assert!(plain.callable.foreign().is_none());
}

#[test]
fn test_functions_compare_by_identity() {
    let callable: Arc<dyn Callable> = Arc::new(Tagged("a"));
    let a = Function::Native(NativeFunction::new("a", Arc::clone(&callable)));
    let same = Function::Native(NativeFunction::new("other name", callable));
    let different = Function::Native(NativeFunction::new("a", Arc::new(Tagged("a"))));
    assert!(a == same);
    assert!(a != different);

    let sum = stdlib::lookup("sum").unwrap();
    assert!(Function::Builtin(sum) == Function::Builtin(sum));
}

#[test]
fn test_function_names() {
    let sum = Function::Builtin(stdlib::lookup("sum").unwrap());
    assert_eq!(sum.name(), Some("sum"));
    assert_eq!(format!("{:?}", sum), "<builtin $sum>");
    assert_eq!(Value::Function(sum).to_text(), "");
}
