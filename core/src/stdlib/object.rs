//! Object functions.

use indexmap::IndexMap;

use super::{arg, string_arg};
use crate::{
    evaluator::{EvalError, EvalResult, Evaluator, collapse, sequence_items},
    values::Value,
};

/// `$keys(object)`: keys of an object, or the union of keys of an array of
/// objects.
pub(super) fn keys(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let mut keys: Vec<Value> = Vec::new();
    for item in sequence_items(value) {
        if let Value::Object(entries) = item {
            for key in entries.keys() {
                let key = Value::string(key.as_str());
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    }
    if keys.is_empty() {
        return Ok(None);
    }
    Ok(Some(Value::array(keys)))
}

/// `$lookup(object, key)`
pub(super) fn lookup(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let Some(key) = string_arg("lookup", args, 1)? else {
        return Err(EvalError::argument("lookup", "argument 2 must be a string"));
    };
    let mut results = Vec::new();
    for item in sequence_items(value) {
        match item.as_object().and_then(|entries| entries.get(key)) {
            Some(Value::Array(values)) => results.extend(values.iter().cloned()),
            Some(found) => results.push(found.clone()),
            None => {}
        }
    }
    Ok(collapse(results))
}

/// `$merge(array)`: later objects override earlier keys.
pub(super) fn merge(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let mut merged = IndexMap::new();
    for item in sequence_items(value) {
        let Value::Object(entries) = item else {
            return Err(EvalError::argument(
                "merge",
                format!("argument 1 must be an array of objects, found {}", item.type_name()),
            ));
        };
        for (key, value) in entries.iter() {
            merged.insert(key.clone(), value.clone());
        }
    }
    Ok(Some(Value::object(merged)))
}
