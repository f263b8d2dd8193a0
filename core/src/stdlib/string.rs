//! String functions.
//!
//! Positions and lengths count characters, not bytes.

use super::{arg, number_arg, ordinal, string_arg};
use crate::{
    evaluator::{EvalError, EvalResult, Evaluator, sequence_items},
    values::Value,
};

/// `$string(arg)`: strings are unchanged, other values become JSON text.
pub(super) fn string(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(arg(args, 0).map(|value| match value {
        Value::String(_) => value.clone(),
        other => Value::string(other.to_text()),
    }))
}

/// `$length(str)`
pub(super) fn length(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(s) = string_arg("length", args, 0)? else {
        return Ok(None);
    };
    Ok(Some(Value::Number(s.chars().count() as f64)))
}

/// `$substring(str, start[, length])`. A negative start counts from the end.
pub(super) fn substring(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(s) = string_arg("substring", args, 0)? else {
        return Ok(None);
    };
    let Some(start) = number_arg("substring", args, 1)? else {
        return Err(EvalError::argument("substring", "argument 2 must be a number"));
    };
    let length = number_arg("substring", args, 2)?;

    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as f64;
    let mut start = start.floor();
    if start < 0.0 {
        start = (len + start).max(0.0);
    }
    let start = start.min(len) as usize;
    let end = match length {
        Some(length) if length <= 0.0 => start,
        Some(length) => (start as f64 + length.floor()).min(len) as usize,
        None => chars.len(),
    };
    Ok(Some(Value::string(chars[start..end].iter().collect::<String>())))
}

/// `$uppercase(str)`
pub(super) fn uppercase(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(string_arg("uppercase", args, 0)?.map(|s| Value::string(s.to_uppercase())))
}

/// `$lowercase(str)`
pub(super) fn lowercase(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(string_arg("lowercase", args, 0)?.map(|s| Value::string(s.to_lowercase())))
}

/// `$trim(str)`: strips both ends and collapses inner whitespace runs to a
/// single space.
pub(super) fn trim(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(string_arg("trim", args, 0)?
        .map(|s| Value::string(s.split_whitespace().collect::<Vec<_>>().join(" "))))
}

/// `$contains(str, pattern)`
pub(super) fn contains(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(s) = string_arg("contains", args, 0)? else {
        return Ok(None);
    };
    let Some(pattern) = string_arg("contains", args, 1)? else {
        return Err(EvalError::argument("contains", "argument 2 must be a string"));
    };
    Ok(Some(Value::Bool(s.contains(pattern))))
}

/// `$split(str, separator[, limit])`
pub(super) fn split(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(s) = string_arg("split", args, 0)? else {
        return Ok(None);
    };
    let Some(separator) = string_arg("split", args, 1)? else {
        return Err(EvalError::argument("split", "argument 2 must be a string"));
    };
    let limit = match number_arg("split", args, 2)? {
        Some(limit) if limit < 0.0 => {
            return Err(EvalError::argument(
                "split",
                "argument 3 must be a non-negative number",
            ));
        }
        Some(limit) => Some(limit.floor() as usize),
        None => None,
    };

    let parts: Vec<Value> = if separator.is_empty() {
        s.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        s.split(separator).map(Value::string).collect()
    };
    let parts = match limit {
        Some(limit) => parts.into_iter().take(limit).collect(),
        None => parts,
    };
    Ok(Some(Value::array(parts)))
}

/// `$join(array[, separator])`
pub(super) fn join(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let separator = string_arg("join", args, 1)?.unwrap_or("");
    let mut parts = Vec::new();
    for item in sequence_items(value) {
        match item {
            Value::String(s) => parts.push(&**s),
            other => {
                return Err(EvalError::argument(
                    "join",
                    format!(
                        "argument {} must be an array of strings, found {}",
                        ordinal(0),
                        other.type_name()
                    ),
                ));
            }
        }
    }
    Ok(Some(Value::string(parts.join(separator))))
}
