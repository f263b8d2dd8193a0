//! Functions taking a function argument.

use super::{arg, function_arg};
use crate::{
    evaluator::{EvalError, EvalResult, Evaluator, collapse, sequence_items},
    values::{Function, Value},
};

/// Arguments for a per-member callback: `(value, index, array)`, trimmed to
/// what a lambda declares. Other callables get the value only.
fn member_args(function: &Function, item: &Value, index: usize, array: &Value) -> Vec<Option<Value>> {
    let wanted = function.arity().unwrap_or(1).clamp(1, 3);
    [
        Some(item.clone()),
        Some(Value::Number(index as f64)),
        Some(array.clone()),
    ]
    .into_iter()
    .take(wanted)
    .collect()
}

/// `$map(array, function)`
pub(super) fn map(ev: &mut Evaluator<'_>, input: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let function = function_arg("map", args, 1)?;
    let mut results = Vec::new();
    for (index, item) in sequence_items(value).iter().enumerate() {
        let call_args = member_args(function, item, index, value);
        if let Some(result) = ev.apply(function, input, call_args)? {
            results.push(result);
        }
    }
    Ok(collapse(results))
}

/// `$filter(array, function)`
pub(super) fn filter(ev: &mut Evaluator<'_>, input: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let function = function_arg("filter", args, 1)?;
    let mut results = Vec::new();
    for (index, item) in sequence_items(value).iter().enumerate() {
        let call_args = member_args(function, item, index, value);
        let keep = ev
            .apply(function, input, call_args)?
            .is_some_and(|result| result.is_truthy());
        if keep {
            results.push(item.clone());
        }
    }
    Ok(collapse(results))
}

/// `$reduce(array, function[, init])`
///
/// The function receives the accumulator and the current member, plus the
/// index and the array when it declares more parameters.
pub(super) fn reduce(ev: &mut Evaluator<'_>, input: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let function = function_arg("reduce", args, 1)?;
    if function.arity().is_some_and(|arity| arity < 2) {
        return Err(EvalError::argument(
            "reduce",
            "the function must accept at least two arguments",
        ));
    }
    let wanted = function.arity().unwrap_or(2).clamp(2, 4);

    let items = sequence_items(value);
    let (mut accumulator, start) = match arg(args, 2) {
        Some(init) => (Some(init.clone()), 0),
        None => (items.first().cloned(), 1),
    };
    for (index, item) in items.iter().enumerate().skip(start) {
        let call_args: Vec<Option<Value>> = [
            accumulator.take(),
            Some(item.clone()),
            Some(Value::Number(index as f64)),
            Some(value.clone()),
        ]
        .into_iter()
        .take(wanted)
        .collect();
        accumulator = ev.apply(function, input, call_args)?;
    }
    Ok(accumulator)
}
