//! Array functions.

use super::{arg, function_arg};
use crate::{
    evaluator::{EvalError, EvalResult, Evaluator, sequence_items},
    values::Value,
};

/// `$append(array1, array2)`
pub(super) fn append(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    match (arg(args, 0), arg(args, 1)) {
        (None, other) | (other, None) => Ok(other.cloned()),
        (Some(first), Some(second)) => {
            let mut items = sequence_items(first).to_vec();
            items.extend_from_slice(sequence_items(second));
            Ok(Some(Value::array(items)))
        }
    }
}

/// `$reverse(array)`
pub(super) fn reverse(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(arg(args, 0).map(|value| {
        let mut items = sequence_items(value).to_vec();
        items.reverse();
        Value::array(items)
    }))
}

/// `$distinct(array)`: first occurrence of each value, in order.
pub(super) fn distinct(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let Value::Array(items) = value else {
        return Ok(Some(value.clone()));
    };
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items.iter() {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    Ok(Some(Value::array(unique)))
}

/// `$sort(array[, function])`
///
/// Without a function, the members must be all numbers or all strings. The
/// function receives two members and returns true when the first should be
/// placed after the second. The sort is stable.
pub(super) fn sort(ev: &mut Evaluator<'_>, input: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let items = sequence_items(value).to_vec();

    if args.len() > 1 {
        let function = function_arg("sort", args, 1)?.clone();
        let mut after = |a: &Value, b: &Value| -> Result<bool, EvalError> {
            let result = ev.apply(&function, input, vec![Some(a.clone()), Some(b.clone())])?;
            Ok(result.is_some_and(|r| r.is_truthy()))
        };
        return Ok(Some(Value::array(merge_sort(items, &mut after)?)));
    }

    let all_numbers = items.iter().all(|item| matches!(item, Value::Number(_)));
    let all_strings = items.iter().all(|item| matches!(item, Value::String(_)));
    if !all_numbers && !all_strings {
        return Err(EvalError::argument(
            "sort",
            "argument 1 must be an array of strings or an array of numbers",
        ));
    }
    let mut after = |a: &Value, b: &Value| -> Result<bool, EvalError> {
        Ok(match (a, b) {
            (Value::Number(a), Value::Number(b)) => a > b,
            (Value::String(a), Value::String(b)) => a > b,
            _ => false,
        })
    };
    Ok(Some(Value::array(merge_sort(items, &mut after)?)))
}

fn merge_sort<F>(mut items: Vec<Value>, after: &mut F) -> Result<Vec<Value>, EvalError>
where
    F: FnMut(&Value, &Value) -> Result<bool, EvalError>,
{
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, after)?;
    let right = merge_sort(right, after)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => after(a, b)?,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
