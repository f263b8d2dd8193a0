//! Aggregation functions over sequences of numbers.

use super::{arg, numbers};
use crate::{
    evaluator::{EvalResult, Evaluator, sequence_items},
    values::Value,
};

/// `$sum(array)`
pub(super) fn sum(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let total = numbers("sum", sequence_items(value))?.into_iter().sum();
    Ok(Some(Value::Number(total)))
}

/// `$count(array)`. Undefined counts as empty.
pub(super) fn count(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let count = arg(args, 0).map_or(0, |value| sequence_items(value).len());
    Ok(Some(Value::Number(count as f64)))
}

/// `$max(array)`
pub(super) fn max(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let result = numbers("max", sequence_items(value))?
        .into_iter()
        .reduce(f64::max);
    Ok(result.map(Value::Number))
}

/// `$min(array)`
pub(super) fn min(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let result = numbers("min", sequence_items(value))?
        .into_iter()
        .reduce(f64::min);
    Ok(result.map(Value::Number))
}

/// `$average(array)`
pub(super) fn average(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let values = numbers("average", sequence_items(value))?;
    if values.is_empty() {
        return Ok(None);
    }
    let total: f64 = values.iter().sum();
    Ok(Some(Value::Number(total / values.len() as f64)))
}
