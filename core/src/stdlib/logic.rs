//! Boolean functions.

use super::arg;
use crate::{
    evaluator::{EvalResult, Evaluator},
    values::Value,
};

/// `$boolean(arg)`
pub(super) fn boolean(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(arg(args, 0).map(|value| Value::Bool(value.is_truthy())))
}

/// `$not(arg)`
pub(super) fn not(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(arg(args, 0).map(|value| Value::Bool(!value.is_truthy())))
}

/// `$exists(arg)`: true unless the argument is undefined.
pub(super) fn exists(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    Ok(Some(Value::Bool(arg(args, 0).is_some())))
}
