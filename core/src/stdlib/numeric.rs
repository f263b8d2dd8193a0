//! Numeric functions.

use super::{arg, number_arg};
use crate::{
    evaluator::{EvalError, EvalResult, Evaluator},
    values::Value,
};

// ============================================================================
// Conversion
// ============================================================================

/// `$number(arg)`: numbers, numeric strings and booleans.
pub(super) fn number(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(value) = arg(args, 0) else {
        return Ok(None);
    };
    let result = match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };
    match result {
        Some(n) => Ok(Some(Value::Number(n))),
        None => Err(EvalError::argument(
            "number",
            format!("unable to cast value to a number: {}", value),
        )),
    }
}

// ============================================================================
// Basic Operations
// ============================================================================

fn unary(name: &str, args: &[Option<Value>], f: impl Fn(f64) -> f64) -> EvalResult {
    Ok(number_arg(name, args, 0)?.map(|n| Value::Number(f(n))))
}

/// `$abs(number)`
pub(super) fn abs(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    unary("abs", args, f64::abs)
}

/// `$floor(number)`
pub(super) fn floor(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    unary("floor", args, f64::floor)
}

/// `$ceil(number)`
pub(super) fn ceil(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    unary("ceil", args, f64::ceil)
}

/// `$round(number[, precision])`: rounds half to even.
pub(super) fn round(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(n) = number_arg("round", args, 0)? else {
        return Ok(None);
    };
    let precision = number_arg("round", args, 1)?.unwrap_or(0.0).floor() as i32;
    Ok(Some(Value::Number(round_half_even(n, precision))))
}

/// Shift by decimal exponent through text so that values like 2.675 are
/// rounded as written rather than as their binary approximation.
fn round_half_even(n: f64, precision: i32) -> f64 {
    let shift = |value: f64, exponent: i32| -> f64 {
        format!("{value}e{exponent}").parse().unwrap_or(value)
    };
    let rounded = shift(n, precision).round_ties_even();
    let result = shift(rounded, -precision);
    // Avoid returning negative zero.
    if result == 0.0 { 0.0 } else { result }
}

/// `$power(base, exponent)`
pub(super) fn power(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(base) = number_arg("power", args, 0)? else {
        return Ok(None);
    };
    let Some(exponent) = number_arg("power", args, 1)? else {
        return Err(EvalError::argument("power", "argument 2 must be a number"));
    };
    let result = base.powf(exponent);
    if !result.is_finite() {
        return Err(EvalError::NumberOutOfRange {
            context: format!("$power({base}, {exponent})"),
        });
    }
    Ok(Some(Value::Number(result)))
}

/// `$sqrt(number)`
pub(super) fn sqrt(_: &mut Evaluator<'_>, _: &Value, args: &[Option<Value>]) -> EvalResult {
    let Some(n) = number_arg("sqrt", args, 0)? else {
        return Ok(None);
    };
    if n < 0.0 {
        return Err(EvalError::argument(
            "sqrt",
            format!("cannot take the square root of negative number {n}"),
        ));
    }
    Ok(Some(Value::Number(n.sqrt())))
}
