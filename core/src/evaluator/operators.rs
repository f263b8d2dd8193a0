//! Binary and unary operator implementations.
//!
//! `None` is an undefined operand. Logical operators short-circuit and are
//! handled by the evaluator itself.

use crate::{
    evaluator::EvalError,
    parser::BinaryOp,
    values::Value,
};

type OpResult = Result<Option<Value>, EvalError>;

pub(super) fn eval_binary(op: BinaryOp, left: Option<Value>, right: Option<Value>) -> OpResult {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            arithmetic(op, left, right)
        }
        BinaryOp::Concat => Ok(Some(concat(left, right))),
        BinaryOp::Eq => Ok(Some(Value::Bool(equal(&left, &right)))),
        BinaryOp::Ne => Ok(Some(Value::Bool(
            left.is_some() && right.is_some() && !equal(&left, &right),
        ))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => compare(op, left, right),
        BinaryOp::In => Ok(Some(Value::Bool(contains(left, right)))),
        BinaryOp::And | BinaryOp::Or => unreachable!("logical operators short-circuit"),
    }
}

pub(super) fn negate(value: Option<Value>) -> OpResult {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(Value::Number(-n))),
        Some(other) => Err(EvalError::NegateNonNumber {
            found: other.type_name(),
        }),
    }
}

fn operand(op: BinaryOp, side: &'static str, value: &Option<Value>) -> Result<Option<f64>, EvalError> {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(other) => Err(EvalError::Arithmetic {
            op,
            side,
            found: other.type_name(),
        }),
    }
}

fn arithmetic(op: BinaryOp, left: Option<Value>, right: Option<Value>) -> OpResult {
    let lhs = operand(op, "left", &left)?;
    let rhs = operand(op, "right", &right)?;
    let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
        return Ok(None);
    };
    let result = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div => lhs / rhs,
        BinaryOp::Rem => lhs % rhs,
        _ => unreachable!("not an arithmetic operator: {op}"),
    };
    if !result.is_finite() {
        return Err(EvalError::NumberOutOfRange {
            context: format!("result of {lhs} {op} {rhs}"),
        });
    }
    Ok(Some(Value::Number(result)))
}

fn concat(left: Option<Value>, right: Option<Value>) -> Value {
    let mut text = left.map(|v| v.to_text()).unwrap_or_default();
    if let Some(right) = right {
        text.push_str(&right.to_text());
    }
    Value::string(text)
}

fn equal(left: &Option<Value>, right: &Option<Value>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

fn compare(op: BinaryOp, left: Option<Value>, right: Option<Value>) -> OpResult {
    let comparable = |v: &Option<Value>| {
        matches!(v, None | Some(Value::Number(_)) | Some(Value::String(_)))
    };
    if !comparable(&left) || !comparable(&right) {
        return Err(comparison_error(op, &left, &right));
    }
    let ordering = match (&left, &right) {
        (None, _) | (_, None) => return Ok(Some(Value::Bool(false))),
        (Some(Value::Number(l)), Some(Value::Number(r))) => l.partial_cmp(r),
        (Some(Value::String(l)), Some(Value::String(r))) => Some(l.cmp(r)),
        _ => return Err(comparison_error(op, &left, &right)),
    };
    let Some(ordering) = ordering else {
        return Ok(Some(Value::Bool(false)));
    };
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::Ge => ordering.is_ge(),
        _ => unreachable!("not a comparison operator: {op}"),
    };
    Ok(Some(Value::Bool(result)))
}

fn comparison_error(op: BinaryOp, left: &Option<Value>, right: &Option<Value>) -> EvalError {
    let describe = |v: &Option<Value>| match v {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    };
    EvalError::Comparison {
        op,
        left: describe(left),
        right: describe(right),
    }
}

fn contains(left: Option<Value>, right: Option<Value>) -> bool {
    let (Some(needle), Some(haystack)) = (left, right) else {
        return false;
    };
    match haystack {
        Value::Array(items) => items.iter().any(|item| *item == needle),
        other => other == needle,
    }
}
