//! JSONata Standard Library
//!
//! The functions every expression can call without registration:
//! - Aggregates: `$sum`, `$count`, `$max`, `$min`, `$average`
//! - Strings: `$string`, `$length`, `$substring`, `$uppercase`, ...
//! - Numbers: `$number`, `$abs`, `$floor`, `$round`, ...
//! - Booleans: `$boolean`, `$not`, `$exists`
//! - Arrays: `$append`, `$reverse`, `$sort`, `$distinct`
//! - Objects: `$keys`, `$lookup`, `$merge`
//! - Higher order: `$map`, `$filter`, `$reduce`
//!
//! Functions receive their arguments already evaluated. An undefined
//! argument is `None`; most functions return undefined when their main
//! argument is undefined.

use crate::{
    evaluator::{EvalError, EvalResult, Evaluator},
    values::{Function, Value},
};

mod aggregate;
mod array;
mod higher_order;
mod logic;
mod numeric;
mod object;
mod string;

#[cfg(test)]
mod stdlib_test;

/// Signature shared by all library functions.
pub type BuiltinFn = fn(&mut Evaluator<'_>, &Value, &[Option<Value>]) -> EvalResult;

/// A function of the standard library.
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
    /// Called with the context item when invoked without arguments.
    pub context_default: bool,
}

impl core::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("context_default", &self.context_default)
            .finish_non_exhaustive()
    }
}

const fn builtin(name: &'static str, func: BuiltinFn) -> Builtin {
    Builtin {
        name,
        func,
        context_default: false,
    }
}

const fn with_context(name: &'static str, func: BuiltinFn) -> Builtin {
    Builtin {
        name,
        func,
        context_default: true,
    }
}

/// Sorted by name for binary search.
static BUILTINS: &[Builtin] = &[
    builtin("abs", numeric::abs),
    builtin("append", array::append),
    builtin("average", aggregate::average),
    with_context("boolean", logic::boolean),
    builtin("ceil", numeric::ceil),
    builtin("contains", string::contains),
    builtin("count", aggregate::count),
    builtin("distinct", array::distinct),
    builtin("exists", logic::exists),
    builtin("filter", higher_order::filter),
    builtin("floor", numeric::floor),
    builtin("join", string::join),
    with_context("keys", object::keys),
    with_context("length", string::length),
    builtin("lookup", object::lookup),
    with_context("lowercase", string::lowercase),
    builtin("map", higher_order::map),
    builtin("max", aggregate::max),
    builtin("merge", object::merge),
    builtin("min", aggregate::min),
    builtin("not", logic::not),
    with_context("number", numeric::number),
    builtin("power", numeric::power),
    builtin("reduce", higher_order::reduce),
    builtin("reverse", array::reverse),
    builtin("round", numeric::round),
    builtin("sort", array::sort),
    builtin("split", string::split),
    builtin("sqrt", numeric::sqrt),
    with_context("string", string::string),
    with_context("substring", string::substring),
    builtin("sum", aggregate::sum),
    with_context("trim", string::trim),
    with_context("uppercase", string::uppercase),
];

/// Find a library function by name (without the `$`).
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS
        .binary_search_by(|builtin| builtin.name.cmp(name))
        .ok()
        .map(|index| &BUILTINS[index])
}

/// Names of all library functions, in sorted order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

// ============================================================================
// Argument helpers
// ============================================================================

fn arg(args: &[Option<Value>], index: usize) -> Option<&Value> {
    args.get(index).and_then(Option::as_ref)
}

fn ordinal(index: usize) -> usize {
    index + 1
}

fn number_arg(function: &str, args: &[Option<Value>], index: usize) -> Result<Option<f64>, EvalError> {
    match arg(args, index) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(other) => Err(EvalError::argument(
            function,
            format!("argument {} must be a number, got {}", ordinal(index), other.type_name()),
        )),
    }
}

fn string_arg<'a>(
    function: &str,
    args: &'a [Option<Value>],
    index: usize,
) -> Result<Option<&'a str>, EvalError> {
    match arg(args, index) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(&**s)),
        Some(other) => Err(EvalError::argument(
            function,
            format!("argument {} must be a string, got {}", ordinal(index), other.type_name()),
        )),
    }
}

fn function_arg<'a>(
    function: &str,
    args: &'a [Option<Value>],
    index: usize,
) -> Result<&'a Function, EvalError> {
    match arg(args, index) {
        Some(Value::Function(f)) => Ok(f),
        Some(other) => Err(EvalError::argument(
            function,
            format!("argument {} must be a function, got {}", ordinal(index), other.type_name()),
        )),
        None => Err(EvalError::argument(
            function,
            format!("argument {} must be a function", ordinal(index)),
        )),
    }
}

/// Numbers of a sequence argument. Any non-number member is an error.
fn numbers(function: &str, items: &[Value]) -> Result<Vec<f64>, EvalError> {
    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::argument(
                function,
                format!("argument 1 must be an array of numbers, found {}", other.type_name()),
            )),
        })
        .collect()
}
