//! Runtime values of the expression engine.

mod function;
mod value;

pub use function::{Callable, Function, Lambda, NativeError, NativeFunction};
pub use value::{Value, format_number};

#[cfg(test)]
mod function_test;

#[cfg(test)]
mod value_test;
