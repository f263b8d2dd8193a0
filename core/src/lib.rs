//! A JSONata expression engine.
//!
//! The crate parses JSONata expressions with a pest grammar and evaluates
//! them with a tree-walking interpreter over JSON-like [`Value`]s. Embedders
//! interact through [`api`]: compile an [`Expression`], create a [`Context`],
//! bind variables and native functions, set [`Bounds`], and evaluate.

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod stdlib;
pub mod values;

pub use api::{Bounds, Context, Expression, compile};
pub use evaluator::EvalError;
pub use parser::{CompileError, CompileErrorKind};
pub use values::{Callable, Function, NativeError, NativeFunction, Value};
