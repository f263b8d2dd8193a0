//! Public API of the expression engine.
//!
//! The surface is intentionally narrow: compile an expression, create an
//! evaluation context for it, populate the context with bindings, native
//! functions and bounds, then evaluate it against input data.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use jsonata_core::api::{Bounds, compile};
//! use jsonata_core::values::{NativeFunction, Value};
//!
//! let expr = compile("$double(n) + $offset").unwrap();
//!
//! let mut context = expr.create_context();
//! context.bind("offset", Value::Number(1.0));
//! let double = NativeFunction::from_fn("double", |args| {
//!     let n = args.first().and_then(Value::as_f64).unwrap_or(0.0);
//!     Ok(Value::Number(n * 2.0))
//! });
//! context.register_function("double", double.callable);
//! context.set_bounds(Bounds::default());
//!
//! let data = Value::from_json(serde_json::json!({"n": 20}));
//! let result = expr.evaluate(&data, &context).unwrap();
//! assert_eq!(result, Some(Value::Number(41.0)));
//! ```

pub mod context;
pub mod expression;
pub mod options;

pub use context::Context;
pub use expression::{Expression, compile};
pub use options::{Bounds, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT};
