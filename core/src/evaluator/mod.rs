//! Tree-walking evaluator for JSONata expressions.
//!
//! The evaluator walks the parsed [`Expr`](crate::parser::Expr) tree directly
//! and produces [`Value`](crate::values::Value)s. Undefined results are
//! represented as `None`.
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking prevents stack overflow from deeply nested expressions,
//!   and each evaluation runs on a thread whose stack is sized for its depth limit
//! - **Bounded**: An optional deadline is checked cooperatively at every node
//!
//! ## Example
//!
//! ```
//! use jsonata_core::{compile, Value};
//!
//! let expr = compile("$sum(c)").unwrap();
//! let data = Value::from_json(serde_json::json!({"c": [1, 2, 3]}));
//! let result = expr.evaluate(&data, &expr.create_context()).unwrap();
//! assert_eq!(result, Some(Value::Number(6.0)));
//! ```

mod error;
mod eval;
mod operators;
mod scope;


pub use error::EvalError;
pub use eval::{EvalResult, Evaluator};
pub use scope::Frame;

pub(crate) use eval::{collapse, sequence_items};

use core::time::Duration;

use crate::api::Bounds;

/// Depth ceiling used when no explicit bounds are configured.
pub const INTRINSIC_MAX_DEPTH: usize = 500;

/// Largest depth limit an evaluation honours. Larger bounds are clamped.
pub const MAX_DEPTH_LIMIT: usize = 5_000;

/// Largest sequence a range constructor may allocate.
pub const MAX_RANGE_SIZE: usize = 10_000_000;

/// Native stack reserved for each level of evaluation depth. A level spans
/// the node evaluation frames plus any function application in between.
const STACK_PER_LEVEL: usize = 32 * 1024;

/// Native stack reserved on top of the per-level budget.
const BASE_STACK: usize = 1024 * 1024;

/// Limits applied to a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    pub max_depth: usize,
    pub timeout: Option<Duration>,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: INTRINSIC_MAX_DEPTH,
            timeout: None,
        }
    }
}

impl From<Option<Bounds>> for EvaluatorOptions {
    fn from(bounds: Option<Bounds>) -> Self {
        match bounds {
            Some(bounds) => Self {
                max_depth: bounds.max_depth.min(MAX_DEPTH_LIMIT),
                timeout: Some(bounds.timeout),
            },
            None => Self::default(),
        }
    }
}

impl EvaluatorOptions {
    /// Stack size for the thread running an evaluation with these options,
    /// large enough that the depth check fires before the stack runs out.
    pub fn stack_size(&self) -> usize {
        BASE_STACK + self.max_depth.min(MAX_DEPTH_LIMIT) * STACK_PER_LEVEL
    }
}
