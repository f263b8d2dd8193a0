//! Runtime evaluation errors.

use std::time::Duration;

use thiserror::Error;

use crate::parser::BinaryOp;
use crate::values::NativeError;

#[derive(Debug, Error)]
pub enum EvalError {
    /// The deadline set through [`Bounds`](crate::api::Bounds) passed.
    #[error("Expression evaluation timeout: exceeded {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    /// Evaluation nested deeper than allowed.
    #[error("Stack overflow: evaluation depth exceeded the maximum of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error(
        "Attempted to invoke a non-function{}",
        .name.as_deref().map(|name| format!(" '{name}'")).unwrap_or_default()
    )]
    NotAFunction { name: Option<String> },

    #[error("The {side} side of the '{op}' operator must evaluate to a number, got {found}")]
    Arithmetic {
        op: BinaryOp,
        side: &'static str,
        found: &'static str,
    },

    #[error("Cannot negate a non-numeric value of type {found}")]
    NegateNonNumber { found: &'static str },

    #[error(
        "The values {left} and {right} either side of operator '{op}' must be of the same data type (number or string)"
    )]
    Comparison {
        op: BinaryOp,
        left: String,
        right: String,
    },

    #[error("Number out of range: {context}")]
    NumberOutOfRange { context: String },

    #[error("The {side} side of the range operator (..) must evaluate to an integer")]
    RangeOperand { side: &'static str },

    #[error(
        "The size of the sequence allocated by the range operator (..) must not exceed {max}, attempted to allocate {size}"
    )]
    RangeTooLarge { size: f64, max: usize },

    #[error("Key in object structure must evaluate to a string, got {found}")]
    ObjectKey { found: String },

    #[error("Multiple key definitions evaluate to same key: {key}")]
    DuplicateKey { key: String },

    #[error("Argument error in function ${function}: {message}")]
    Argument { function: String, message: String },

    /// The thread running the evaluation could not be started.
    #[error("Could not start the evaluation thread: {source}")]
    Thread {
        #[source]
        source: std::io::Error,
    },

    /// A native function failed. The source is the function's own error.
    #[error("Error in function ${function}: {source}")]
    Native {
        function: String,
        #[source]
        source: NativeError,
    },
}

impl EvalError {
    pub(crate) fn argument(function: &str, message: impl Into<String>) -> Self {
        EvalError::Argument {
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// True for failures caused by exhausting an evaluation bound.
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, EvalError::Timeout { .. } | EvalError::DepthExceeded { .. })
    }
}
