//! Evaluation bounds.

use core::time::Duration;

/// Time budget applied when bounds are enabled without an explicit timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Depth limit applied when bounds are enabled without an explicit depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Resource limits for one evaluation.
///
/// Both limits are enforced cooperatively by the evaluator: the deadline is
/// checked before every expression node, the depth on every descent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use jsonata_core::api::Bounds;
///
/// let bounds = Bounds {
///     timeout: Duration::from_millis(250),
///     ..Bounds::default()
/// };
/// assert_eq!(bounds.max_depth, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Wall-clock budget measured from the start of evaluation.
    ///
    /// Default: 5000 ms
    pub timeout: Duration,

    /// Maximum expression nesting during evaluation, including nesting
    /// caused by function calls.
    ///
    /// Default: 100
    pub max_depth: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
