//! jsonata-bridge - JSONata evaluation for dynamically typed hosts
//!
//! # Overview
//!
//! The bridge lets an application that works with loosely typed values
//! (scalars, arrays, insertion-ordered structs and closures) evaluate JSONata
//! expressions through the [`jsonata_core`] engine. A call compiles the
//! expression, converts the input, installs bindings, host functions and
//! limits on a fresh context, evaluates, and converts the result back.
//!
//! # Quick Start
//!
//! ```
//! use jsonata_bridge::{HostFunction, HostStruct, HostValue, evaluate};
//!
//! let data = HostValue::from(r#"{"c": [1, 2, 3, 4, 5]}"#);
//! let double = HostFunction::new(|args| {
//!     let n = args.first().and_then(HostValue::as_f64).unwrap_or(0.0);
//!     Ok(HostValue::Number(n * 2.0))
//! });
//! let options = HostStruct::new()
//!     .with("functions", HostStruct::new().with("Double", double))
//!     .with("timeout", 1000.0);
//!
//! let result = evaluate("$double($sum(c))", &data, None, Some(&options)).unwrap();
//! assert_eq!(result, HostValue::Number(30.0));
//! ```
//!
//! # Conversions
//!
//! Input text that looks like a JSON object or array is parsed; any other
//! text stays text. Results map back structurally, with null and undefined
//! results becoming blank text. See [`marshal`].
//!
//! # Names
//!
//! Bindings are visible under their exact key and its lowercase form by
//! default ([`CasePolicy`]). Host functions are visible under their
//! lowercase key only.
//!
//! # Errors
//!
//! Every failure is an [`Error`], classified by [`Error::kind`] as a compile,
//! configuration or evaluation failure. A failure raised by a host function
//! keeps the original [`HostError`], see [`Error::host_cause`].

pub mod callback;
pub mod error;
pub mod host;
pub mod marshal;
pub mod options;
pub mod setup;

mod error_renderer;
mod evaluate;

pub use error::{Error, ErrorKind};
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
pub use evaluate::{evaluate, evaluate_with};
pub use host::{HostError, HostFunction, HostStruct, HostValue};
pub use options::{CasePolicy, Options};

// Re-export the engine types that appear in the bridge's API
pub use jsonata_core::{Bounds, Value};

#[cfg(test)]
mod host_test;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
