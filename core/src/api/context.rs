//! Evaluation context: everything an expression can see besides its input.

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::{
    api::Bounds,
    values::{Callable, NativeFunction, Value},
};

/// Variables, native functions and bounds for evaluating one expression.
///
/// Names are case-sensitive. A binding shadows a registered function of the
/// same name, and both shadow the standard library.
#[derive(Clone, Default)]
pub struct Context {
    bindings: HashMap<String, Value>,
    functions: HashMap<String, NativeFunction>,
    bounds: Option<Bounds>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `value` available as `$name`.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Make `callable` invocable as `$name(...)`.
    pub fn register_function(&mut self, name: impl Into<String>, callable: Arc<dyn Callable>) {
        let name = name.into();
        let function = NativeFunction::new(name.as_str(), callable);
        self.functions.insert(name, function);
    }

    /// Enable the deadline and depth limit for evaluations in this context.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// True if nothing was bound, registered or bounded.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.functions.is_empty() && self.bounds.is_none()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bindings: Vec<_> = self.bindings.keys().collect();
        bindings.sort();
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("Context")
            .field("bindings", &bindings)
            .field("functions", &functions)
            .field("bounds", &self.bounds)
            .finish()
    }
}
