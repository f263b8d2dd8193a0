//! Host closures as engine functions.
//!
//! [`HostCallable`] adapts a [`HostFunction`] to the engine's [`Callable`]
//! interface. Arguments are converted to host values, results back to engine
//! values. A [`HostError`](crate::HostError) raised by the closure is boxed
//! into the engine's native failure channel unchanged, so the orchestrator
//! can recover it afterwards.
//!
//! Host functions run synchronously on the evaluating thread. The evaluation
//! timeout does not interrupt them.

use core::any::Any;
use std::sync::Arc;

use jsonata_core::{Callable, Function, NativeError, Value};
use tracing::{debug, trace};

use crate::host::{HostFunction, HostValue};
use crate::marshal::{to_canonical, to_host};

pub struct HostCallable {
    name: String,
    function: HostFunction,
}

impl HostCallable {
    pub fn new(name: impl Into<String>, function: HostFunction) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }

    pub fn function(&self) -> &HostFunction {
        &self.function
    }
}

impl Callable for HostCallable {
    fn call(&self, args: &[Value]) -> Result<Value, NativeError> {
        trace!(function = %self.name, args = args.len(), "Calling host function");
        let host_args: Vec<HostValue> = args.iter().map(to_host).collect();
        let result = self.function.call(&host_args).map_err(|err| {
            debug!(function = %self.name, %err, "Host function failed");
            Box::new(err) as NativeError
        })?;
        to_canonical(&result).map_err(|err| Box::new(err) as NativeError)
    }

    fn foreign(&self) -> Option<&(dyn Any + Send + Sync)> {
        Some(&self.function)
    }
}

/// Wrap a host closure for registration on an engine context.
pub fn wrap(name: &str, function: HostFunction) -> Arc<dyn Callable> {
    Arc::new(HostCallable::new(name, function))
}

/// The host closure behind an engine function, if it wraps one.
pub fn unwrap(function: &Function) -> Option<&HostFunction> {
    match function {
        Function::Native(native) => native
            .callable
            .foreign()
            .and_then(|foreign| foreign.downcast_ref::<HostFunction>()),
        Function::Lambda(_) | Function::Builtin(_) => None,
    }
}
