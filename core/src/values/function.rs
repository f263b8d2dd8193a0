//! Function values.
//!
//! Three kinds of callables can flow through an evaluation: lambdas defined
//! by the expression itself, functions of the standard library, and native
//! functions registered on a [`Context`](crate::api::Context) by the embedder.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::evaluator::Frame;
use crate::parser::LambdaExpr;
use crate::stdlib::Builtin;

use super::value::Value;

/// Error type returned by native functions.
///
/// It is carried through evaluation untouched so embedders can downcast it
/// back to their own error type.
pub type NativeError = Box<dyn std::error::Error + Send + Sync>;

/// A function implemented outside the expression language.
///
/// Arguments arrive already evaluated. Missing or undefined arguments are
/// passed as [`Value::Null`].
pub trait Callable: Send + Sync {
    fn call(&self, args: &[Value]) -> Result<Value, NativeError>;

    /// Access to the embedder's original object, if the callable wraps one.
    ///
    /// Lets values that leave the engine be turned back into whatever the
    /// embedder handed in.
    fn foreign(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }
}

/// A lambda closed over the scope it was defined in.
#[derive(Clone)]
pub struct Lambda {
    pub def: Arc<LambdaExpr>,
    pub scope: Arc<Frame>,
}

/// A named native callable.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Arc<str>,
    pub callable: Arc<dyn Callable>,
}

impl NativeFunction {
    pub fn new(name: impl Into<Arc<str>>, callable: Arc<dyn Callable>) -> Self {
        Self {
            name: name.into(),
            callable,
        }
    }

    /// Build a native function from a closure.
    pub fn from_fn<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, NativeError> + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(FnCallable(f)))
    }
}

struct FnCallable<F>(F);

impl<F> Callable for FnCallable<F>
where
    F: Fn(&[Value]) -> Result<Value, NativeError> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> Result<Value, NativeError> {
        (self.0)(args)
    }
}

#[derive(Clone)]
pub enum Function {
    Lambda(Lambda),
    Builtin(&'static Builtin),
    Native(NativeFunction),
}

impl Function {
    /// Name used in diagnostics. Lambdas are anonymous.
    pub fn name(&self) -> Option<&str> {
        match self {
            Function::Lambda(_) => None,
            Function::Builtin(builtin) => Some(builtin.name),
            Function::Native(native) => Some(&native.name),
        }
    }

    /// Number of declared parameters, when known.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Function::Lambda(lambda) => Some(lambda.def.params.len()),
            Function::Builtin(_) | Function::Native(_) => None,
        }
    }
}

impl PartialEq for Function {
    /// Functions compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Lambda(a), Function::Lambda(b)) => {
                Arc::ptr_eq(&a.def, &b.def) && Arc::ptr_eq(&a.scope, &b.scope)
            }
            (Function::Builtin(a), Function::Builtin(b)) => core::ptr::eq(*a, *b),
            (Function::Native(a), Function::Native(b)) => core::ptr::eq(
                Arc::as_ptr(&a.callable) as *const (),
                Arc::as_ptr(&b.callable) as *const (),
            ),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Lambda(lambda) => {
                write!(f, "<lambda({})>", lambda.def.params.join(", "))
            }
            Function::Builtin(builtin) => write!(f, "<builtin ${}>", builtin.name),
            Function::Native(native) => write!(f, "<native ${}>", native.name),
        }
    }
}
