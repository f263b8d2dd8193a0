//! Compiled expressions.

use std::sync::Arc;
use std::thread;

use tracing::{debug, trace};

use crate::{
    api::Context,
    evaluator::{EvalError, Evaluator, EvaluatorOptions},
    parser::{self, CompileError, Expr},
    values::Value,
};

/// Compile expression text.
///
/// # Example
///
/// ```
/// use jsonata_core::api::compile;
///
/// assert!(compile("Account.Order[0]").is_ok());
/// assert!(compile("Account.(").is_err());
/// ```
pub fn compile(source: &str) -> Result<Expression, CompileError> {
    trace!(source, "Compiling expression");
    let ast = parser::parse(source).inspect_err(|err| debug!(%err, "Compilation failed"))?;
    Ok(Expression {
        source: source.into(),
        ast,
    })
}

/// A parsed expression, ready to be evaluated any number of times.
///
/// Expressions are immutable; all per-evaluation state lives in the
/// [`Context`] and the evaluator.
#[derive(Debug, Clone)]
pub struct Expression {
    source: Arc<str>,
    ast: Expr,
}

impl Expression {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// A fresh, empty context for evaluating this expression.
    pub fn create_context(&self) -> Context {
        Context::new()
    }

    /// Evaluate against `input`. `Ok(None)` means the result is undefined.
    ///
    /// The evaluation runs on a dedicated thread with a stack sized for the
    /// depth limit, and the caller blocks until it finishes. Native functions
    /// are called on that thread.
    pub fn evaluate(&self, input: &Value, context: &Context) -> Result<Option<Value>, EvalError> {
        let options = EvaluatorOptions::from(context.bounds());
        trace!(?options, stack_size = options.stack_size(), "Evaluating expression");
        let ast = &self.ast;
        thread::scope(|scope| {
            let handle = thread::Builder::new()
                .name("jsonata-eval".to_string())
                .stack_size(options.stack_size())
                .spawn_scoped(scope, move || {
                    let mut evaluator = Evaluator::new(options, context, input.clone());
                    evaluator.eval(ast)
                })
                .map_err(|source| EvalError::Thread { source })?;
            match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
        .inspect_err(|err| debug!(%err, "Evaluation failed"))
    }
}
