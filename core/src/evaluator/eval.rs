//! Core evaluation logic.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    api::Context,
    evaluator::{EvalError, EvaluatorOptions, Frame, MAX_RANGE_SIZE, operators},
    parser::{ArrayItem, BinaryOp, Expr, Literal, UnaryOp},
    stdlib,
    values::{Function, Lambda, Value},
};

pub type EvalResult = Result<Option<Value>, EvalError>;

/// Tree-walking evaluator for a single evaluation.
pub struct Evaluator<'ctx> {
    options: EvaluatorOptions,
    context: &'ctx Context,
    root: Value,
    deadline: Option<Instant>,
    depth: usize,
    /// Frames that bound a lambda and may be part of a reference cycle.
    captured: Vec<Arc<Frame>>,
}

impl<'ctx> Evaluator<'ctx> {
    pub fn new(options: EvaluatorOptions, context: &'ctx Context, root: Value) -> Self {
        let deadline = options.timeout.map(|timeout| Instant::now() + timeout);
        Self {
            options,
            context,
            root,
            deadline,
            depth: 0,
            captured: Vec::new(),
        }
    }

    /// Evaluate an expression against the input document.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        let frame = Frame::root();
        let input = self.root.clone();
        self.eval_expr(expr, &input, &frame)
    }

    fn check_deadline(&self) -> Result<(), EvalError> {
        match (self.deadline, self.options.timeout) {
            (Some(deadline), Some(timeout)) if Instant::now() >= deadline => {
                Err(EvalError::Timeout { timeout })
            }
            _ => Ok(()),
        }
    }

    /// Evaluate an expression node.
    pub(crate) fn eval_expr(&mut self, expr: &Expr, input: &Value, frame: &Arc<Frame>) -> EvalResult {
        self.check_deadline()?;

        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(EvalError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = self.eval_expr_inner(expr, input, frame);
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_expr_inner(&mut self, expr: &Expr, input: &Value, frame: &Arc<Frame>) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Some(match literal {
                Literal::Number(n) => Value::Number(*n),
                Literal::String(s) => Value::string(s.as_str()),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Null => Value::Null,
            })),

            Expr::Name(name) => Ok(field(input, name)),

            Expr::Wildcard => Ok(wildcard(input)),

            Expr::Variable(name) if name.is_empty() => Ok(Some(input.clone())),

            Expr::Variable(name) => Ok(self.lookup(name, frame)),

            Expr::Root => Ok(Some(self.root.clone())),

            Expr::Path { lhs, rhs } => {
                let Some(left) = self.eval_expr(lhs, input, frame)? else {
                    return Ok(None);
                };
                let keep_arrays = matches!(**rhs, Expr::Array(_));
                let mut results = Vec::new();
                for item in sequence_items(&left) {
                    match self.eval_expr(rhs, item, frame)? {
                        None => {}
                        Some(Value::Array(values)) if !keep_arrays => {
                            results.extend(values.iter().cloned())
                        }
                        Some(value) => results.push(value),
                    }
                }
                Ok(collapse(results))
            }

            Expr::Filter { value, predicate } => {
                let Some(value) = self.eval_expr(value, input, frame)? else {
                    return Ok(None);
                };
                let items = sequence_items(&value);
                let len = items.len();
                let mut results = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    let keep = match self.eval_expr(predicate, item, frame)? {
                        Some(Value::Number(n)) => {
                            let mut wanted = n.floor();
                            if wanted < 0.0 {
                                wanted += len as f64;
                            }
                            wanted == index as f64
                        }
                        Some(other) => other.is_truthy(),
                        None => false,
                    };
                    if keep {
                        results.push(item.clone());
                    }
                }
                Ok(collapse(results))
            }

            Expr::Call { callee, args } => {
                let function = self.callee(callee, input, frame)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg, input, frame)?);
                }
                self.apply(&function, input, values)
            }

            Expr::Binary { op: BinaryOp::And, left, right } => {
                let result = truthy(&self.eval_expr(left, input, frame)?)
                    && truthy(&self.eval_expr(right, input, frame)?);
                Ok(Some(Value::Bool(result)))
            }

            Expr::Binary { op: BinaryOp::Or, left, right } => {
                let result = truthy(&self.eval_expr(left, input, frame)?)
                    || truthy(&self.eval_expr(right, input, frame)?);
                Ok(Some(Value::Bool(result)))
            }

            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left, input, frame)?;
                let right = self.eval_expr(right, input, frame)?;
                operators::eval_binary(*op, left, right)
            }

            Expr::Unary { op: UnaryOp::Neg, expr } => {
                let value = self.eval_expr(expr, input, frame)?;
                operators::negate(value)
            }

            Expr::Condition {
                cond,
                then_branch,
                else_branch,
            } => {
                if truthy(&self.eval_expr(cond, input, frame)?) {
                    self.eval_expr(then_branch, input, frame)
                } else if let Some(else_branch) = else_branch {
                    self.eval_expr(else_branch, input, frame)
                } else {
                    Ok(None)
                }
            }

            Expr::Block(exprs) => {
                let scope = Frame::child(frame);
                let mut result = None;
                for expr in exprs {
                    result = self.eval_expr(expr, input, &scope)?;
                }
                Ok(result)
            }

            Expr::Bind { name, value } => {
                let value = self.eval_expr(value, input, frame)?;
                if let Some(value) = &value {
                    self.bind(frame, name, value.clone());
                }
                Ok(value)
            }

            Expr::Lambda(def) => Ok(Some(Value::Function(Function::Lambda(Lambda {
                def: Arc::clone(def),
                scope: Arc::clone(frame),
            })))),

            Expr::Chain { value, function } => {
                let value = self.eval_expr(value, input, frame)?;
                match &**function {
                    // `x ~> $f(a)` calls `$f(x, a)`.
                    Expr::Call { callee, args } => {
                        let callee = self.callee(callee, input, frame)?;
                        let mut values = Vec::with_capacity(args.len() + 1);
                        values.push(value);
                        for arg in args {
                            values.push(self.eval_expr(arg, input, frame)?);
                        }
                        self.apply(&callee, input, values)
                    }
                    other => {
                        let callee = self.callee(other, input, frame)?;
                        self.apply(&callee, input, vec![value])
                    }
                }
            }

            Expr::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        ArrayItem::Single(expr) => match self.eval_expr(expr, input, frame)? {
                            None => {}
                            Some(Value::Array(nested)) if !matches!(expr, Expr::Array(_)) => {
                                values.extend(nested.iter().cloned())
                            }
                            Some(value) => values.push(value),
                        },
                        ArrayItem::Range(start, end) => {
                            let start = self.eval_expr(start, input, frame)?;
                            let end = self.eval_expr(end, input, frame)?;
                            self.range(start, end, &mut values)?;
                        }
                    }
                }
                Ok(Some(Value::array(values)))
            }

            Expr::Object(entries) => {
                let mut object = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match self.eval_expr(key, input, frame)? {
                        Some(Value::String(key)) => key.to_string(),
                        Some(other) => {
                            return Err(EvalError::ObjectKey {
                                found: other.to_string(),
                            });
                        }
                        None => {
                            return Err(EvalError::ObjectKey {
                                found: "undefined".to_string(),
                            });
                        }
                    };
                    if object.contains_key(&key) {
                        return Err(EvalError::DuplicateKey { key });
                    }
                    if let Some(value) = self.eval_expr(value, input, frame)? {
                        object.insert(key, value);
                    }
                }
                Ok(Some(Value::object(object)))
            }
        }
    }

    /// Resolve a variable: local scopes, then context bindings, then
    /// registered functions, then the standard library.
    fn lookup(&self, name: &str, frame: &Frame) -> Option<Value> {
        if let Some(value) = frame.lookup(name) {
            return Some(value);
        }
        if let Some(value) = self.context.binding(name) {
            return Some(value.clone());
        }
        if let Some(native) = self.context.function(name) {
            return Some(Value::Function(Function::Native(native.clone())));
        }
        stdlib::lookup(name).map(|builtin| Value::Function(Function::Builtin(builtin)))
    }

    fn bind(&mut self, frame: &Arc<Frame>, name: &str, value: Value) {
        if frame.bind(name, value) && !self.captured.iter().any(|f| Arc::ptr_eq(f, frame)) {
            self.captured.push(Arc::clone(frame));
        }
    }

    fn callee(&mut self, callee: &Expr, input: &Value, frame: &Arc<Frame>) -> Result<Function, EvalError> {
        match self.eval_expr(callee, input, frame)? {
            Some(Value::Function(function)) => Ok(function),
            _ => Err(EvalError::NotAFunction {
                name: callee.callee_name().map(str::to_string),
            }),
        }
    }

    /// Invoke a function value with already evaluated arguments.
    pub fn apply(&mut self, function: &Function, input: &Value, args: Vec<Option<Value>>) -> EvalResult {
        match function {
            Function::Lambda(lambda) => {
                let scope = Frame::child(&lambda.scope);
                for (param, arg) in lambda.def.params.iter().zip(args) {
                    if let Some(arg) = arg {
                        self.bind(&scope, param, arg);
                    }
                }
                self.eval_expr(&lambda.def.body, input, &scope)
            }
            Function::Builtin(builtin) => {
                trace!(function = builtin.name, "Calling builtin");
                if builtin.context_default && args.is_empty() {
                    (builtin.func)(self, input, &[Some(input.clone())])
                } else {
                    (builtin.func)(self, input, &args)
                }
            }
            Function::Native(native) => {
                trace!(function = %native.name, "Calling native function");
                let args: Vec<Value> = args
                    .into_iter()
                    .map(|arg| arg.unwrap_or(Value::Null))
                    .collect();
                let result = native
                    .callable
                    .call(&args)
                    .map_err(|source| EvalError::Native {
                        function: native.name.to_string(),
                        source,
                    })?;
                Ok(Some(result))
            }
        }
    }

    fn range(&self, start: Option<Value>, end: Option<Value>, out: &mut Vec<Value>) -> Result<(), EvalError> {
        let start = range_bound("left", start)?;
        let end = range_bound("right", end)?;
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(());
        };
        if start > end {
            return Ok(());
        }
        let size = end - start + 1.0;
        if size > MAX_RANGE_SIZE as f64 {
            return Err(EvalError::RangeTooLarge {
                size,
                max: MAX_RANGE_SIZE,
            });
        }
        // Count with an integer: past 2^53, adding 1.0 to a float is a no-op.
        let size = size as usize;
        out.reserve(size);
        for offset in 0..size {
            if offset % 1024 == 0 {
                self.check_deadline()?;
            }
            out.push(Value::Number(start + offset as f64));
        }
        Ok(())
    }
}

/// A lambda bound in a block holds that block's frame, which holds the
/// lambda: clearing the frame breaks the cycle. Lambdas that outlive the
/// evaluation lose the variables of such blocks, including recursive
/// references to themselves.
impl Drop for Evaluator<'_> {
    fn drop(&mut self) {
        for frame in self.captured.drain(..) {
            frame.clear();
        }
    }
}

fn range_bound(side: &'static str, value: Option<Value>) -> Result<Option<f64>, EvalError> {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) if n.fract() == 0.0 => Ok(Some(n)),
        Some(_) => Err(EvalError::RangeOperand { side }),
    }
}

fn truthy(value: &Option<Value>) -> bool {
    value.as_ref().is_some_and(Value::is_truthy)
}

/// Items of a value viewed as a sequence: an array's members, or the value
/// itself.
pub(crate) fn sequence_items(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        other => core::slice::from_ref(other),
    }
}

/// Collapse a result sequence: nothing is undefined, one item is that item.
pub(crate) fn collapse(mut items: Vec<Value>) -> Option<Value> {
    match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(Value::array(items)),
    }
}

fn field(input: &Value, name: &str) -> Option<Value> {
    match input {
        Value::Object(entries) => entries.get(name).cloned(),
        Value::Array(items) => {
            let mut results = Vec::new();
            for item in items.iter() {
                match field(item, name) {
                    None => {}
                    Some(Value::Array(values)) => results.extend(values.iter().cloned()),
                    Some(value) => results.push(value),
                }
            }
            collapse(results)
        }
        _ => None,
    }
}

fn wildcard(input: &Value) -> Option<Value> {
    let mut results = Vec::new();
    for item in sequence_items(input) {
        if let Value::Object(entries) = item {
            for value in entries.values() {
                match value {
                    Value::Array(values) => results.extend(values.iter().cloned()),
                    other => results.push(other.clone()),
                }
            }
        }
    }
    collapse(results)
}
