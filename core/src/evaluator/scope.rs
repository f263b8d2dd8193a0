//! Variable scopes.
//!
//! Frames form a parent-linked chain. A lambda keeps the frame it was defined
//! in alive, so a frame that binds a lambda closing over itself is part of a
//! reference cycle. The evaluator remembers such frames and clears them when
//! it is dropped.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::values::{Function, Value};

#[derive(Default)]
pub struct Frame {
    vars: RwLock<HashMap<String, Value>>,
    parent: Option<Arc<Frame>>,
}

impl Frame {
    pub fn root() -> Arc<Frame> {
        Arc::new(Frame::default())
    }

    pub fn child(parent: &Arc<Frame>) -> Arc<Frame> {
        Arc::new(Frame {
            vars: RwLock::new(HashMap::new()),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Look a variable up in this frame and then its ancestors.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if let Some(value) = current.vars.read().get(name) {
                return Some(value.clone());
            }
            frame = current.parent.as_deref();
        }
        None
    }

    /// Bind in this frame. Returns true if the value holds a lambda, meaning
    /// the frame may now be part of a cycle.
    pub fn bind(&self, name: &str, value: Value) -> bool {
        let captures = holds_lambda(&value);
        self.vars.write().insert(name.to_string(), value);
        captures
    }

    pub(crate) fn clear(&self) {
        self.vars.write().clear();
    }
}

fn holds_lambda(value: &Value) -> bool {
    match value {
        Value::Function(Function::Lambda(_)) => true,
        Value::Array(items) => items.iter().any(holds_lambda),
        Value::Object(entries) => entries.values().any(holds_lambda),
        _ => false,
    }
}
