//! The host object model.
//!
//! A [`HostValue`] is what the embedding application hands to, and receives
//! from, [`evaluate`](crate::evaluate): dynamically typed scalars, ordered
//! arrays, insertion-ordered structs and host closures. Values the host has
//! no representation for travel as [`HostValue::Opaque`].

use core::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use jsonata_core::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<HostValue>),
    Struct(HostStruct),
    Function(HostFunction),
    /// An engine value without a host counterpart, passed through untouched.
    ///
    /// A lambda returned this way keeps the variables it closed over, except
    /// those of a block that also bound a function: such blocks are cleared
    /// when the evaluation that created them ends.
    Opaque(Value),
}

impl HostValue {
    /// Name of the value's kind, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Boolean(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::Array(_) => "array",
            HostValue::Struct(_) => "struct",
            HostValue::Function(_) => "function",
            HostValue::Opaque(_) => "opaque",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&HostStruct> {
        match self {
            HostValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&HostFunction> {
        match self {
            HostValue::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Build a host value from parsed JSON. Objects become structs.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => HostValue::Null,
            serde_json::Value::Bool(b) => HostValue::Boolean(b),
            serde_json::Value::Number(n) => HostValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => HostValue::String(s),
            serde_json::Value::Array(items) => {
                HostValue::Array(items.into_iter().map(HostValue::from_json).collect())
            }
            serde_json::Value::Object(entries) => HostValue::Struct(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, HostValue::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Render as JSON. Functions have no JSON form and become `""`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HostValue::Null => serde_json::Value::Null,
            HostValue::Boolean(b) => serde_json::Value::Bool(*b),
            HostValue::Number(n) => Value::Number(*n).to_json(),
            HostValue::String(s) => serde_json::Value::String(s.clone()),
            HostValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(HostValue::to_json).collect())
            }
            HostValue::Struct(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
            HostValue::Function(_) => serde_json::Value::String(String::new()),
            HostValue::Opaque(value) => value.to_json(),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Boolean(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Number(value as f64)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        HostValue::Array(items)
    }
}

impl From<HostStruct> for HostValue {
    fn from(value: HostStruct) -> Self {
        HostValue::Struct(value)
    }
}

impl From<HostFunction> for HostValue {
    fn from(value: HostFunction) -> Self {
        HostValue::Function(value)
    }
}

// ============================================================================
// Structs
// ============================================================================

/// An insertion-ordered mapping from keys to host values.
///
/// Keys are case-sensitive; [`get_ignore_case`](HostStruct::get_ignore_case)
/// is available for hosts whose own keys are not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostStruct {
    entries: IndexMap<String, HostValue>,
}

impl HostStruct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HostValue>) -> Option<HostValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder form of [`insert`](HostStruct::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.entries.get(key)
    }

    /// First entry whose key matches `key` ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<(&str, &HostValue)> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(candidate, value)| (candidate.as_str(), value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, HostValue)> for HostStruct {
    fn from_iter<I: IntoIterator<Item = (K, HostValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }
}

impl IntoIterator for HostStruct {
    type Item = (String, HostValue);
    type IntoIter = indexmap::map::IntoIter<String, HostValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Functions
// ============================================================================

type HostFn = dyn Fn(&[HostValue]) -> Result<HostValue, HostError> + Send + Sync;

/// A host closure that expressions can call.
#[derive(Clone)]
pub struct HostFunction {
    name: Option<Arc<str>>,
    func: Arc<HostFn>,
}

impl HostFunction {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[HostValue]) -> Result<HostValue, HostError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// A function carrying its own declared name, used in diagnostics.
    pub fn named<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[HostValue]) -> Result<HostValue, HostError> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, args: &[HostValue]) -> Result<HostValue, HostError> {
        (self.func)(args)
    }

    /// True if both handles refer to the same closure.
    pub fn ptr_eq(&self, other: &HostFunction) -> bool {
        core::ptr::eq(
            Arc::as_ptr(&self.func) as *const (),
            Arc::as_ptr(&other.func) as *const (),
        )
    }
}

impl PartialEq for HostFunction {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "HostFunction({name})"),
            None => f.write_str("HostFunction(<anonymous>)"),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// A failure raised by host code, typically inside a [`HostFunction`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
    pub detail: Option<String>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
