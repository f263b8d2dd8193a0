//! Conversion between host values and engine values.
//!
//! Both directions are total: every host value has an engine form and every
//! engine value has a host form, with [`HostValue::Opaque`] and native
//! function values as the fallback arms. The only failure is top-level text
//! that looks like JSON but does not parse.

use indexmap::IndexMap;
use jsonata_core::{Function, NativeFunction, Value};
use thiserror::Error;
use tracing::trace;

use crate::callback;
use crate::host::{HostStruct, HostValue};

/// Text that was bracketed like JSON failed to parse.
#[derive(Debug, Error)]
#[error("Text looks like JSON but could not be parsed: {source}")]
pub struct MarshalError {
    #[from]
    source: serde_json::Error,
}

/// Convert a host value for use by the engine.
///
/// Top-level text is sniffed: if, once trimmed, it is wrapped in `{...}` or
/// `[...]` it is parsed as JSON (key order preserved). Any other text is
/// passed through as-is, untrimmed. Text nested inside arrays and structs is
/// never sniffed.
///
/// ```
/// use jsonata_bridge::{HostValue, marshal::to_canonical};
/// use jsonata_core::Value;
///
/// let parsed = to_canonical(&HostValue::from(r#" {"a": 1} "#)).unwrap();
/// assert_eq!(parsed.as_object().unwrap().get("a"), Some(&Value::Number(1.0)));
///
/// let text = to_canonical(&HostValue::from(" plain ")).unwrap();
/// assert_eq!(text, Value::string(" plain "));
/// ```
pub fn to_canonical(value: &HostValue) -> Result<Value, MarshalError> {
    match value {
        HostValue::String(text) => {
            let trimmed = text.trim();
            if looks_like_json(trimmed) {
                trace!(len = trimmed.len(), "Parsing JSON text");
                let json: serde_json::Value = serde_json::from_str(trimmed)?;
                Ok(Value::from_json(json))
            } else {
                Ok(Value::string(text.as_str()))
            }
        }
        other => Ok(structural(other)),
    }
}

fn looks_like_json(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

fn structural(value: &HostValue) -> Value {
    match value {
        HostValue::Null => Value::Null,
        HostValue::Boolean(b) => Value::Bool(*b),
        HostValue::Number(n) => Value::Number(*n),
        HostValue::String(s) => Value::string(s.as_str()),
        HostValue::Array(items) => Value::array(items.iter().map(structural).collect()),
        HostValue::Struct(entries) => Value::object(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), structural(value)))
                .collect::<IndexMap<_, _>>(),
        ),
        HostValue::Function(function) => {
            let name = function.name().unwrap_or("anonymous");
            let callable = callback::wrap(name, function.clone());
            Value::Function(Function::Native(NativeFunction::new(name, callable)))
        }
        HostValue::Opaque(value) => value.clone(),
    }
}

/// Convert an engine value back into a host value.
///
/// Null becomes blank text, recursively. Host functions that went through
/// [`to_canonical`] come back as the original
/// [`HostFunction`](crate::HostFunction); other engine functions become
/// [`HostValue::Opaque`], with the caveat documented there.
pub fn to_host(value: &Value) -> HostValue {
    match value {
        Value::Null => HostValue::String(String::new()),
        Value::Bool(b) => HostValue::Boolean(*b),
        Value::Number(n) => HostValue::Number(*n),
        Value::String(s) => HostValue::String(s.to_string()),
        Value::Array(items) => HostValue::Array(items.iter().map(to_host).collect()),
        Value::Object(entries) => HostValue::Struct(
            entries
                .iter()
                .map(|(key, value)| (key.as_str(), to_host(value)))
                .collect::<HostStruct>(),
        ),
        Value::Function(function) => match callback::unwrap(function) {
            Some(host) => HostValue::Function(host.clone()),
            None => HostValue::Opaque(value.clone()),
        },
    }
}
