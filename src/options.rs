//! Evaluation options.
//!
//! [`Options`] is the typed form. Hosts that pass a loosely typed options
//! struct go through [`Options::from_host`], which recognises the keys
//! `timeout`, `maxDepth`, `functions`, `bindings` and `casePolicy` in any
//! letter case.

use core::fmt;
use core::str::FromStr;
use std::time::Duration;

use jsonata_core::Bounds;
use jsonata_core::api::{DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT};
use jsonata_core::evaluator::MAX_DEPTH_LIMIT;
use tracing::debug;

use crate::error::Error;
use crate::host::{HostFunction, HostStruct, HostValue};

/// Names under which a binding is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasePolicy {
    /// Only the key as given.
    Exact,
    /// Only the lowercased key.
    Lowercase,
    /// The key as given and its lowercase form.
    #[default]
    Both,
}

impl CasePolicy {
    /// Engine names for `key`, without duplicates.
    pub fn names(self, key: &str) -> Vec<String> {
        let lower = key.to_lowercase();
        match self {
            CasePolicy::Exact => vec![key.to_string()],
            CasePolicy::Lowercase => vec![lower],
            CasePolicy::Both if lower == key => vec![lower],
            CasePolicy::Both => vec![key.to_string(), lower],
        }
    }
}

impl FromStr for CasePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(CasePolicy::Exact),
            "lowercase" => Ok(CasePolicy::Lowercase),
            "both" => Ok(CasePolicy::Both),
            other => Err(format!(
                "unknown case policy '{other}', expected one of exact, lowercase, both"
            )),
        }
    }
}

impl fmt::Display for CasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CasePolicy::Exact => "exact",
            CasePolicy::Lowercase => "lowercase",
            CasePolicy::Both => "both",
        })
    }
}

/// Configuration for one evaluation.
///
/// # Example
///
/// ```
/// use jsonata_bridge::{HostFunction, HostValue, Options};
///
/// let options = Options::default()
///     .with_binding("Greeting", "hello")
///     .with_function("double", HostFunction::new(|args| {
///         let n = args.first().and_then(HostValue::as_f64).unwrap_or(0.0);
///         Ok(HostValue::Number(n * 2.0))
///     }))
///     .with_timeout_ms(250);
///
/// let bounds = options.bounds().unwrap();
/// assert_eq!(bounds.max_depth, 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Values made available as `$name`.
    pub bindings: HostStruct,

    /// Entries expected to be host functions, callable as `$name(...)`.
    /// Anything else is rejected when the options are applied.
    pub functions: HostStruct,

    /// Evaluation time budget in milliseconds.
    pub timeout_ms: Option<u64>,

    /// Maximum evaluation depth, at most
    /// [`MAX_DEPTH_LIMIT`](jsonata_core::evaluator::MAX_DEPTH_LIMIT).
    pub max_depth: Option<usize>,

    pub case_policy: CasePolicy,
}

impl Options {
    pub fn with_binding(mut self, key: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.bindings.insert(key, value);
        self
    }

    pub fn with_function(mut self, key: impl Into<String>, function: HostFunction) -> Self {
        self.functions.insert(key, function);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_case_policy(mut self, case_policy: CasePolicy) -> Self {
        self.case_policy = case_policy;
        self
    }

    /// The bounds to enforce, if any.
    ///
    /// Setting either limit enables both, with the default for the missing
    /// one. Setting neither leaves the engine unbounded.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.timeout_ms.is_none() && self.max_depth.is_none() {
            return None;
        }
        Some(Bounds {
            timeout: self.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis),
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        })
    }

    /// Check the limits of options built in code. Host structs are checked
    /// as they are parsed.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout_ms == Some(0) {
            return Err(Error::configuration(
                "timeout",
                "Option 'timeout' must be a positive integer, got 0",
            ));
        }
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(Error::configuration(
                    "maxDepth",
                    "Option 'maxDepth' must be a positive integer, got 0",
                ));
            }
            check_max_depth("maxDepth", depth)?;
        }
        Ok(())
    }

    /// Parse a host options struct. Keys match in any case; unknown keys are
    /// ignored.
    pub fn from_host(host: &HostStruct) -> Result<Self, Error> {
        let mut options = Options::default();
        let mut seen: Vec<(&'static str, &str)> = Vec::new();

        for (key, value) in host.iter() {
            let option = match key.to_ascii_lowercase().as_str() {
                "timeout" => "timeout",
                "maxdepth" => "maxDepth",
                "functions" => "functions",
                "bindings" => "bindings",
                "casepolicy" => "casePolicy",
                _ => {
                    debug!(key, "Ignoring unknown option");
                    continue;
                }
            };
            if let Some((_, first)) = seen.iter().find(|(name, _)| *name == option) {
                return Err(Error::configuration(
                    key,
                    format!("Option '{option}' was given more than once (as '{first}' and '{key}')"),
                ));
            }
            seen.push((option, key));

            match option {
                "timeout" => options.timeout_ms = Some(positive_integer(key, value)?),
                "maxDepth" => {
                    let depth = positive_integer(key, value)?;
                    let depth = usize::try_from(depth).unwrap_or(usize::MAX);
                    check_max_depth(key, depth)?;
                    options.max_depth = Some(depth);
                }
                "functions" => options.functions = structure(key, value)?,
                "bindings" => options.bindings = structure(key, value)?,
                _ => {
                    let text = value.as_str().ok_or_else(|| {
                        Error::configuration(
                            key,
                            format!("Option '{key}' must be text, got {}", value.type_name()),
                        )
                    })?;
                    options.case_policy = text
                        .parse()
                        .map_err(|message: String| Error::configuration(key, format!("Option '{key}': {message}")))?;
                }
            }
        }
        Ok(options)
    }

    /// Add bindings supplied separately from the options. A key already
    /// bound through the options is an error.
    pub fn merge_bindings(&mut self, bindings: &HostStruct) -> Result<(), Error> {
        for (key, value) in bindings.iter() {
            if self.bindings.contains_key(key) {
                return Err(Error::configuration(
                    key,
                    format!("Binding '{key}' was supplied both in options and in bindings"),
                ));
            }
            self.bindings.insert(key, value.clone());
        }
        Ok(())
    }
}

fn check_max_depth(key: &str, depth: usize) -> Result<(), Error> {
    if depth > MAX_DEPTH_LIMIT {
        return Err(Error::configuration(
            key,
            format!("Option '{key}' must not exceed {MAX_DEPTH_LIMIT}, got {depth}"),
        ));
    }
    Ok(())
}

fn positive_integer(key: &str, value: &HostValue) -> Result<u64, Error> {
    let parsed = match value {
        HostValue::Number(n) if n.fract() == 0.0 && *n >= 1.0 && *n <= u64::MAX as f64 => {
            Some(*n as u64)
        }
        HostValue::String(text) => text.trim().parse::<u64>().ok().filter(|n| *n >= 1),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let shown = match value {
            HostValue::String(text) => format!("'{text}'"),
            HostValue::Number(n) => jsonata_core::values::format_number(*n),
            other => other.type_name().to_string(),
        };
        Error::configuration(
            key,
            format!("Option '{key}' must be a positive integer, got {shown}"),
        )
    })
}

fn structure(key: &str, value: &HostValue) -> Result<HostStruct, Error> {
    match value {
        HostValue::Struct(entries) => Ok(entries.clone()),
        other => Err(Error::configuration(
            key,
            format!("Option '{key}' must be a struct, got {}", other.type_name()),
        )),
    }
}
