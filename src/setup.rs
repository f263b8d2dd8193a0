//! Installing options on an engine context.

use std::sync::Arc;

use hashbrown::HashMap;
use jsonata_core::{Callable, Context, Value};
use tracing::{debug, trace};

use crate::callback;
use crate::error::Error;
use crate::host::HostValue;
use crate::marshal::to_canonical;
use crate::options::Options;

/// Apply `options` to `context`.
///
/// Everything, limits included, is validated and converted before the
/// context is touched: on failure the context is left exactly as it was.
///
/// Bindings are installed under the names their [`CasePolicy`] yields.
/// Functions are installed under their lowercased key only. Two entries that
/// would install the same engine name are rejected, even when one is a
/// binding and the other a function.
///
/// [`CasePolicy`]: crate::options::CasePolicy
pub fn apply(context: &mut Context, options: &Options) -> Result<(), Error> {
    options.validate()?;

    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut bindings: Vec<(String, Value)> = Vec::with_capacity(options.bindings.len());
    let mut functions: Vec<(String, Arc<dyn Callable>)> = Vec::with_capacity(options.functions.len());

    for (key, value) in options.bindings.iter() {
        let value = to_canonical(value).map_err(|err| {
            Error::configuration(key, format!("Binding '{key}' holds malformed JSON text: {err}"))
        })?;
        for name in options.case_policy.names(key) {
            claim(&mut claimed, &name, key)?;
            bindings.push((name, value.clone()));
        }
    }

    for (key, value) in options.functions.iter() {
        let HostValue::Function(function) = value else {
            return Err(Error::configuration(
                key,
                format!("Custom function '{key}' must be a closure or function"),
            ));
        };
        let name = key.to_lowercase();
        claim(&mut claimed, &name, key)?;
        functions.push((name.clone(), callback::wrap(&name, function.clone())));
    }

    let bounds = options.bounds();

    debug!(
        bindings = bindings.len(),
        functions = functions.len(),
        bounded = bounds.is_some(),
        "Applying evaluation options"
    );
    for (name, value) in bindings {
        trace!(name = %name, "Binding variable");
        context.bind(name, value);
    }
    for (name, callable) in functions {
        trace!(name = %name, "Registering function");
        context.register_function(name, callable);
    }
    if let Some(bounds) = bounds {
        context.set_bounds(bounds);
    }
    Ok(())
}

fn claim<'a>(claimed: &mut HashMap<String, &'a str>, name: &str, key: &'a str) -> Result<(), Error> {
    match claimed.get(name) {
        Some(previous) => Err(Error::configuration(
            key,
            format!("Keys '{previous}' and '{key}' both resolve to the name '${name}'"),
        )),
        None => {
            claimed.insert(name.to_string(), key);
            Ok(())
        }
    }
}
