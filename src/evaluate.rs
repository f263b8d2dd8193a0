//! The evaluation entry points.

use std::borrow::Cow;

use jsonata_core::{Value, compile};
use tracing::debug;

use crate::error::Error;
use crate::host::{HostStruct, HostValue};
use crate::marshal::{to_canonical, to_host};
use crate::options::Options;
use crate::setup;

/// Evaluate `expression` against `data`.
///
/// `options` is a loosely typed struct read by [`Options::from_host`].
/// `bindings` entries are added on top of the options' own `bindings`; a key
/// present in both is an error.
///
/// An undefined result, like a null one, comes back as blank text.
///
/// # Example
///
/// ```
/// use jsonata_bridge::{HostStruct, HostValue, evaluate};
///
/// let data = HostValue::from(r#"{"a": [1, 2, 3]}"#);
/// let bindings = HostStruct::new().with("Bonus", 10.0);
///
/// let result = evaluate("$sum(a) + $bonus", &data, Some(&bindings), None).unwrap();
/// assert_eq!(result, HostValue::Number(16.0));
/// ```
pub fn evaluate(
    expression: &str,
    data: &HostValue,
    bindings: Option<&HostStruct>,
    options: Option<&HostStruct>,
) -> Result<HostValue, Error> {
    run(expression, data, || {
        let mut resolved = match options {
            Some(options) => Options::from_host(options)?,
            None => Options::default(),
        };
        if let Some(bindings) = bindings {
            resolved.merge_bindings(bindings)?;
        }
        Ok(Cow::Owned(resolved))
    })
}

/// Evaluate `expression` against `data` with typed options.
pub fn evaluate_with(expression: &str, data: &HostValue, options: &Options) -> Result<HostValue, Error> {
    run(expression, data, || Ok(Cow::Borrowed(options)))
}

/// Options are resolved only once the expression compiled and the data
/// converted, so those failures take precedence over configuration ones.
fn run<'o>(
    expression: &str,
    data: &HostValue,
    resolve: impl FnOnce() -> Result<Cow<'o, Options>, Error>,
) -> Result<HostValue, Error> {
    debug!(expression, "Compiling expression");
    let compiled = compile(expression)
        .map_err(|err| Error::compile(expression, err))
        .inspect_err(|err| debug!(%err, "Compilation failed"))?;

    let input = to_canonical(data)
        .map_err(Error::input)
        .inspect_err(|err| debug!(%err, "Input conversion failed"))?;

    let mut context = compiled.create_context();
    let options = resolve().inspect_err(|err| debug!(%err, "Invalid options"))?;
    setup::apply(&mut context, &options).inspect_err(|err| debug!(%err, "Setup failed"))?;

    debug!(bounds = ?context.bounds(), "Evaluating expression");
    let result = compiled
        .evaluate(&input, &context)
        .map_err(Error::from)
        .inspect_err(|err| debug!(%err, "Evaluation failed"))?;

    Ok(to_host(&result.unwrap_or(Value::Null)))
}
