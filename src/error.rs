//! The bridge's single public error type.

use jsonata_core::{CompileError, EvalError};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::host::HostError;
use crate::marshal::MarshalError;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The expression text is not a valid program.
    Compile,
    /// An option violated a precondition. Nothing was evaluated.
    Configuration,
    /// Evaluation started and failed, including bound violations, host
    /// function failures and malformed input data.
    Evaluation,
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{message}")]
    #[diagnostic(code(jsonata::compile))]
    Compile {
        message: String,
        #[source_code]
        expression: String,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
        #[source]
        source: CompileError,
    },

    #[error("{message}")]
    #[diagnostic(code(jsonata::configuration))]
    Configuration {
        /// The option or binding key at fault, when there is one.
        key: Option<String>,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(jsonata::evaluation))]
    Evaluation {
        message: String,
        #[source]
        source: EvalError,
    },

    /// A host function raised an error. `message` is the host's own message.
    #[error("{message}")]
    #[diagnostic(code(jsonata::callback), help("raised by host function ${function}"))]
    Callback {
        function: String,
        message: String,
        #[source]
        source: HostError,
    },

    /// The input data was JSON-looking text that failed to parse.
    #[error("{message}")]
    #[diagnostic(code(jsonata::input))]
    Input {
        message: String,
        #[source]
        source: MarshalError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Compile { .. } => ErrorKind::Compile,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Evaluation { .. } | Error::Callback { .. } | Error::Input { .. } => {
                ErrorKind::Evaluation
            }
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Error::Compile { message, .. }
            | Error::Configuration { message, .. }
            | Error::Evaluation { message, .. }
            | Error::Callback { message, .. }
            | Error::Input { message, .. } => message,
        }
    }

    /// The original host failure, when the error started inside a host
    /// function.
    pub fn host_cause(&self) -> Option<&HostError> {
        match self {
            Error::Callback { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The offending key of a configuration failure.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Configuration { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            key: Some(key.into()),
            message: message.into(),
        }
    }

    pub(crate) fn compile(expression: &str, source: CompileError) -> Self {
        let span = (source.span.start(), source.span.len()).into();
        Error::Compile {
            message: source.to_string(),
            expression: expression.to_string(),
            span,
            reason: source.kind.to_string(),
            source,
        }
    }

    pub(crate) fn input(source: MarshalError) -> Self {
        Error::Input {
            message: format!("Invalid input data: {source}"),
            source,
        }
    }
}

impl From<EvalError> for Error {
    /// Host failures boxed by the callback bridge are restored as
    /// [`Error::Callback`]; everything else is an evaluation failure.
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Native { function, source } => match source.downcast::<HostError>() {
                Ok(host) => Error::Callback {
                    function,
                    message: host.message.clone(),
                    source: *host,
                },
                Err(source) => {
                    let err = EvalError::Native { function, source };
                    Error::Evaluation {
                        message: err.to_string(),
                        source: err,
                    }
                }
            },
            other => Error::Evaluation {
                message: other.to_string(),
                source: other,
            },
        }
    }
}
