//! Error rendering using ariadne
//!
//! Compile errors are shown against the expression text with the offending
//! span labelled. Other errors have no span and render as plain lines.

use crate::Error;
use ariadne::{Color, IndexType, Label, Report, ReportKind, Source};
use miette::Diagnostic;
use std::io::Write;

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use jsonata_bridge::{HostValue, evaluate, render_error};
///
/// if let Err(e) = evaluate("a +", &HostValue::Null, None, None) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs and UIs)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compile {
            expression,
            span,
            reason,
            ..
        } => {
            let start = span.offset();
            // Zero-width spans (unexpected end of input) still get a caret.
            let end = (start + span.len()).max(start + 1);
            let code = error.code().map(|code| code.to_string());

            let mut report = Report::build(ReportKind::Error, ("<expression>", start..end))
                .with_message(error.message())
                .with_config(
                    ariadne::Config::default()
                        .with_color(use_color)
                        .with_index_type(IndexType::Byte),
                )
                .with_label(
                    Label::new(("<expression>", start..end))
                        .with_message(reason)
                        .with_color(Color::Red),
                );
            if let Some(code) = code {
                report = report.with_code(code);
            }
            report
                .finish()
                .write(("<expression>", Source::from(expression.as_str())), &mut *writer)
        }
        Error::Configuration { key, message } => {
            writeln!(writer, "Configuration error: {}", message)?;
            if let Some(key) = key {
                writeln!(writer, "  key: {}", key)?;
            }
            Ok(())
        }
        Error::Evaluation { message, .. } => {
            writeln!(writer, "Evaluation error: {}", message)
        }
        Error::Callback {
            function,
            message,
            source,
        } => {
            writeln!(writer, "Error in function ${}: {}", function, message)?;
            if let Some(detail) = &source.detail {
                writeln!(writer, "  detail: {}", detail)?;
            }
            Ok(())
        }
        Error::Input { message, .. } => {
            writeln!(writer, "Input error: {}", message)
        }
    }
}
