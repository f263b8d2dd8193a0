use pest::error::{ErrorVariant, InputLocation, LineColLocation};
use thiserror::Error;

use crate::parser::{Rule, Span};

/// Failure to turn expression text into a program.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileErrorKind {
    /// The grammar rejected the input.
    #[error("Syntax error: {message}")]
    Syntax { message: String },

    /// The left side of `:=` is not a variable.
    #[error("The left side of := must be a variable name (start with $)")]
    InvalidBindTarget,

    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String },

    #[error("Invalid escape sequence '{text}' in string literal")]
    InvalidEscape { text: String },
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, source: &str, span: Span) -> Self {
        let (line, column) = line_col(source, span.start());
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    pub(crate) fn from_pest(err: pest::error::Error<Rule>) -> Self {
        let span = match err.location {
            InputLocation::Pos(pos) => Span::new(pos, pos),
            InputLocation::Span((start, end)) => Span::new(start, end),
        };
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        let message = match &err.variant {
            ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<String> =
                    positives.iter().map(|rule| describe_rule(*rule)).collect();
                format!("expected {}", expected.join(", "))
            }
            other => other.message().into_owned(),
        };
        Self {
            kind: CompileErrorKind::Syntax { message },
            span,
            line,
            column,
        }
    }
}

fn describe_rule(rule: Rule) -> String {
    match rule {
        Rule::EOI => "end of expression".to_string(),
        Rule::expression => "expression".to_string(),
        Rule::name | Rule::plain_name => "field name".to_string(),
        Rule::variable => "variable".to_string(),
        other => format!("{:?}", other).replace('_', " "),
    }
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
