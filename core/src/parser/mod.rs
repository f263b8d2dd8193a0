mod parsed_expr;
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::parse;

pub use parsed_expr::{ArrayItem, Expr, LambdaExpr, Literal};
pub use syntax::{BinaryOp, Span, UnaryOp};
pub use error::{CompileError, CompileErrorKind};

#[cfg(test)]
mod parse_test;

#[cfg(test)]
mod rule_valid_test;

#[cfg(test)]
mod precedence_test;
