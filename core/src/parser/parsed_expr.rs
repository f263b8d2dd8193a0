use std::sync::Arc;

use super::syntax::{BinaryOp, UnaryOp};

/// A parsed JSONata expression.
///
/// The tree is immutable once built. Lambda definitions sit behind an `Arc`
/// so that function values created during evaluation can share them with
/// the compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),

    /// Field lookup against the current context item (`name`, `` `a b` ``).
    Name(String),

    /// `*`: every value of the context object.
    Wildcard,

    /// `$name`. The empty name is the context item `$`.
    Variable(String),

    /// `$$`: the input document.
    Root,

    /// `lhs.rhs`: evaluate `rhs` once per item produced by `lhs`.
    Path {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `value[predicate]`
    Filter {
        value: Box<Expr>,
        predicate: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    Condition {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },

    /// `(a; b; c)`: a new variable scope, yields the last value.
    Block(Vec<Expr>),

    /// `$name := value`
    Bind {
        name: String,
        value: Box<Expr>,
    },

    Lambda(Arc<LambdaExpr>),

    /// `value ~> function`
    Chain {
        value: Box<Expr>,
        function: Box<Expr>,
    },

    Array(Vec<ArrayItem>),

    Object(Vec<(Expr, Expr)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItem {
    Single(Expr),
    Range(Expr, Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<String>,
    pub body: Expr,
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn name(value: impl Into<String>) -> Self {
        Expr::Name(value.into())
    }

    pub fn variable(value: impl Into<String>) -> Self {
        Expr::Variable(value.into())
    }

    /// Name used in diagnostics when this expression is invoked.
    pub fn callee_name(&self) -> Option<&str> {
        match self {
            Expr::Variable(name) | Expr::Name(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}
