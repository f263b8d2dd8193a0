use std::sync::Arc;

use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use super::error::{CompileError, CompileErrorKind};
use super::parsed_expr::{ArrayItem, Expr, LambdaExpr, Literal};
use super::syntax::{BinaryOp, Span, UnaryOp};

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::bind_op, Assoc::Right))        // `:=`

        // Conditionals.
        .op(Op::postfix(Rule::condition_then_op))          // `? a`
        .op(Op::infix(Rule::condition_op, Assoc::Right))   // `? a :`

        // Logical operators.
        .op(Op::infix(Rule::or, Assoc::Left))              // `or`
        .op(Op::infix(Rule::and, Assoc::Left))             // `and`

        // Comparison and chaining.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::ne, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left) |
            Op::infix(Rule::in_op, Assoc::Left) |
            Op::infix(Rule::chain_op, Assoc::Left)
        )                                                  // `=`, `<`, `in`, `~>`, ...

        // Arithmetic and concatenation.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left) |
            Op::infix(Rule::concat, Assoc::Left)
        )                                                  // `+`, `-`, `&`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::rem, Assoc::Left)
        )                                                  // `*`, `/`, `%`
        .op(Op::prefix(Rule::neg))                         // `-`

        // Path navigation.
        .op(Op::infix(Rule::map_op, Assoc::Left))          // `.`

        // Postfix operators.
        .op(Op::postfix(Rule::call_op) | Op::postfix(Rule::predicate_op)) // `()`, `[]`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

type ParseResult<T> = Result<T, CompileError>;

/// Parse expression text into an expression tree.
pub fn parse(source: &str) -> ParseResult<Expr> {
    let mut pairs =
        ExpressionParser::parse(Rule::main, source).map_err(CompileError::from_pest)?;
    let main = pairs.next().ok_or_else(|| missing(source, Span::new(0, source.len())))?;
    let span = Span::from(main.as_span());
    let expression = main
        .into_inner()
        .next()
        .ok_or_else(|| missing(source, span))?;
    Builder { source }.expr(expression)
}

fn missing(source: &str, span: Span) -> CompileError {
    CompileError::new(
        CompileErrorKind::Syntax {
            message: "missing expected pair in rule".to_string(),
        },
        source,
        span,
    )
}

/// Converts pest pairs into [`Expr`] nodes.
struct Builder<'s> {
    source: &'s str,
}

impl<'s> Builder<'s> {
    fn error(&self, kind: CompileErrorKind, pair: &Pair<'_, Rule>) -> CompileError {
        CompileError::new(kind, self.source, Span::from(pair.as_span()))
    }

    fn next_expr(
        &self,
        pairs: &mut pest::iterators::Pairs<'_, Rule>,
        parent: &Pair<'_, Rule>,
    ) -> ParseResult<Expr> {
        match pairs.next() {
            Some(pair) => self.expr(pair),
            None => Err(missing(self.source, Span::from(parent.as_span()))),
        }
    }

    fn expr(&self, pair: Pair<'_, Rule>) -> ParseResult<Expr> {
        match pair.as_rule() {
            Rule::expression => PRATT_PARSER
                .map_primary(|primary| self.primary(primary))
                .map_prefix(|op, rhs| match op.as_rule() {
                    Rule::neg => Ok(Expr::Unary {
                        op: UnaryOp::Neg,
                        expr: Box::new(rhs?),
                    }),
                    _ => unreachable!("Unknown prefix operator: {:?}", op.as_rule()),
                })
                .map_infix(|lhs, op, rhs| self.infix(lhs?, op, rhs?))
                .map_postfix(|lhs, op| self.postfix(lhs?, op))
                .parse(pair.into_inner()),
            _ => self.primary(pair),
        }
    }

    fn infix(&self, lhs: Expr, op: Pair<'_, Rule>, rhs: Expr) -> ParseResult<Expr> {
        let op = match op.as_rule() {
            Rule::add => BinaryOp::Add,
            Rule::sub => BinaryOp::Sub,
            Rule::mul => BinaryOp::Mul,
            Rule::div => BinaryOp::Div,
            Rule::rem => BinaryOp::Rem,
            Rule::concat => BinaryOp::Concat,
            Rule::eq => BinaryOp::Eq,
            Rule::ne => BinaryOp::Ne,
            Rule::lt => BinaryOp::Lt,
            Rule::le => BinaryOp::Le,
            Rule::gt => BinaryOp::Gt,
            Rule::ge => BinaryOp::Ge,
            Rule::in_op => BinaryOp::In,
            Rule::and => BinaryOp::And,
            Rule::or => BinaryOp::Or,
            Rule::map_op => {
                return Ok(Expr::Path {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                });
            }
            Rule::chain_op => {
                return Ok(Expr::Chain {
                    value: Box::new(lhs),
                    function: Box::new(rhs),
                });
            }
            Rule::bind_op => {
                return match lhs {
                    Expr::Variable(name) if !name.is_empty() => Ok(Expr::Bind {
                        name,
                        value: Box::new(rhs),
                    }),
                    _ => Err(self.error(CompileErrorKind::InvalidBindTarget, &op)),
                };
            }
            Rule::condition_op => {
                let mut inner = op.clone().into_inner();
                let then_branch = self.next_expr(&mut inner, &op)?;
                return Ok(Expr::Condition {
                    cond: Box::new(lhs),
                    then_branch: Box::new(then_branch),
                    else_branch: Some(Box::new(rhs)),
                });
            }
            _ => unreachable!("Unknown binary operator: {:?}", op.as_rule()),
        };
        Ok(Expr::Binary {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
        })
    }

    fn postfix(&self, lhs: Expr, op: Pair<'_, Rule>) -> ParseResult<Expr> {
        match op.as_rule() {
            Rule::call_op => {
                let args = op
                    .into_inner()
                    .map(|arg| self.expr(arg))
                    .collect::<ParseResult<_>>()?;
                Ok(Expr::Call {
                    callee: Box::new(lhs),
                    args,
                })
            }
            Rule::predicate_op => {
                let mut inner = op.clone().into_inner();
                let predicate = self.next_expr(&mut inner, &op)?;
                Ok(Expr::Filter {
                    value: Box::new(lhs),
                    predicate: Box::new(predicate),
                })
            }
            Rule::condition_then_op => {
                let mut inner = op.clone().into_inner();
                let then_branch = self.next_expr(&mut inner, &op)?;
                Ok(Expr::Condition {
                    cond: Box::new(lhs),
                    then_branch: Box::new(then_branch),
                    else_branch: None,
                })
            }
            _ => unreachable!("Unknown postfix operator: {:?}", op.as_rule()),
        }
    }

    fn primary(&self, pair: Pair<'_, Rule>) -> ParseResult<Expr> {
        match pair.as_rule() {
            Rule::expression => self.expr(pair),

            Rule::number => {
                let text = pair.as_str();
                let value: f64 = text.parse().map_err(|_| {
                    self.error(
                        CompileErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        &pair,
                    )
                })?;
                if !value.is_finite() {
                    return Err(self.error(
                        CompileErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        &pair,
                    ));
                }
                Ok(Expr::Literal(Literal::Number(value)))
            }

            Rule::string => {
                let inner = pair.clone().into_inner().next();
                let raw = inner.as_ref().map(|p| p.as_str()).unwrap_or("");
                let value = unescape(raw).map_err(|text| {
                    self.error(CompileErrorKind::InvalidEscape { text }, &pair)
                })?;
                Ok(Expr::Literal(Literal::String(value)))
            }

            Rule::boolean => Ok(Expr::Literal(Literal::Bool(pair.as_str() == "true"))),

            Rule::null => Ok(Expr::Literal(Literal::Null)),

            Rule::name => {
                let inner = pair.clone().into_inner().next();
                let name = match inner {
                    Some(p) if p.as_rule() == Rule::quoted_name => p
                        .into_inner()
                        .next()
                        .map(|q| q.as_str().to_string())
                        .unwrap_or_default(),
                    Some(p) => p.as_str().to_string(),
                    None => pair.as_str().to_string(),
                };
                Ok(Expr::Name(name))
            }

            Rule::variable => Ok(Expr::Variable(variable_name(&pair))),

            Rule::context => Ok(Expr::Variable(String::new())),

            Rule::root => Ok(Expr::Root),

            Rule::wildcard => Ok(Expr::Wildcard),

            Rule::block => {
                let mut items = pair
                    .into_inner()
                    .map(|item| self.expr(item))
                    .collect::<ParseResult<Vec<_>>>()?;
                // A parenthesised expression is only a scope when it can bind.
                if items.len() == 1 && !matches!(items[0], Expr::Bind { .. }) {
                    return Ok(items.remove(0));
                }
                Ok(Expr::Block(items))
            }

            Rule::array => {
                let items = pair
                    .into_inner()
                    .map(|item| self.array_item(item))
                    .collect::<ParseResult<_>>()?;
                Ok(Expr::Array(items))
            }

            Rule::object => {
                let entries = pair
                    .into_inner()
                    .map(|entry| self.object_entry(entry))
                    .collect::<ParseResult<_>>()?;
                Ok(Expr::Object(entries))
            }

            Rule::lambda => {
                let mut params = Vec::new();
                let mut body = None;
                for part in pair.clone().into_inner() {
                    match part.as_rule() {
                        Rule::lambda_params => {
                            params = part.into_inner().map(|p| variable_name(&p)).collect();
                        }
                        _ => body = Some(self.expr(part)?),
                    }
                }
                let body = body.ok_or_else(|| missing(self.source, Span::from(pair.as_span())))?;
                Ok(Expr::Lambda(Arc::new(LambdaExpr { params, body })))
            }

            _ => Err(self.error(
                CompileErrorKind::Syntax {
                    message: format!("Unhandled rule: {:?}", pair.as_rule()),
                },
                &pair,
            )),
        }
    }

    fn array_item(&self, pair: Pair<'_, Rule>) -> ParseResult<ArrayItem> {
        let mut inner = pair.clone().into_inner();
        let first = self.next_expr(&mut inner, &pair)?;
        match inner.next() {
            Some(end) => Ok(ArrayItem::Range(first, self.expr(end)?)),
            None => Ok(ArrayItem::Single(first)),
        }
    }

    fn object_entry(&self, pair: Pair<'_, Rule>) -> ParseResult<(Expr, Expr)> {
        let mut inner = pair.clone().into_inner();
        let key = self.next_expr(&mut inner, &pair)?;
        let value = self.next_expr(&mut inner, &pair)?;
        Ok((key, value))
    }
}

fn variable_name(pair: &Pair<'_, Rule>) -> String {
    pair.as_str().trim_start_matches('$').to_string()
}

/// Resolve JSON-style escapes. Returns the offending sequence on failure.
fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).map_err(|_| format!("\\u{hex}"))?;
                let decoded = char::from_u32(code).ok_or_else(|| format!("\\u{hex}"))?;
                out.push(decoded);
            }
            Some(other) => return Err(format!("\\{other}")),
            None => return Err("\\".to_string()),
        }
    }
    Ok(out)
}
