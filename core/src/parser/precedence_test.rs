use crate::parser::Expr;

use super::parser::parse;

// Helper function to parse an expression and return the AST.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast(source: &str) -> Expr {
    parse(source).unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("a + b - c"), ast("(a + b) - c"));
    assert_eq!(ast("a - b + c"), ast("(a - b) + c"));
    assert_eq!(
        ast("a + b - c + d - e + f"),
        ast("((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("a + b * c"), ast("a + (b * c)"));
    assert_eq!(ast("a * b + c"), ast("(a * b) + c"));
    assert_eq!(ast("a % b + c"), ast("(a % b) + c"));
}

#[test]
fn test_concat_vs_addition() {
    assert_eq!(ast("a & b + c"), ast("(a & b) + c"));
    assert_eq!(ast("a + b & c"), ast("(a + b) & c"));
}

#[test]
fn test_and_vs_or() {
    assert_eq!(
        ast("true and false or true"),
        ast("(true and false) or true")
    );
    assert_eq!(
        ast("true or false and true"),
        ast("true or (false and true)")
    );
}

#[test]
fn test_comparison_vs_logical() {
    assert_eq!(ast("a = 1 and b > 2"), ast("(a = 1) and (b > 2)"));
    assert_eq!(ast("a + 1 < b * 2"), ast("(a + 1) < (b * 2)"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("-a + b"), ast("(-a) + b"));
    assert_eq!(ast("-a * b"), ast("(-a) * b"));
}

#[test]
fn test_path_binds_tighter_than_arithmetic() {
    assert_eq!(ast("a.b + c.d"), ast("(a.b) + (c.d)"));
    assert_eq!(ast("-a.b"), ast("-(a.b)"));
}

#[test]
fn test_predicate_binds_tighter_than_path() {
    assert_eq!(
        ast("a.b[0]"),
        Expr::Path {
            lhs: Box::new(Expr::name("a")),
            rhs: Box::new(Expr::Filter {
                value: Box::new(Expr::name("b")),
                predicate: Box::new(Expr::number(0.0)),
            }),
        }
    );
}

#[test]
fn test_condition_is_lowest_after_bind() {
    assert_eq!(ast("a or b ? 1 : 2"), ast("(a or b) ? 1 : 2"));
    assert_eq!(ast("a ? 1 : b ? 2 : 3"), ast("a ? 1 : (b ? 2 : 3)"));
    assert_eq!(ast("$x := a ? 1 : 2"), ast("$x := (a ? 1 : 2)"));
}

#[test]
fn test_bind_is_right_associative() {
    assert_eq!(
        ast("$a := $b := 1"),
        Expr::Bind {
            name: "a".to_string(),
            value: Box::new(Expr::Bind {
                name: "b".to_string(),
                value: Box::new(Expr::number(1.0)),
            }),
        }
    );
}

#[test]
fn test_chain_is_left_associative() {
    assert_eq!(ast("a ~> $f ~> $g"), ast("(a ~> $f) ~> $g"));
}
