use super::parser::{ExpressionParser, Rule, parse};
use super::{ArrayItem, BinaryOp, CompileErrorKind, Expr, Literal};
use pest::Parser;
use pretty_assertions::assert_eq;

#[test]
fn test_valid_expressions() {
    let examples = [
        "1 + 2",
        "name",
        "Account.Order[0].Product",
        "$sum(c)",
        "$sum(items.(price * qty))",
        "a.b.c",
        "`first name`",
        "[1, 2, 3]",
        "[1..5]",
        "{\"a\": 1, 'b': [true, false, null]}",
        "$x := 5",
        "($x := 5; $x * 2)",
        "function($a, $b) { $a + $b }",
        "λ($v) { $v }",
        "x > 3 ? 'big' : 'small'",
        "x > 3 ? 'big'",
        "items[price > 10]",
        "items[-1]",
        "$uppercase('abc') & \"def\"",
        "$ ~> $uppercase()",
        "$$.a",
        "*.b",
        "a in [1, 2]",
        "a != b and c <= d or not_a_keyword",
        "/* comment */ 1",
        "1e3",
        "1.5E-2",
        "'\\u0041\\n'",
    ];

    for expr in examples {
        ExpressionParser::parse(Rule::main, expr)
            .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", expr, e));
    }
}

#[test]
fn test_invalid_expressions() {
    let examples = [
        "1 +",
        "$sum(",
        "{a: }",
        "[1, 2",
        "function($a) $a",
        "'unterminated",
        "a ? : b",
        "1..2",
        "",
    ];

    for expr in examples {
        assert!(
            ExpressionParser::parse(Rule::main, expr).is_err(),
            "Expected '{}' to be rejected",
            expr
        );
    }
}

#[test]
fn test_path_builds_left_nested_tree() {
    let expr = parse("a.b.c").unwrap();
    assert_eq!(
        expr,
        Expr::Path {
            lhs: Box::new(Expr::Path {
                lhs: Box::new(Expr::name("a")),
                rhs: Box::new(Expr::name("b")),
            }),
            rhs: Box::new(Expr::name("c")),
        }
    );
}

#[test]
fn test_function_call() {
    let expr = parse("$sum(c)").unwrap();
    assert_eq!(
        expr,
        Expr::Call {
            callee: Box::new(Expr::variable("sum")),
            args: vec![Expr::name("c")],
        }
    );
}

#[test]
fn test_context_variable_is_empty_name() {
    assert_eq!(parse("$").unwrap(), Expr::variable(""));
    assert_eq!(parse("$$").unwrap(), Expr::Root);
}

#[test]
fn test_quoted_name() {
    assert_eq!(parse("`first name`").unwrap(), Expr::name("first name"));
}

#[test]
fn test_string_escapes() {
    assert_eq!(parse(r#""a\"b\n""#).unwrap(), Expr::string("a\"b\n"));
    assert_eq!(parse(r"'A'").unwrap(), Expr::string("A"));
    assert_eq!(parse("''").unwrap(), Expr::string(""));
}

#[test]
fn test_literals() {
    assert_eq!(parse("true").unwrap(), Expr::Literal(Literal::Bool(true)));
    assert_eq!(parse("null").unwrap(), Expr::Literal(Literal::Null));
    assert_eq!(parse("2.5").unwrap(), Expr::number(2.5));
    assert_eq!(parse("1e2").unwrap(), Expr::number(100.0));
}

#[test]
fn test_number_out_of_range() {
    let err = parse("1e999").unwrap_err();
    assert!(matches!(err.kind, CompileErrorKind::InvalidNumber { .. }));
}

#[test]
fn test_range_item() {
    assert_eq!(
        parse("[1..3]").unwrap(),
        Expr::Array(vec![ArrayItem::Range(Expr::number(1.0), Expr::number(3.0))])
    );
}

#[test]
fn test_parenthesised_expression_is_not_a_block() {
    assert_eq!(parse("(1)").unwrap(), Expr::number(1.0));
    assert!(matches!(parse("(1; 2)").unwrap(), Expr::Block(items) if items.len() == 2));
    assert!(matches!(parse("($x := 1)").unwrap(), Expr::Block(items) if items.len() == 1));
}

#[test]
fn test_bind() {
    assert_eq!(
        parse("$x := 1 + 2").unwrap(),
        Expr::Bind {
            name: "x".to_string(),
            value: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::number(1.0)),
                right: Box::new(Expr::number(2.0)),
            }),
        }
    );
}

#[test]
fn test_bind_requires_variable() {
    let err = parse("a := 1").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::InvalidBindTarget);
}

#[test]
fn test_condition_without_else() {
    assert_eq!(
        parse("a ? 1").unwrap(),
        Expr::Condition {
            cond: Box::new(Expr::name("a")),
            then_branch: Box::new(Expr::number(1.0)),
            else_branch: None,
        }
    );
}

#[test]
fn test_lambda_params() {
    match parse("function($a, $b) { $a }").unwrap() {
        Expr::Lambda(lambda) => {
            assert_eq!(lambda.params, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(lambda.body, Expr::variable("a"));
        }
        other => panic!("Expected lambda, got {:?}", other),
    }
}

#[test]
fn test_error_reports_position() {
    let err = parse("1 +\n  )").unwrap_err();
    assert!(matches!(err.kind, CompileErrorKind::Syntax { .. }));
    assert_eq!(err.line, 2);
    assert!(err.to_string().contains("line 2"));
}
