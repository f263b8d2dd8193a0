// Tests with valid expressions for each rule in the parser.

use crate::parser::{ExpressionParser, Rule};
use pest::Parser;
use pest::iterators::Pair;

fn contains_rule(pair: Pair<Rule>, target: Rule) -> bool {
    if pair.as_rule() == target {
        return true;
    }
    for inner in pair.into_inner() {
        if contains_rule(inner, target) {
            return true;
        }
    }
    false
}

macro_rules! rule_examples {
    ( $($rule:ident => [$($expr:expr),* $(,)?]),* $(,)? ) => {
        $(
            #[test]
            fn $rule() {
                let inputs = vec![$($expr),*];
                for input in inputs {
                    let result = ExpressionParser::parse(Rule::main, input)
                        .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", input, e));
                    let root = result.into_iter().next().unwrap();
                    assert!(
                        contains_rule(root.clone(), Rule::$rule),
                        "Expected to find rule {:?} in parse tree for input '{}'",
                        Rule::$rule,
                        input
                    );
                }
            }
        )*
    };
}

rule_examples! {
    number => ["42", "-3.5", "6.022e23", "1E-3"],
    string => ["\"hello\"", "'world'", "\"a\\nb\"", "'\\u0041'"],
    boolean => ["true", "false"],
    null => ["null"],
    name => ["name", "Account", "`with space`", "_under"],
    quoted_name => ["`first name`"],
    variable => ["$x", "$sum(1)", "$_private"],
    context => ["$", "$.a"],
    root => ["$$", "$$.a"],
    wildcard => ["*", "a.*"],
    block => ["(1; 2)", "()", "($x := 1; $x)"],
    array => ["[]", "[1, 2]", "[1..3]"],
    array_item => ["[1]", "[1..3]"],
    object => ["{}", "{'a': 1}", "{\"a\": 1, \"b\": 2}"],
    object_entry => ["{'a': 1}"],
    lambda => ["function($x) { $x }", "λ() { 1 }"],
    lambda_params => ["function($a, $b) { $a }"],
    neg => ["-1", "-a"],
    bind_op => ["$x := 1"],
    chain_op => ["a ~> $f()"],
    condition_op => ["a ? 1 : 2"],
    condition_then_op => ["a ? 1"],
    or => ["a or b"],
    and => ["a and b"],
    in_op => ["a in [1]"],
    eq => ["a = b"],
    ne => ["a != b"],
    lt => ["a < b"],
    le => ["a <= b"],
    gt => ["a > b"],
    ge => ["a >= b"],
    concat => ["a & b"],
    add => ["a + b"],
    sub => ["a - b"],
    mul => ["a * b"],
    div => ["a / b"],
    rem => ["a % b"],
    map_op => ["a.b"],
    call_op => ["$f()", "$f(1, 2)"],
    predicate_op => ["a[0]", "a[b > 1]"],
}
