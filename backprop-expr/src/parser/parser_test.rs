use super::*;
use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

#[test]
fn test_parse_precedence() -> Result<(), ParseError> {
    let expr = parse("x * y + y * z")?;
    assert_eq!(expr, sym("x") * sym("y") + sym("y") * sym("z"));

    let expr = parse("a - b - c")?;
    assert_eq!(expr, (sym("a") - sym("b")) - sym("c"));

    let expr = parse("a / b * c")?;
    assert_eq!(expr, (sym("a") / sym("b")) * sym("c"));

    let expr = parse("2 ^ 3 ^ x")?;
    assert_eq!(
        expr,
        Expr::constant(2.0).pow(Expr::constant(3.0).pow(sym("x")))
    );
    Ok(())
}

#[test]
fn test_parse_keeps_parentheses() -> Result<(), ParseError> {
    let expr = parse("(x + y) * z")?;
    assert_eq!(
        expr,
        Expr::binary(
            BinaryOp::Mul,
            Expr::Parenthesis(Box::new(sym("x") + sym("y"))),
            sym("z")
        )
    );
    Ok(())
}

#[test]
fn test_parse_numbers() -> Result<(), ParseError> {
    assert_eq!(parse("2.5")?, Expr::constant(2.5));
    assert_eq!(parse(".5")?, Expr::constant(0.5));
    assert_eq!(parse("3.")?, Expr::constant(3.0));
    assert_eq!(parse("1e-3")?, Expr::constant(0.001));
    assert_eq!(parse("2E2")?, Expr::constant(200.0));
    Ok(())
}

#[test]
fn test_parse_unary_minus() -> Result<(), ParseError> {
    assert_eq!(parse("-x ^ 2")?, -(sym("x").pow(Expr::constant(2.0))));
    assert_eq!(parse("x * -2")?, sym("x") * -Expr::constant(2.0));
    assert_eq!(parse("x - -1")?, sym("x") - -Expr::constant(1.0));
    assert_eq!(parse("--x")?, -(-sym("x")));
    assert_eq!(parse("+x")?, sym("x"));
    Ok(())
}

#[test]
fn test_parse_function_calls() -> Result<(), ParseError> {
    assert_eq!(parse("sigma(x)")?, sym("x").sigmoid());
    assert_eq!(parse("exp(x * y)")?, (sym("x") * sym("y")).exp());
    assert_eq!(
        parse("max(x, 1)")?,
        Expr::function("max", vec![sym("x"), Expr::constant(1.0)])
    );
    assert_eq!(parse("f()")?, Expr::function("f", vec![]));
    assert_eq!(parse(" exp ( x ) ")?, sym("x").exp());
    Ok(())
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse(""), Err(ParseError::EmptyInput));
    assert_eq!(parse("   "), Err(ParseError::EmptyInput));
    for text in ["x +", "(x + y", "x y", "exp(x y)", "* x", "x $ y", "x )"] {
        assert!(
            matches!(parse(text), Err(ParseError::Syntax { line: 1, .. })),
            "'{}' should not parse",
            text
        );
    }
}

#[test]
fn test_parse_error_location() {
    match parse("x +\n  * y") {
        Err(ParseError::Syntax { line, message, .. }) => {
            assert_eq!(line, 2);
            assert!(!message.is_empty());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_parse_long_flat_sum() -> Result<(), ParseError> {
    let text = vec!["x"; 50_000].join(" + ");
    let expr = parse(&text)?;
    assert_eq!(expr.node_count(), 99_999);
    expr.dismantle();
    Ok(())
}
