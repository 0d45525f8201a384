use super::*;

#[test]
fn test_operators_build_nodes() {
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let built = x.clone() * y.clone() + Expr::constant(1.0);
    assert_eq!(
        built,
        Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Mul, x, y),
            Expr::Constant(1.0)
        )
    );
}

#[test]
fn test_zero_and_one() {
    assert!(Expr::zero().is_zero());
    assert!(Expr::one().is_one());
    assert!(Expr::Parenthesis(Box::new(Expr::Constant(0.0))).is_zero());
    assert!(!Expr::symbol("x").is_zero());
}

#[test]
fn test_symbols_in_order_of_appearance() {
    let expr = Expr::symbol("y") * Expr::symbol("x") + Expr::symbol("y").exp();
    assert_eq!(expr.symbols(), vec!["y".to_string(), "x".to_string()]);
}

#[test]
fn test_strip_parens_and_node_count() {
    let inner = Expr::symbol("x") + Expr::constant(2.0);
    let wrapped = Expr::Parenthesis(Box::new(Expr::Parenthesis(Box::new(inner.clone()))));
    assert_eq!(wrapped.strip_parens(), &inner);
    assert_eq!(wrapped.node_count(), 5);
    assert_eq!(Expr::Parenthesis(Box::new(Expr::symbol("z"))).as_symbol(), Some("z"));
}

#[test]
fn test_binary_op_symbols() {
    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow] {
        assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
    }
    assert_eq!(BinaryOp::from_symbol('%'), None);
}

#[test]
fn test_deep_sum_count_and_dismantle() {
    let mut expr = Expr::symbol("x");
    for _ in 0..100_000 {
        expr = expr + Expr::symbol("x");
    }
    assert_eq!(expr.node_count(), 200_001);
    assert_eq!(expr.symbols(), vec!["x".to_string()]);
    expr.dismantle();
}
