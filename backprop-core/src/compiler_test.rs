use super::*;
use approx::assert_relative_eq;

fn context() -> EvaluationContext {
    EvaluationContext::new()
        .with("x", 5.0)
        .with("y", 7.0)
        .with("z", 13.0)
}

#[test]
fn test_symbol_table_interns_by_name() {
    let context = Rc::new(EvaluationContext::new());
    let mut table = SymbolTable::<f64>::new();
    assert!(table.is_empty());
    let first = table.intern("x", &context);
    let second = table.intern("x", &context);
    let other = table.intern("y", &context);
    assert!(first.ptr_eq(&second));
    assert!(!first.ptr_eq(&other));
    assert_eq!(table.len(), 2);
    assert!(table.get("x").unwrap().ptr_eq(&first));
    assert!(table.get("z").is_none());
}

#[test]
fn test_repeated_symbol_is_one_node() {
    let root = compile_str("x * y + y * z", context()).unwrap();
    let y = root.find_symbol("y").unwrap();
    assert_eq!(y.consumer_count(), 2);
    assert_eq!(root.find_symbol("x").unwrap().consumer_count(), 1);
    assert_eq!(root.consumer_count(), 0);
    // +, two products, three symbols
    assert_eq!(root.nodes().len(), 6);
}

#[test]
fn test_self_product_counts_both_uses() {
    let root = compile_str("x * x", context()).unwrap();
    let x = root.find_symbol("x").unwrap();
    assert_eq!(x.consumer_count(), 2);
    assert_eq!(root.operands().len(), 2);
    assert!(root.operands()[0].ptr_eq(&root.operands()[1]));
}

#[test]
fn test_parentheses_create_no_nodes() {
    let grouped = compile_str("((x + y)) * (z)", context()).unwrap();
    let plain = compile_str("x + y", context()).unwrap();
    assert_eq!(grouped.nodes().len(), 5);
    assert_eq!(grouped.operands()[0].label(), "+");
    assert_relative_eq!(grouped.value().unwrap(), 156.0);
    assert_relative_eq!(plain.value().unwrap(), 12.0);
}

#[test]
fn test_functions_and_aliases() {
    for text in ["sigma(x)", "sigmoid(x)"] {
        let root = compile_str(text, context()).unwrap();
        assert_eq!(root.label(), "sigma");
        assert_relative_eq!(root.value().unwrap(), 0.993_307_149_075_715_1, epsilon = 1e-12);
    }
    let root = compile_str("exp(x - y)", context()).unwrap();
    assert_eq!(root.label(), "exp");
    assert_relative_eq!(root.value().unwrap(), (-2.0f64).exp());
}

#[test]
fn test_negated_literal_folds_to_constant() {
    let root = compile_str("-1 * x", context()).unwrap();
    let lhs = &root.operands()[0];
    assert!(lhs.is_leaf());
    assert_eq!(lhs.cached_value(), None);
    assert_eq!(lhs.value().unwrap(), -1.0);
    assert_eq!(root.value().unwrap(), -5.0);

    let root = compile_str("x * -(2)", context()).unwrap();
    assert_eq!(root.value().unwrap(), -10.0);
}

#[test]
fn test_unsupported_expressions() {
    for text in ["x ^ 2", "-x", "-(x + y)", "tanh(x)", "exp(x, y)", "sigma()", "x + y ^ 2"] {
        let result = compile_str(text, context());
        assert!(
            matches!(result, Err(BackpropError::UnsupportedExpression(_))),
            "'{}' should be rejected",
            text
        );
    }
}

#[test]
fn test_unsupported_expression_message() {
    let err = compile_str("tanh(x)", context()).unwrap_err();
    assert_eq!(
        err,
        BackpropError::UnsupportedExpression("unknown function: 'tanh(x)'".to_string())
    );
}

#[test]
fn test_parse_errors_are_wrapped() {
    let err = compile_str("x +", context()).unwrap_err();
    assert!(matches!(err, BackpropError::Parse(_)));
}

#[test]
fn test_unbound_symbol_compiles() {
    let root = compile_str("x * w", context()).unwrap();
    assert_eq!(
        root.value(),
        Err(BackpropError::UnboundSymbol {
            name: "w".to_string()
        })
    );
}

#[test]
fn test_compiling_twice_gives_distinct_equal_graphs() {
    let first = compile_str("x * y + y * z", context()).unwrap();
    let second = compile_str("x * y + y * z", context()).unwrap();
    assert!(!first.ptr_eq(&second));
    assert!(first.structurally_eq(&second));
    assert_eq!(first.consumer_counts(), second.consumer_counts());

    let different = compile_str("x * y + z * y", context()).unwrap();
    assert!(!first.structurally_eq(&different));
}

#[test]
fn test_symbolic_compile() {
    let root = compile_symbolic_str("x * y + y * z").unwrap();
    assert_eq!(root.value().unwrap().to_string(), "x * y + y * z");
    assert_eq!(root.to_string(), "x * y + y * z");
}

#[test]
fn test_long_flat_sum_compiles() {
    let text = vec!["x"; 50_000].join(" + ");
    let root = compile_str(&text, context()).unwrap();
    let x = root.find_symbol("x").unwrap();
    assert_eq!(x.consumer_count(), 50_000);
    assert_eq!(root.nodes().len(), 50_000);
    assert_relative_eq!(root.value().unwrap(), 250_000.0);

    root.back_propagate().unwrap();
    assert_eq!(x.derivative(), Some(50_000.0));
}

#[test]
fn test_long_product_chain_symbolic_compiles() {
    let text = vec!["sigma(x)"; 20_000].join(" * ");
    let root = compile_symbolic_str(&text).unwrap();
    let x = root.find_symbol("x").unwrap();
    assert_eq!(x.consumer_count(), 20_000);
    root.to_expr().dismantle();
}
