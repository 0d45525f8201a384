use approx::assert_relative_eq;
use backprop_core::utils::testing::{check_symbol_derivative, symbol_node};
use backprop_core::{
    compile_str, BackpropError, BackpropOptions, EvaluationContext, Traversal,
};

mod common;
use common::{propagated, sample_context};

#[test]
fn test_plus() {
    let root = propagated("x + y");
    check_symbol_derivative(&root, "x", 1.0, 1e-12);
    check_symbol_derivative(&root, "y", 1.0, 1e-12);
    assert_eq!(symbol_node(&root, "x").consumer_count(), 1);
    assert_eq!(symbol_node(&root, "y").consumer_count(), 1);
}

#[test]
fn test_multiply() {
    let root = propagated("x * y");
    check_symbol_derivative(&root, "x", 7.0, 1e-12);
    check_symbol_derivative(&root, "y", 5.0, 1e-12);
}

#[test]
fn test_minus() {
    let root = propagated("x - y");
    check_symbol_derivative(&root, "x", 1.0, 1e-12);
    check_symbol_derivative(&root, "y", -1.0, 1e-12);
}

#[test]
fn test_divide() {
    let root = propagated("x / y");
    check_symbol_derivative(&root, "x", 1.0 / 7.0, 1e-12);
    check_symbol_derivative(&root, "y", -5.0 / 49.0, 1e-12);
}

#[test]
fn test_sigmoid() {
    let root = propagated("sigma(x)");
    check_symbol_derivative(&root, "x", 0.006_648_056_670_790_033, 1e-12);
    let root = propagated("sigmoid(x)");
    check_symbol_derivative(&root, "x", 0.006_648_056_670_790_033, 1e-12);
}

#[test]
fn test_exp() {
    let root = propagated("exp(x - y)");
    let e = (-2.0f64).exp();
    check_symbol_derivative(&root, "x", e, 1e-12);
    check_symbol_derivative(&root, "y", -e, 1e-12);
}

#[test]
fn test_shared_variable() {
    let root = propagated("x * y + y * z");
    let y = symbol_node(&root, "y");
    assert_eq!(y.consumer_count(), 2);
    assert_eq!(y.accumulated_contributions(), 2);
    check_symbol_derivative(&root, "y", 18.0, 1e-12);
    check_symbol_derivative(&root, "x", 7.0, 1e-12);
    check_symbol_derivative(&root, "z", 7.0, 1e-12);
}

#[test]
fn test_every_node_is_final() {
    let root = propagated("sigma(x * y) / (exp(z - x) + y * y) - 2 * x");
    for node in root.nodes() {
        assert!(node.is_finalized(), "node '{}' not final", node.label());
        assert_eq!(node.accumulated_contributions(), node.consumer_count());
    }
}

#[test]
fn test_product_rule_through_shared_subexpression() {
    // (x * y) * (x * y) = x^2 y^2, d/dx = 2 x y^2 = 490
    let root = propagated("(x * y) * (x * y)");
    check_symbol_derivative(&root, "x", 490.0, 1e-9);
    check_symbol_derivative(&root, "y", 350.0, 1e-9);
}

#[test]
fn test_traversals_agree() {
    let text = "sigma(x / z) * exp(y - x) + x * y * z";
    let mut derivatives = Vec::new();
    for traversal in [Traversal::Iterative, Traversal::Recursive] {
        let root = compile_str(text, sample_context()).unwrap();
        root.back_propagate_with(BackpropOptions::default().with_traversal(traversal))
            .unwrap();
        let values: Vec<f64> = ["x", "y", "z"]
            .iter()
            .map(|name| symbol_node(&root, name).derivative().unwrap())
            .collect();
        derivatives.push(values);
    }
    for (a, b) in derivatives[0].iter().zip(derivatives[1].iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_unbound_symbol() {
    let root = compile_str("x * w", sample_context()).unwrap();
    let err = root.back_propagate().unwrap_err();
    assert_eq!(
        err,
        BackpropError::UnboundSymbol {
            name: "w".to_string()
        }
    );
    assert_eq!(err.to_string(), "Symbol 'w' is not bound in the evaluation context");
}

#[test]
fn test_second_pass_is_rejected() {
    let root = propagated("x * y");
    assert_eq!(root.back_propagate(), Err(BackpropError::AlreadyPropagated));
}

#[test]
fn test_value_is_idempotent() {
    let root = compile_str("x * y + y * z", sample_context()).unwrap();
    assert_eq!(root.value(), Ok(126.0));
    assert_eq!(root.value(), Ok(126.0));
    root.back_propagate().unwrap();
    assert_eq!(root.value(), Ok(126.0));
}

#[test]
fn test_context_from_pairs() {
    let context: EvaluationContext = vec![("a".to_string(), 2.0), ("b".to_string(), 0.5)]
        .into_iter()
        .collect();
    let root = compile_str("a / b", context).unwrap();
    assert_eq!(root.value(), Ok(4.0));
}
