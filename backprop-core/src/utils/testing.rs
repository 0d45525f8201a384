// src/utils/testing.rs
use crate::node::Node;

/// Checks that `node` has a final derivative within `tolerance` of `expected`.
/// Panics with the node's label otherwise.
pub fn check_derivative_near(node: &Node<f64>, expected: f64, tolerance: f64) {
    let actual = match node.derivative() {
        Some(value) => value,
        None => panic!(
            "Node '{}' has no final derivative ({} of {} contributions)",
            node.label(),
            node.accumulated_contributions(),
            node.consumer_count()
        ),
    };
    let diff = (actual - expected).abs();
    if diff > tolerance {
        panic!(
            "Derivative mismatch for '{}': actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
            node.label(),
            actual,
            expected,
            diff,
            tolerance
        );
    }
}

/// The symbol node `name` below `root`. Panics if there is none.
pub fn symbol_node<V: crate::value::GradValue>(root: &Node<V>, name: &str) -> Node<V> {
    match root.find_symbol(name) {
        Some(node) => node,
        None => panic!("Symbol '{}' not found in graph", name),
    }
}

/// Checks that the symbol `name` below `root` has a final derivative near `expected`.
pub fn check_symbol_derivative(root: &Node<f64>, name: &str, expected: f64, tolerance: f64) {
    check_derivative_near(&symbol_node(root, name), expected, tolerance);
}
