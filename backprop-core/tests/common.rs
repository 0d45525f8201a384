use backprop_core::{compile_str, compile_symbolic_str, EvaluationContext, Node};
use backprop_core::backprop_expr::Expr;

// Helpers shared by the integration test crates.
// Added allow(dead_code) because usage across different test crates isn't detected easily.

/// x = 5, y = 7, z = 13: the bindings used throughout the backprop tests.
#[allow(dead_code)]
pub fn sample_context() -> EvaluationContext {
    EvaluationContext::new()
        .with("x", 5.0)
        .with("y", 7.0)
        .with("z", 13.0)
}

/// Compiles `text` against [`sample_context`] and runs the backward pass.
#[allow(dead_code)]
pub fn propagated(text: &str) -> Node<f64> {
    let root = compile_str(text, sample_context()).expect("Test expression should compile");
    root.back_propagate().expect("Backward pass should succeed");
    root
}

/// Compiles `text` symbolically and runs the backward pass.
#[allow(dead_code)]
pub fn propagated_symbolic(text: &str) -> Node<Expr> {
    let root = compile_symbolic_str(text).expect("Test expression should compile");
    root.back_propagate().expect("Backward pass should succeed");
    root
}

/// Derivative of a symbolic root with respect to `name`, rendered as text.
#[allow(dead_code)]
pub fn symbolic_derivative(root: &Node<Expr>, name: &str) -> String {
    root.find_symbol(name)
        .and_then(|node| node.derivative())
        .map(|expr| expr.to_string())
        .unwrap_or_else(|| panic!("No final derivative for '{}'", name))
}
