// src/functions.rs
//! Named scalar functions understood by the parser, evaluator and simplifier.

/// Function name used for the logistic sigmoid when building expressions.
pub const SIGMOID: &str = "sigma";
/// Function name used for the natural exponential when building expressions.
pub const EXP: &str = "exp";

/// Logistic sigmoid \( \sigma(x) = 1 / (1 + e^{-x}) \).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Returns `true` if `name` refers to the sigmoid (`sigma` or `sigmoid`).
pub fn is_sigmoid(name: &str) -> bool {
    name == SIGMOID || name == "sigmoid"
}

/// Evaluates a known function on numeric arguments.
///
/// Returns `None` for an unknown name or a wrong number of arguments.
pub fn evaluate_function(name: &str, args: &[f64]) -> Option<f64> {
    match args {
        [x] if name == EXP => Some(x.exp()),
        [x] if is_sigmoid(name) => Some(sigmoid(*x)),
        _ => None,
    }
}
