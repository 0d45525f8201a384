// src/ops/activation.rs

use crate::value::GradValue;
use backprop_expr::functions::{is_sigmoid, EXP, SIGMOID};

/// Unary functions applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperation {
    /// Natural exponential \( e^a \).
    Exp,
    /// Logistic sigmoid \( \sigma(a) = 1 / (1 + e^{-a}) \).
    Sigmoid,
}

impl UnaryOperation {
    pub fn forward<V: GradValue>(self, a: &V) -> V {
        match self {
            UnaryOperation::Exp => a.exp(),
            UnaryOperation::Sigmoid => a.sigmoid(),
        }
    }

    /// Local partial \( d f(a) / da \).
    ///
    /// Both derivatives are expressed through the forward result, which the node has
    /// already cached: \( e^a \) for `Exp` and \( \sigma(a)(1 - \sigma(a)) \) for `Sigmoid`.
    pub fn partial<V: GradValue>(self, output: &V) -> V {
        match self {
            UnaryOperation::Exp => output.clone(),
            UnaryOperation::Sigmoid => output.clone() * (V::one() - output.clone()),
        }
    }

    /// Function name as written in expressions.
    pub fn name(self) -> &'static str {
        match self {
            UnaryOperation::Exp => EXP,
            UnaryOperation::Sigmoid => SIGMOID,
        }
    }

    /// Accepts `exp`, `sigma` and `sigmoid`.
    pub fn from_function_name(name: &str) -> Option<Self> {
        if name == EXP {
            Some(UnaryOperation::Exp)
        } else if is_sigmoid(name) {
            Some(UnaryOperation::Sigmoid)
        } else {
            None
        }
    }
}
