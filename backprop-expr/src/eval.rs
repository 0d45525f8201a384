// src/eval.rs
use crate::ast::{BinaryOp, Expr};
use crate::error::EvalError;
use crate::functions::evaluate_function;

impl Expr {
    /// Evaluates the expression numerically, resolving symbols through `lookup`.
    ///
    /// Used to check symbolic derivatives against their numeric counterparts.
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.evaluate_with(&lookup)
    }

    fn evaluate_with<F>(&self, lookup: &F) -> Result<f64, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Symbol(name) => lookup(name).ok_or_else(|| EvalError::UnboundSymbol {
                name: name.clone(),
            }),
            Expr::Parenthesis(inner) => inner.evaluate_with(lookup),
            Expr::Negate(inner) => Ok(-inner.evaluate_with(lookup)?),
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.evaluate_with(lookup)?;
                let b = rhs.evaluate_with(lookup)?;
                Ok(apply_binary(*op, a, b))
            }
            Expr::Function { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate_with(lookup))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                evaluate_function(name, &values).ok_or_else(|| EvalError::UnknownFunction {
                    name: name.clone(),
                    arity: values.len(),
                })
            }
        }
    }
}

/// Applies a binary operator to two numbers.
pub fn apply_binary(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
    }
}
