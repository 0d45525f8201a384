// src/ops/arithmetic.rs

use crate::value::GradValue;
use backprop_expr::BinaryOp;

/// Binary arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOperation {
    /// Forward rule: the value of `a op b`.
    pub fn forward<V: GradValue>(self, a: &V, b: &V) -> V {
        match self {
            BinaryOperation::Plus => a.clone() + b.clone(),
            BinaryOperation::Minus => a.clone() - b.clone(),
            BinaryOperation::Multiply => a.clone() * b.clone(),
            BinaryOperation::Divide => a.clone() / b.clone(),
        }
    }

    /// Local partials `(d(a op b)/da, d(a op b)/db)` evaluated at the operand values.
    ///
    /// | op       | d/da  | d/db     |
    /// |----------|-------|----------|
    /// | Plus     | 1     | 1        |
    /// | Minus    | 1     | -1       |
    /// | Multiply | b     | a        |
    /// | Divide   | 1 / b | -a / b^2 |
    pub fn partials<V: GradValue>(self, a: &V, b: &V) -> (V, V) {
        match self {
            BinaryOperation::Plus => (V::one(), V::one()),
            BinaryOperation::Minus => (V::one(), -V::one()),
            BinaryOperation::Multiply => (b.clone(), a.clone()),
            BinaryOperation::Divide => (V::one() / b.clone(), -(a.clone() / b.square())),
        }
    }

    pub fn symbol(self) -> char {
        self.to_expr_op().symbol()
    }

    /// Maps a parsed operator onto a graph operation. `^` has no graph counterpart.
    pub fn from_expr_op(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Add => Some(BinaryOperation::Plus),
            BinaryOp::Sub => Some(BinaryOperation::Minus),
            BinaryOp::Mul => Some(BinaryOperation::Multiply),
            BinaryOp::Div => Some(BinaryOperation::Divide),
            BinaryOp::Pow => None,
        }
    }

    pub fn to_expr_op(self) -> BinaryOp {
        match self {
            BinaryOperation::Plus => BinaryOp::Add,
            BinaryOperation::Minus => BinaryOp::Sub,
            BinaryOperation::Multiply => BinaryOp::Mul,
            BinaryOperation::Divide => BinaryOp::Div,
        }
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
