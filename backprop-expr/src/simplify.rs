// src/simplify.rs
//! Algebraic simplification of expressions.
//!
//! Symbolic differentiation builds derivative expressions mechanically, so they are full of
//! `0 + ...`, `... * 1` and constant sub-trees. [`simplify`] rewrites an expression bottom-up
//! with a small set of local rules, repeating whole passes until nothing changes:
//!
//! - constant folding of operators and known functions (`exp`, `sigma`),
//! - additive and multiplicative identities (`0 + e`, `e * 1`, `e / 1`, `e ^ 1`, ...),
//! - absorbing zeros (`0 * e`, `0 / e`) and cancelling (`e - e`, `e / e`),
//! - sign normalisation (`--e`, `e + -f`, `-a * b`),
//! - constants moved to the left of products and merged (`2 * (3 * x)` to `6 * x`),
//! - like terms (`e + e` to `2 * e`, `e * e` to `e ^ 2`).
//!
//! Grouping parentheses carry no meaning once a tree is built and are always removed.

use crate::ast::{BinaryOp, Expr};
use crate::eval::apply_binary;
use crate::functions::evaluate_function;
use log::trace;

const MAX_PASSES: usize = 32;

/// Returns a reduced expression equivalent to `expr`.
pub fn simplify(expr: &Expr) -> Expr {
    let mut current = strip_groupings(expr);
    for pass in 0..MAX_PASSES {
        let next = simplify_pass(&current);
        if next == current {
            trace!("simplify reached a fixed point after {} pass(es)", pass + 1);
            return next;
        }
        current = next;
    }
    current
}

/// Removes every [`Expr::Parenthesis`] node, leaving the tree otherwise untouched.
pub fn strip_groupings(expr: &Expr) -> Expr {
    match expr {
        Expr::Constant(_) | Expr::Symbol(_) => expr.clone(),
        Expr::Parenthesis(inner) => strip_groupings(inner),
        Expr::Negate(inner) => Expr::Negate(Box::new(strip_groupings(inner))),
        Expr::Binary { op, lhs, rhs } => {
            Expr::binary(*op, strip_groupings(lhs), strip_groupings(rhs))
        }
        Expr::Function { name, args } => {
            Expr::function(name.clone(), args.iter().map(strip_groupings).collect())
        }
    }
}

fn simplify_pass(expr: &Expr) -> Expr {
    match expr {
        Expr::Constant(_) | Expr::Symbol(_) => expr.clone(),
        Expr::Parenthesis(inner) => simplify_pass(inner),
        Expr::Negate(inner) => negate(simplify_pass(inner)),
        Expr::Binary { op, lhs, rhs } => {
            simplify_binary(*op, simplify_pass(lhs), simplify_pass(rhs))
        }
        Expr::Function { name, args } => {
            simplify_function(name, args.iter().map(simplify_pass).collect())
        }
    }
}

/// Folds a computed value into a constant, refusing NaN and infinities.
fn fold(value: f64) -> Option<Expr> {
    // `+ 0.0` turns -0 into 0
    value.is_finite().then(|| Expr::Constant(value + 0.0))
}

fn negate(inner: Expr) -> Expr {
    match inner {
        Expr::Constant(value) => Expr::Constant(-value + 0.0),
        Expr::Negate(e) => *e,
        other => Expr::Negate(Box::new(other)),
    }
}

fn simplify_binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_constant(), rhs.as_constant()) {
        let division_by_zero = op == BinaryOp::Div && b == 0.0;
        if !division_by_zero {
            if let Some(folded) = fold(apply_binary(op, a, b)) {
                return folded;
            }
        }
    }
    match op {
        BinaryOp::Add => simplify_add(lhs, rhs),
        BinaryOp::Sub => simplify_sub(lhs, rhs),
        BinaryOp::Mul => simplify_mul(lhs, rhs),
        BinaryOp::Div => simplify_div(lhs, rhs),
        BinaryOp::Pow => simplify_pow(lhs, rhs),
    }
}

fn simplify_add(lhs: Expr, rhs: Expr) -> Expr {
    if is_zero(&lhs) {
        return rhs;
    }
    if is_zero(&rhs) {
        return lhs;
    }
    if lhs == rhs {
        return Expr::constant(2.0) * lhs;
    }
    match (lhs, rhs) {
        (lhs, Expr::Negate(e)) => lhs - *e,
        (lhs, Expr::Constant(c)) if c < 0.0 => lhs - Expr::Constant(-c),
        (Expr::Negate(e), rhs) => rhs - *e,
        (lhs, rhs) => lhs + rhs,
    }
}

fn simplify_sub(lhs: Expr, rhs: Expr) -> Expr {
    if is_zero(&rhs) {
        return lhs;
    }
    if is_zero(&lhs) {
        return negate(rhs);
    }
    if lhs == rhs {
        return Expr::constant(0.0);
    }
    match (lhs, rhs) {
        (lhs, Expr::Negate(e)) => lhs + *e,
        (lhs, Expr::Constant(c)) if c < 0.0 => lhs + Expr::Constant(-c),
        (lhs, rhs) => lhs - rhs,
    }
}

fn simplify_mul(lhs: Expr, rhs: Expr) -> Expr {
    if is_zero(&lhs) || is_zero(&rhs) {
        return Expr::constant(0.0);
    }
    if is_one(&lhs) {
        return rhs;
    }
    if is_one(&rhs) {
        return lhs;
    }
    if lhs.as_constant() == Some(-1.0) {
        return negate(rhs);
    }
    if rhs.as_constant() == Some(-1.0) {
        return negate(lhs);
    }
    if lhs == rhs {
        return lhs.pow(Expr::constant(2.0));
    }
    match (lhs, rhs) {
        (Expr::Negate(a), rhs) => negate(*a * rhs),
        (lhs, Expr::Negate(b)) => negate(lhs * *b),
        (lhs, rhs @ Expr::Constant(_)) if lhs.as_constant().is_none() => rhs * lhs,
        (
            Expr::Constant(c1),
            Expr::Binary {
                op: BinaryOp::Mul,
                lhs,
                rhs,
            },
        ) => match lhs.as_constant() {
            Some(c2) => Expr::Constant(c1 * c2) * *rhs,
            None => Expr::Constant(c1) * Expr::binary(BinaryOp::Mul, *lhs, *rhs),
        },
        (lhs, rhs) => lhs * rhs,
    }
}

fn simplify_div(lhs: Expr, rhs: Expr) -> Expr {
    let rhs_is_zero = is_zero(&rhs);
    if is_zero(&lhs) && !rhs_is_zero {
        return Expr::constant(0.0);
    }
    if is_one(&rhs) {
        return lhs;
    }
    if rhs.as_constant() == Some(-1.0) {
        return negate(lhs);
    }
    if lhs == rhs && !rhs_is_zero {
        return Expr::constant(1.0);
    }
    match (lhs, rhs) {
        (Expr::Negate(a), rhs) => negate(*a / rhs),
        (lhs, Expr::Negate(b)) => negate(lhs / *b),
        (lhs, rhs) => lhs / rhs,
    }
}

fn simplify_pow(base: Expr, exponent: Expr) -> Expr {
    if is_zero(&exponent) || is_one(&base) {
        return Expr::constant(1.0);
    }
    if is_one(&exponent) {
        return base;
    }
    base.pow(exponent)
}

fn simplify_function(name: &str, args: Vec<Expr>) -> Expr {
    let constants: Option<Vec<f64>> = args.iter().map(Expr::as_constant).collect();
    if let Some(values) = constants {
        if let Some(folded) = evaluate_function(name, &values).and_then(fold) {
            return folded;
        }
    }
    Expr::function(name, args)
}

fn is_zero(expr: &Expr) -> bool {
    expr.as_constant() == Some(0.0)
}

fn is_one(expr: &Expr) -> bool {
    expr.as_constant() == Some(1.0)
}

#[cfg(test)]
#[path = "simplify_test.rs"]
mod tests;
