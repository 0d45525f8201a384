// src/value.rs
use crate::context::EvaluationContext;
use crate::error::BackpropError;
use backprop_expr::{simplify, Expr};
use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The domain a graph computes in: plain numbers or symbolic expressions.
///
/// Forward values, local partials and derivatives are all `GradValue`s, so the numeric
/// and symbolic engines share one accumulation protocol and differ only in what the
/// arithmetic operators do. For `f64` they compute; for [`Expr`] they build new
/// expression nodes and leave the reduction to [`finalize`](GradValue::finalize).
pub trait GradValue:
    Clone
    + Debug
    + Display
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Value of a literal leaf.
    fn constant(value: f64) -> Self;

    /// Value of a symbol leaf.
    fn symbol(name: &str, context: &EvaluationContext) -> Result<Self, BackpropError>;

    fn exp(&self) -> Self;

    /// Logistic sigmoid \( 1 / (1 + e^{-x}) \).
    fn sigmoid(&self) -> Self;

    fn square(&self) -> Self;

    /// Called once per node, when its derivative has received every contribution.
    fn finalize(self) -> Self {
        self
    }
}

impl GradValue for f64 {
    fn constant(value: f64) -> Self {
        value
    }

    fn symbol(name: &str, context: &EvaluationContext) -> Result<Self, BackpropError> {
        context.get(name).ok_or_else(|| BackpropError::UnboundSymbol {
            name: name.to_string(),
        })
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn sigmoid(&self) -> Self {
        backprop_expr::sigmoid(*self)
    }

    fn square(&self) -> Self {
        self * self
    }
}

impl GradValue for Expr {
    fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    /// Symbols stay symbolic; the context is not consulted.
    fn symbol(name: &str, _context: &EvaluationContext) -> Result<Self, BackpropError> {
        Ok(Expr::symbol(name))
    }

    fn exp(&self) -> Self {
        self.clone().exp()
    }

    fn sigmoid(&self) -> Self {
        self.clone().sigmoid()
    }

    fn square(&self) -> Self {
        self.clone().pow(Expr::Constant(2.0))
    }

    fn finalize(self) -> Self {
        simplify(&self)
    }
}
