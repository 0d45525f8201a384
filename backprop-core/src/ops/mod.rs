// src/ops/mod.rs
//! # Operation rules (`ops`)
//!
//! Every operation node of the graph is one of a closed set of operations. This module is
//! the single rule table for them: for each operation it defines
//!
//! - the **forward rule**, computing the node's value from its operands' values, and
//! - the **local partial** with respect to each operand, evaluated at those same values.
//!
//! Rules are generic over [`GradValue`](crate::value::GradValue), so the same table serves
//! numeric graphs (`f64`) and symbolic graphs (`Expr`), where the rules build the partial
//! derivative as an expression instead of computing it.
//!
//! - [`arithmetic`]: binary operators (plus, minus, multiply, divide).
//! - [`activation`]: unary functions (exp, sigmoid).

pub mod activation;
pub mod arithmetic;

pub use activation::UnaryOperation;
pub use arithmetic::BinaryOperation;
