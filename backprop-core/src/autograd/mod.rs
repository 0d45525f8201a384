// src/autograd/mod.rs
//! Backward pass machinery: the driver, graph traversals and gradient checking.

pub mod backward;
pub mod grad_check;
pub(crate) mod graph;

pub use backward::{BackpropOptions, Traversal};
pub use grad_check::{check_grad, GradCheckError};
