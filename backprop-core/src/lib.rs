// src/lib.rs
//! # backprop-core
//!
//! A scalar reverse-mode automatic differentiation engine.
//!
//! An expression is compiled into a DAG of [`Node`]s (constants, symbols, arithmetic and
//! unary functions). Calling [`Node::back_propagate`] on the root pushes a seed derivative
//! backward; a node with several consumers waits until each of them has contributed before
//! propagating to its own operands, so every node ends up holding the derivative of the
//! root with respect to itself.
//!
//! Graphs are generic over their value domain ([`GradValue`]): `f64` for numeric
//! derivatives, [`Expr`](backprop_expr::Expr) for symbolic ones.
//!
//! ```
//! use backprop_core::{compile_str, EvaluationContext};
//!
//! let context = EvaluationContext::new().with("x", 5.0).with("y", 7.0).with("z", 13.0);
//! let root = compile_str("x * y + y * z", context)?;
//! root.back_propagate()?;
//! assert_eq!(root.find_symbol("y").and_then(|y| y.derivative()), Some(18.0));
//! # Ok::<(), backprop_core::BackpropError>(())
//! ```

pub mod autograd;
pub mod compiler;
pub mod context;
pub mod error;
pub mod node;
pub mod ops;
pub mod utils;
pub mod value;

pub use autograd::{BackpropOptions, Traversal};
pub use compiler::{compile, compile_str, compile_symbolic, compile_symbolic_str, Compiler};
pub use context::EvaluationContext;
pub use error::BackpropError;
pub use node::{DerivativeState, Node, NodeId};
pub use value::GradValue;

// Re-export the expression crate so callers need a single dependency.
pub use backprop_expr;
