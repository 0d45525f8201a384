// src/lib.rs
//! Expression trees for the backprop engine.
//!
//! This crate provides the two collaborators the autodiff core relies on:
//!
//! - a parser turning arithmetic text such as `x * y + exp(z)` into an [`Expr`] tree,
//! - [`simplify`], which reduces symbolic derivative expressions built by the core.
//!
//! [`Expr`] is also the value type of the symbolic differentiation mode, so it implements
//! the usual arithmetic operators by *building* new nodes instead of computing anything.

pub mod ast;
mod display;
pub mod error;
pub mod eval;
pub mod functions;
pub mod parser;
pub mod simplify;

pub use ast::{BinaryOp, Expr};
pub use error::{EvalError, ParseError};
pub use functions::sigmoid;
pub use parser::parse;
pub use simplify::simplify;
