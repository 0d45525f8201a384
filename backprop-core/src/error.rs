// src/error.rs
use backprop_expr::ParseError;
use thiserror::Error;

/// Custom error type for the backprop engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum BackpropError {
    #[error("Symbol '{name}' is not bound in the evaluation context")]
    UnboundSymbol { name: String },

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("Failed to parse expression: {0}")]
    Parse(#[from] ParseError),

    #[error("Backward pass already ran on this graph; compile a fresh graph for every pass")]
    AlreadyPropagated,

    #[error("Backward pass must start at a root node, but this node has {consumer_count} consumer(s)")]
    NotARoot { consumer_count: usize },

    #[error("Node received {received} derivative contributions but has only {expected} consumer(s)")]
    ExcessContribution { expected: usize, received: usize },

    #[error("Backward pass left node '{label}' unfinished: {accumulated} of {expected} contribution(s) arrived; some of its consumers are not reachable from the root")]
    IncompleteBackward {
        label: String,
        accumulated: usize,
        expected: usize,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}
