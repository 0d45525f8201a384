// src/error.rs
use thiserror::Error;

/// Errors raised while turning text into an [`Expr`](crate::Expr).
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseError {
    /// The text does not match the expression grammar.
    #[error("Parse error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid number literal '{literal}' at line {line}, column {column}")]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
    },

    #[error("Cannot parse an empty expression")]
    EmptyInput,
}

impl ParseError {
    /// Convert a pest error into a `ParseError::Syntax`.
    pub(crate) fn from_pest_error(err: pest::error::Error<crate::parser::Rule>) -> Self {
        let (line, column) = match err.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c),
            pest::error::LineColLocation::Span((l, c), _) => (l, c),
        };
        ParseError::Syntax {
            line,
            column,
            message: err.variant.message().to_string(),
        }
    }
}

/// Errors raised by direct numeric evaluation of an [`Expr`](crate::Expr).
#[derive(Error, Debug, PartialEq, Clone)]
pub enum EvalError {
    #[error("Symbol '{name}' is not bound")]
    UnboundSymbol { name: String },

    #[error("Unknown function '{name}' called with {arity} argument(s)")]
    UnknownFunction { name: String, arity: usize },
}
