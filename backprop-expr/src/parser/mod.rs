// src/parser/mod.rs
//! Parser for arithmetic expressions, generated by pest from `grammar.pest`.
//!
//! Parentheses written in the source are kept as [`Expr::Parenthesis`] nodes. Sums and
//! products are folded left to right over the flat pair lists pest produces, so a long
//! chain `a + b + ... + z` costs no stack per term.

use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;
use log::trace;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct ExprParser;

/// Parses `text` into an [`Expr`].
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut pairs =
        ExprParser::parse(Rule::expression, text).map_err(ParseError::from_pest_error)?;
    let expression = required(pairs.next(), "expression")?;
    // expression = SOI ~ expr ~ EOI; SOI is implicit
    let expr = parse_expr(required(expression.into_inner().next(), "expr")?)?;
    trace!("parsed '{}' into {} node(s)", text, expr.node_count());
    Ok(expr)
}

/// Unwraps a pair the grammar guarantees to be present.
fn required<'i>(pair: Option<Pair<'i, Rule>>, what: &str) -> Result<Pair<'i, Rule>, ParseError> {
    pair.ok_or_else(|| malformed(what))
}

fn malformed(what: &str) -> ParseError {
    ParseError::Syntax {
        line: 0,
        column: 0,
        message: format!("Malformed parse tree: missing {}", what),
    }
}

fn unexpected(pair: &Pair<Rule>) -> ParseError {
    let (line, column) = pair.line_col();
    ParseError::Syntax {
        line,
        column,
        message: format!("Unexpected {:?} '{}'", pair.as_rule(), pair.as_str()),
    }
}

fn binary_op(pair: &Pair<Rule>) -> Result<BinaryOp, ParseError> {
    pair.as_str()
        .chars()
        .next()
        .and_then(BinaryOp::from_symbol)
        .ok_or_else(|| unexpected(pair))
}

/// Left fold of `operand (op operand)*`.
fn fold_left<F>(pair: Pair<Rule>, mut operand: F) -> Result<Expr, ParseError>
where
    F: FnMut(Pair<Rule>) -> Result<Expr, ParseError>,
{
    let mut inner = pair.into_inner();
    let mut result = operand(required(inner.next(), "operand")?)?;
    while let Some(op_pair) = inner.next() {
        let op = binary_op(&op_pair)?;
        let rhs = operand(required(inner.next(), "operand")?)?;
        result = Expr::binary(op, result, rhs);
    }
    Ok(result)
}

fn parse_expr(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    fold_left(pair, parse_term)
}

fn parse_term(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    fold_left(pair, parse_unary)
}

fn parse_unary(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut negations = 0usize;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::unary_op => {
                if inner.as_str() == "-" {
                    negations += 1;
                }
            }
            Rule::power => {
                let mut expr = parse_power(inner)?;
                for _ in 0..negations {
                    expr = Expr::Negate(Box::new(expr));
                }
                return Ok(expr);
            }
            _ => return Err(unexpected(&inner)),
        }
    }
    Err(malformed("power"))
}

fn parse_power(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut inner = pair.into_inner();
    let base = parse_primary(required(inner.next(), "primary")?)?;
    match inner.next() {
        // pow_op, then the exponent
        Some(_) => Ok(base.pow(parse_unary(required(inner.next(), "exponent")?)?)),
        None => Ok(base),
    }
}

fn parse_primary(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let inner = required(pair.into_inner().next(), "primary")?;
    match inner.as_rule() {
        Rule::number => {
            let literal = inner.as_str();
            literal.parse::<f64>().map(Expr::Constant).map_err(|_| {
                let (line, column) = inner.line_col();
                ParseError::InvalidNumber {
                    literal: literal.to_string(),
                    line,
                    column,
                }
            })
        }
        Rule::identifier => Ok(Expr::symbol(inner.as_str())),
        Rule::function_call => {
            let mut parts = inner.into_inner();
            let name = required(parts.next(), "function name")?.as_str().to_string();
            let args = match parts.next() {
                Some(arg_list) => arg_list
                    .into_inner()
                    .map(parse_expr)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Ok(Expr::Function { name, args })
        }
        Rule::group => {
            let content = parse_expr(required(inner.into_inner().next(), "group content")?)?;
            Ok(Expr::Parenthesis(Box::new(content)))
        }
        _ => Err(unexpected(&inner)),
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
