// src/compiler.rs
//! Turns a parsed [`Expr`] into a node graph.
//!
//! Each variable name becomes exactly one symbol node, however often it appears, so its
//! consumer count equals the number of places it is used. The interning table lives in a
//! [`Compiler`] and is dropped once compilation is over.

use crate::context::EvaluationContext;
use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{BinaryOperation, UnaryOperation};
use crate::value::GradValue;
use backprop_expr::{BinaryOp, Expr};
use log::debug;
use std::collections::HashMap;
use std::rc::Rc;

/// Interns symbol nodes by name for the duration of one compilation.
pub struct SymbolTable<V: GradValue> {
    symbols: HashMap<String, Node<V>>,
}

impl<V: GradValue> Default for SymbolTable<V> {
    fn default() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }
}

impl<V: GradValue> SymbolTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `name`, creating it on first use.
    pub fn intern(&mut self, name: &str, context: &Rc<EvaluationContext>) -> Node<V> {
        self.symbols
            .entry(name.to_string())
            .or_insert_with(|| Node::symbol(name, context))
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<&Node<V>> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One compilation: the shared evaluation context plus the symbol table.
pub struct Compiler<V: GradValue> {
    context: Rc<EvaluationContext>,
    symbols: SymbolTable<V>,
}

impl<V: GradValue> Compiler<V> {
    pub fn new(context: EvaluationContext) -> Self {
        Compiler {
            context: Rc::new(context),
            symbols: SymbolTable::new(),
        }
    }

    /// Compiles `expr`, consuming the compiler.
    ///
    /// The whole expression is validated before the first node is built, so an
    /// unsupported construct anywhere yields `UnsupportedExpression` and no graph.
    /// Unbound symbols are not an error here; they surface on evaluation.
    pub fn compile(mut self, expr: &Expr) -> Result<Node<V>, BackpropError> {
        validate(expr)?;
        let root = self.build(expr)?;
        debug!(
            "compiled {} expression nodes into {} graph nodes ({} symbols)",
            expr.node_count(),
            root.nodes().len(),
            self.symbols.len()
        );
        Ok(root)
    }

    /// Post-order walk with an explicit stack: operands are built (left first) before
    /// the node consuming them.
    fn build(&mut self, expr: &Expr) -> Result<Node<V>, BackpropError> {
        let mut steps = vec![Step::Visit(expr)];
        let mut built: Vec<Node<V>> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(current) => match current {
                    Expr::Constant(value) => built.push(Node::constant(*value)),
                    Expr::Symbol(name) => built.push(self.symbols.intern(name, &self.context)),
                    Expr::Parenthesis(inner) => steps.push(Step::Visit(inner)),
                    Expr::Negate(inner) => {
                        let value = negated_literal(inner).ok_or_else(|| {
                            unsupported(current, "unary minus is only supported on literals")
                        })?;
                        built.push(Node::constant(value));
                    }
                    Expr::Binary { lhs, rhs, .. } => {
                        steps.push(Step::Assemble(current));
                        steps.push(Step::Visit(rhs));
                        steps.push(Step::Visit(lhs));
                    }
                    Expr::Function { args, .. } => {
                        steps.push(Step::Assemble(current));
                        steps.extend(args.iter().rev().map(Step::Visit));
                    }
                },
                Step::Assemble(current) => {
                    let node = match current {
                        Expr::Binary { op, .. } => {
                            let operation = BinaryOperation::from_expr_op(*op)
                                .ok_or_else(|| unsupported(current, "operator has no graph node"))?;
                            let rhs = pop_operand(&mut built)?;
                            let lhs = pop_operand(&mut built)?;
                            Node::binary(operation, &lhs, &rhs)
                        }
                        Expr::Function { name, args } => {
                            let operation = UnaryOperation::from_function_name(name)
                                .ok_or_else(|| unsupported(current, "unknown function"))?;
                            if args.len() != 1 {
                                return Err(unsupported(current, "expected exactly one argument"));
                            }
                            Node::unary(operation, &pop_operand(&mut built)?)
                        }
                        _ => {
                            return Err(BackpropError::InternalError(format!(
                                "leaf '{}' scheduled for assembly",
                                current
                            )))
                        }
                    };
                    built.push(node);
                }
            }
        }

        let root = pop_operand(&mut built)?;
        if !built.is_empty() {
            return Err(BackpropError::InternalError(format!(
                "{} node(s) left over after compilation",
                built.len()
            )));
        }
        Ok(root)
    }
}

enum Step<'a> {
    /// Build the operands of this expression (or the leaf itself).
    Visit(&'a Expr),
    /// Operands are on the stack; build the node consuming them.
    Assemble(&'a Expr),
}

fn pop_operand<V: GradValue>(built: &mut Vec<Node<V>>) -> Result<Node<V>, BackpropError> {
    built
        .pop()
        .ok_or_else(|| BackpropError::InternalError("operand stack underflow".to_string()))
}

/// `-c` for a (possibly parenthesized) literal `c`.
fn negated_literal(inner: &Expr) -> Option<f64> {
    inner.as_constant().map(|value| -value)
}

/// Rejects anything the graph cannot represent, without building nodes.
fn validate(expr: &Expr) -> Result<(), BackpropError> {
    let mut pending = vec![expr];
    while let Some(current) = pending.pop() {
        match current {
            Expr::Constant(_) | Expr::Symbol(_) => {}
            Expr::Parenthesis(inner) => pending.push(inner),
            Expr::Negate(inner) => {
                if negated_literal(inner).is_none() {
                    return Err(unsupported(
                        current,
                        "unary minus is only supported on literals",
                    ));
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                if *op == BinaryOp::Pow {
                    return Err(unsupported(current, "operator has no graph node"));
                }
                pending.push(rhs);
                pending.push(lhs);
            }
            Expr::Function { name, args } => {
                if UnaryOperation::from_function_name(name).is_none() {
                    return Err(unsupported(current, "unknown function"));
                }
                if args.len() != 1 {
                    return Err(unsupported(current, "expected exactly one argument"));
                }
                pending.extend(args.iter());
            }
        }
    }
    Ok(())
}

fn unsupported(expr: &Expr, reason: &str) -> BackpropError {
    BackpropError::UnsupportedExpression(format!("{}: '{}'", reason, expr))
}

/// Compiles `expr` into a numeric graph evaluated against `context`.
pub fn compile(expr: &Expr, context: EvaluationContext) -> Result<Node<f64>, BackpropError> {
    Compiler::new(context).compile(expr)
}

/// Compiles `expr` into a symbolic graph: values and derivatives are expressions.
pub fn compile_symbolic(expr: &Expr) -> Result<Node<Expr>, BackpropError> {
    Compiler::new(EvaluationContext::new()).compile(expr)
}

/// Parses and compiles `text` into a numeric graph.
pub fn compile_str(text: &str, context: EvaluationContext) -> Result<Node<f64>, BackpropError> {
    let expr = Expr::parse(text)?;
    let compiled = compile(&expr, context);
    expr.dismantle();
    compiled
}

/// Parses and compiles `text` into a symbolic graph.
pub fn compile_symbolic_str(text: &str) -> Result<Node<Expr>, BackpropError> {
    let expr = Expr::parse(text)?;
    let compiled = compile_symbolic(&expr);
    expr.dismantle();
    compiled
}

// --- Tests ---
#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
