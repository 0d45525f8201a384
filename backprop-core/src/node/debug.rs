// src/node/debug.rs
use super::{label_of, Node, NodeKind};
use crate::value::GradValue;
use std::fmt;

fn operand_count<V: GradValue>(kind: &NodeKind<V>) -> usize {
    match kind {
        NodeKind::Constant(_) | NodeKind::Symbol { .. } => 0,
        NodeKind::Unary { .. } => 1,
        NodeKind::Binary { .. } => 2,
    }
}

// Manual implementation of Debug: describes this node only, never the whole graph.
impl<V: GradValue> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_borrow() {
            Ok(guard) => write!(
                f,
                "Node(label={}, operands={}, consumers={}, accumulated={}, state={:?}, derivative={}, value={:?})",
                label_of(&guard.kind),
                operand_count(&guard.kind),
                guard.consumer_count,
                guard.accumulated,
                guard.state,
                guard.derivative,
                guard.value
            ),
            Err(_) => write!(f, "Node(<mutably borrowed>)"),
        }
    }
}

/// Writes the expression this node computes, e.g. `x * y + y * z`.
impl<V: GradValue> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}
