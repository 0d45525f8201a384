// src/node/inspect.rs
use super::{Node, NodeKind};
use crate::autograd::graph::reachable_nodes;
use crate::value::GradValue;
use backprop_expr::Expr;

impl<V: GradValue> Node<V> {
    /// Every distinct node reachable from this one, this node first, operands left to right.
    pub fn nodes(&self) -> Vec<Node<V>> {
        reachable_nodes(self)
    }

    /// The symbol node named `name` below this node, if any.
    ///
    /// In a compiled graph each name has a single node.
    pub fn find_symbol(&self, name: &str) -> Option<Node<V>> {
        self.nodes()
            .into_iter()
            .find(|node| node.symbol_name().as_deref() == Some(name))
    }

    /// Consumer count of every reachable node, in [`nodes`](Node::nodes) order.
    pub fn consumer_counts(&self) -> Vec<usize> {
        self.nodes().iter().map(Node::consumer_count).collect()
    }

    /// Rebuilds an expression equivalent to the graph below this node.
    ///
    /// Shared nodes are expanded once per use, so `x * x` gives back `x * x`. The walk
    /// uses an explicit stack; printing or simplifying the result still recurses once
    /// per nesting level.
    pub fn to_expr(&self) -> Expr {
        // Every node is assembled after its operands, so the stack never runs short.
        self.assemble_expr()
            .unwrap_or_else(|| Expr::symbol(self.label()))
    }

    fn assemble_expr(&self) -> Option<Expr> {
        // (node, operands already expanded)
        let mut steps = vec![(self.clone(), false)];
        let mut built: Vec<Expr> = Vec::new();

        while let Some((node, expanded)) = steps.pop() {
            let data = node.borrow_data();
            match (&data.kind, expanded) {
                (NodeKind::Constant(value), _) => built.push(Expr::Constant(*value)),
                (NodeKind::Symbol { name, .. }, _) => built.push(Expr::symbol(name.as_str())),
                (NodeKind::Unary { operand, .. }, false) => {
                    steps.push((node.clone(), true));
                    steps.push((operand.clone(), false));
                }
                (NodeKind::Binary { lhs, rhs, .. }, false) => {
                    steps.push((node.clone(), true));
                    steps.push((rhs.clone(), false));
                    steps.push((lhs.clone(), false));
                }
                (NodeKind::Unary { op, .. }, true) => {
                    let operand = built.pop()?;
                    built.push(Expr::function(op.name(), vec![operand]));
                }
                (NodeKind::Binary { op, .. }, true) => {
                    let rhs = built.pop()?;
                    let lhs = built.pop()?;
                    built.push(Expr::binary(op.to_expr_op(), lhs, rhs));
                }
            }
        }
        built.pop()
    }

    /// `true` if both graphs have the same shape, operations, literals and symbol names,
    /// and share operands in the same places. Node identity is not compared.
    pub fn structurally_eq(&self, other: &Node<V>) -> bool {
        let ours = self.nodes();
        let theirs = other.nodes();
        if ours.len() != theirs.len() {
            return false;
        }
        // Both lists are in the same deterministic preorder, so shared operands line up
        // by position when the structures match.
        let position = |list: &[Node<V>], node: &Node<V>| list.iter().position(|n| n.ptr_eq(node));
        ours.iter().zip(theirs.iter()).all(|(a, b)| {
            if a.label() != b.label() || a.consumer_count() != b.consumer_count() {
                return false;
            }
            let (a_ops, b_ops) = (a.operands(), b.operands());
            a_ops.len() == b_ops.len()
                && a_ops
                    .iter()
                    .zip(b_ops.iter())
                    .all(|(x, y)| position(&ours, x) == position(&theirs, y))
        })
    }
}
