// src/autograd/graph.rs
use crate::node::{Node, NodeId};
use crate::value::GradValue;
use std::collections::HashSet;

/// Topological order of the graph below `root`: every node appears after all of its
/// operands, each node exactly once, `root` last.
///
/// Walks with an explicit stack, so arbitrarily deep graphs are fine. Nodes are identified
/// by [`NodeId`] (the address of their shared data).
pub(crate) fn topological_order<V: GradValue>(root: &Node<V>) -> Vec<Node<V>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted_list = Vec::new();
    // (node, operands already pushed)
    let mut stack = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted_list.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        let operands = node.operands();
        stack.push((node, true));
        for operand in operands.into_iter().rev() {
            if !visited.contains(&operand.id()) {
                stack.push((operand, false));
            }
        }
    }
    sorted_list
}

/// Every node reachable from `root`, root first, operands left to right, no duplicates.
pub(crate) fn reachable_nodes<V: GradValue>(root: &Node<V>) -> Vec<Node<V>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut nodes = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }
        for operand in node.operands().into_iter().rev() {
            stack.push(operand);
        }
        nodes.push(node);
    }
    nodes
}
