// src/node/mod.rs

use crate::context::EvaluationContext;
use crate::ops::{BinaryOperation, UnaryOperation};
use crate::value::GradValue;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

// --- Implementation modules ---
mod autograd_methods;
mod debug;
mod inspect;

/// Stable identity of a node, derived from the address of its shared data.
///
/// Two handles compare equal exactly when they point at the same node, which is what the
/// symbol interning and the graph traversals rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Whether a node's derivative may be read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeState {
    /// Still waiting for contributions from some consumers.
    Pending,
    /// Every consumer has contributed (or the node was seeded as the root).
    Final,
}

/// What a node computes. The set is closed; rules live in [`crate::ops`].
pub(crate) enum NodeKind<V: GradValue> {
    Constant(f64),
    Symbol {
        name: String,
        context: Rc<EvaluationContext>,
    },
    Unary {
        op: UnaryOperation,
        operand: Node<V>,
    },
    Binary {
        op: BinaryOperation,
        lhs: Node<V>,
        rhs: Node<V>,
    },
}

/// Internal state of a node.
///
/// Wrapped in `Rc<RefCell<NodeData>>` by [`Node`] so that shared operands (a symbol used
/// twice, a reused sub-expression) are one object with several consumers.
pub(crate) struct NodeData<V: GradValue> {
    pub(crate) kind: NodeKind<V>,
    /// Number of nodes using this one as an operand. Fixed once the graph is built.
    pub(crate) consumer_count: usize,
    /// Contributions received so far during the backward pass.
    pub(crate) accumulated: usize,
    /// Running sum of contributions; final once `state` is `Final`.
    pub(crate) derivative: V,
    pub(crate) state: DerivativeState,
    /// Forward value, filled at most once.
    pub(crate) value: Option<V>,
}

impl<V: GradValue> NodeData<V> {
    /// Detaches the operands, leaving the node as an inert constant.
    fn take_operands(&mut self) -> Vec<Node<V>> {
        match std::mem::replace(&mut self.kind, NodeKind::Constant(0.0)) {
            NodeKind::Unary { operand, .. } => vec![operand],
            NodeKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            NodeKind::Constant(_) | NodeKind::Symbol { .. } => Vec::new(),
        }
    }
}

// Operands are released with an explicit work list so that dropping a very deep graph
// does not recurse once per level.
impl<V: GradValue> Drop for NodeData<V> {
    fn drop(&mut self) {
        let mut pending = self.take_operands();
        while let Some(node) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(node.data) {
                pending.extend(cell.into_inner().take_operands());
            }
        }
    }
}

/// A handle to one node of an expression DAG.
///
/// Cloning a `Node` is cheap and yields another handle to the *same* node. A node owns its
/// operands; the graph lives as long as a handle to its root (or to any sub-graph) does.
///
/// Numeric graphs are `Node<f64>`, symbolic graphs are `Node<Expr>`.
pub struct Node<V: GradValue> {
    pub(crate) data: Rc<RefCell<NodeData<V>>>,
}

impl<V: GradValue> Clone for Node<V> {
    fn clone(&self) -> Self {
        Node {
            data: Rc::clone(&self.data),
        }
    }
}

impl<V: GradValue> Node<V> {
    fn from_kind(kind: NodeKind<V>) -> Self {
        Node {
            data: Rc::new(RefCell::new(NodeData {
                kind,
                consumer_count: 0,
                accumulated: 0,
                derivative: V::zero(),
                state: DerivativeState::Pending,
                value: None,
            })),
        }
    }

    /// A literal leaf.
    pub fn constant(value: f64) -> Self {
        Self::from_kind(NodeKind::Constant(value))
    }

    /// A variable leaf resolved through `context` on evaluation.
    ///
    /// Building two symbol nodes with the same name yields two independent nodes; the
    /// [compiler](crate::compiler) interns names so each variable becomes one shared node.
    pub fn symbol(name: impl Into<String>, context: &Rc<EvaluationContext>) -> Self {
        Self::from_kind(NodeKind::Symbol {
            name: name.into(),
            context: Rc::clone(context),
        })
    }

    /// Applies a unary operation, registering the new node as a consumer of `operand`.
    ///
    /// The registration is permanent. If the new node is not part of the graph that is
    /// later back-propagated, `operand` never receives all of its contributions and
    /// [`back_propagate`](Node::back_propagate) fails with `IncompleteBackward`.
    pub fn unary(op: UnaryOperation, operand: &Node<V>) -> Self {
        operand.add_consumer();
        Self::from_kind(NodeKind::Unary {
            op,
            operand: operand.clone(),
        })
    }

    /// Applies a binary operation, registering the new node as a consumer of both operands.
    ///
    /// `lhs` and `rhs` may be the same node (`x * x`); it then gains two consumers. As with
    /// [`unary`](Node::unary), a node built and then left out of the back-propagated graph
    /// keeps its operands from finalizing.
    pub fn binary(op: BinaryOperation, lhs: &Node<V>, rhs: &Node<V>) -> Self {
        lhs.add_consumer();
        rhs.add_consumer();
        Self::from_kind(NodeKind::Binary {
            op,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        })
    }

    pub fn plus(lhs: &Node<V>, rhs: &Node<V>) -> Self {
        Self::binary(BinaryOperation::Plus, lhs, rhs)
    }

    pub fn minus(lhs: &Node<V>, rhs: &Node<V>) -> Self {
        Self::binary(BinaryOperation::Minus, lhs, rhs)
    }

    pub fn multiply(lhs: &Node<V>, rhs: &Node<V>) -> Self {
        Self::binary(BinaryOperation::Multiply, lhs, rhs)
    }

    pub fn divide(lhs: &Node<V>, rhs: &Node<V>) -> Self {
        Self::binary(BinaryOperation::Divide, lhs, rhs)
    }

    pub fn exp(&self) -> Self {
        Self::unary(UnaryOperation::Exp, self)
    }

    pub fn sigmoid(&self) -> Self {
        Self::unary(UnaryOperation::Sigmoid, self)
    }

    // --- Internal access ---

    pub(crate) fn borrow_data(&self) -> Ref<'_, NodeData<V>> {
        self.data.borrow()
    }

    pub(crate) fn borrow_data_mut(&self) -> RefMut<'_, NodeData<V>> {
        self.data.borrow_mut()
    }

    fn add_consumer(&self) {
        self.borrow_data_mut().consumer_count += 1;
    }

    // --- Accessors ---

    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.data) as *const () as usize)
    }

    /// `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Node<V>) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// The operands (inputs) of this node, left to right. Empty for leaves.
    pub fn operands(&self) -> Vec<Node<V>> {
        match &self.borrow_data().kind {
            NodeKind::Constant(_) | NodeKind::Symbol { .. } => Vec::new(),
            NodeKind::Unary { operand, .. } => vec![operand.clone()],
            NodeKind::Binary { lhs, rhs, .. } => vec![lhs.clone(), rhs.clone()],
        }
    }

    /// Number of nodes using this node as an operand.
    pub fn consumer_count(&self) -> usize {
        self.borrow_data().consumer_count
    }

    /// Number of derivative contributions received so far.
    pub fn accumulated_contributions(&self) -> usize {
        self.borrow_data().accumulated
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self.borrow_data().kind,
            NodeKind::Constant(_) | NodeKind::Symbol { .. }
        )
    }

    /// The variable name, if this is a symbol leaf.
    pub fn symbol_name(&self) -> Option<String> {
        match &self.borrow_data().kind {
            NodeKind::Symbol { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Short description: the literal, the symbol name, the operator or the function name.
    pub fn label(&self) -> String {
        label_of(&self.borrow_data().kind)
    }

    /// The finalized derivative of the root with respect to this node.
    ///
    /// `None` until the node has received one contribution per consumer (or, for the root,
    /// until the backward pass was started), since a partial sum is not a derivative.
    pub fn derivative(&self) -> Option<V> {
        let data = self.borrow_data();
        match data.state {
            DerivativeState::Final => Some(data.derivative.clone()),
            DerivativeState::Pending => None,
        }
    }

    /// The running accumulator, whether or not it is final. Meant for debugging.
    pub fn partial_derivative(&self) -> V {
        self.borrow_data().derivative.clone()
    }

    pub fn derivative_state(&self) -> DerivativeState {
        self.borrow_data().state
    }

    pub fn is_finalized(&self) -> bool {
        self.derivative_state() == DerivativeState::Final
    }

    /// The forward value if it has been computed, without computing it.
    pub fn cached_value(&self) -> Option<V> {
        self.borrow_data().value.clone()
    }
}

pub(crate) fn label_of<V: GradValue>(kind: &NodeKind<V>) -> String {
    match kind {
        NodeKind::Constant(value) => value.to_string(),
        NodeKind::Symbol { name, .. } => name.clone(),
        NodeKind::Unary { op, .. } => op.name().to_string(),
        NodeKind::Binary { op, .. } => op.symbol().to_string(),
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
