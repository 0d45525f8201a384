// src/node/autograd_methods.rs
use super::{label_of, DerivativeState, Node, NodeKind};
use crate::autograd::backward::{self, BackpropOptions};
use crate::autograd::graph::topological_order;
use crate::error::BackpropError;
use crate::value::GradValue;
use log::trace;

impl<V: GradValue> Node<V> {
    /// Returns the forward value of this node, computing it on first use.
    ///
    /// Every node of the sub-graph is evaluated at most once: values are cached on the
    /// nodes, and later calls (or calls on a consumer sharing this node) reuse them.
    /// Evaluation walks the graph with an explicit stack, operands first.
    ///
    /// # Errors
    /// `UnboundSymbol` if a symbol leaf has no binding in its evaluation context. Nothing
    /// is cached for the nodes that depend on it, so the call can be retried on a graph
    /// compiled against a complete context.
    pub fn value(&self) -> Result<V, BackpropError> {
        if let Some(value) = self.cached_value() {
            return Ok(value);
        }
        for node in topological_order(self) {
            if node.cached_value().is_some() {
                continue;
            }
            let value = node.compute_value()?;
            trace!("cached value {} for node '{}'", value, node.label());
            node.borrow_data_mut().value = Some(value);
        }
        self.cached_value().ok_or_else(|| {
            BackpropError::InternalError("root value missing after forward pass".to_string())
        })
    }

    /// Applies this node's forward rule to its operands' cached values.
    fn compute_value(&self) -> Result<V, BackpropError> {
        let data = self.borrow_data();
        match &data.kind {
            NodeKind::Constant(value) => Ok(V::constant(*value)),
            NodeKind::Symbol { name, context } => V::symbol(name, context),
            NodeKind::Unary { op, operand } => Ok(op.forward(&operand.resolved_value()?)),
            NodeKind::Binary { op, lhs, rhs } => {
                Ok(op.forward(&lhs.resolved_value()?, &rhs.resolved_value()?))
            }
        }
    }

    fn resolved_value(&self) -> Result<V, BackpropError> {
        self.cached_value().ok_or_else(|| {
            BackpropError::InternalError(format!(
                "operand '{}' used before it was evaluated",
                self.label()
            ))
        })
    }

    /// Local partial derivative of this node with respect to each operand, at the current
    /// forward values. Leaves return an empty list.
    pub fn local_gradients(&self) -> Result<Vec<(Node<V>, V)>, BackpropError> {
        // Evaluate first: this may fill caches, which needs mutable borrows.
        let output = self.value()?;
        let data = self.borrow_data();
        match &data.kind {
            NodeKind::Constant(_) | NodeKind::Symbol { .. } => Ok(Vec::new()),
            NodeKind::Unary { op, operand } => Ok(vec![(operand.clone(), op.partial(&output))]),
            NodeKind::Binary { op, lhs, rhs } => {
                let (d_lhs, d_rhs) = op.partials(&lhs.value()?, &rhs.value()?);
                Ok(vec![(lhs.clone(), d_lhs), (rhs.clone(), d_rhs)])
            }
        }
    }

    /// What this node sends to each operand: local partial × this node's final derivative.
    pub(crate) fn contributions(&self) -> Result<Vec<(Node<V>, V)>, BackpropError> {
        let derivative = self.derivative().ok_or_else(|| {
            BackpropError::InternalError(format!(
                "node '{}' propagated before its derivative was final",
                self.label()
            ))
        })?;
        Ok(self
            .local_gradients()?
            .into_iter()
            .map(|(operand, partial)| (operand, partial * derivative.clone()))
            .collect())
    }

    /// Receives one consumer's contribution to this node's derivative.
    ///
    /// Once every consumer has contributed, the derivative is finalized and the node
    /// immediately propagates to its operands (recursively, through this same method).
    pub fn accumulate_derivative(&self, contribution: V) -> Result<(), BackpropError> {
        if self.accumulate(contribution)? {
            backward::propagate_recursive(self)?;
        }
        Ok(())
    }

    /// Adds `contribution` and reports whether the node just became ready to propagate.
    pub(crate) fn accumulate(&self, contribution: V) -> Result<bool, BackpropError> {
        let mut data = self.borrow_data_mut();
        if data.state == DerivativeState::Final || data.accumulated >= data.consumer_count {
            return Err(BackpropError::ExcessContribution {
                expected: data.consumer_count,
                received: data.accumulated + 1,
            });
        }
        let running = std::mem::replace(&mut data.derivative, V::zero());
        data.derivative = running + contribution;
        data.accumulated += 1;
        trace!(
            "node '{}' received contribution {}/{}",
            label_of(&data.kind),
            data.accumulated,
            data.consumer_count
        );

        if data.accumulated < data.consumer_count {
            return Ok(false);
        }
        let total = std::mem::replace(&mut data.derivative, V::zero());
        data.derivative = total.finalize();
        data.state = DerivativeState::Final;
        trace!(
            "node '{}' finalized with derivative {}",
            label_of(&data.kind),
            data.derivative
        );
        Ok(true)
    }

    /// Marks this node as the root of a backward pass with derivative `seed`.
    pub(crate) fn seed(&self, seed: V) -> Result<(), BackpropError> {
        let mut data = self.borrow_data_mut();
        if data.state == DerivativeState::Final {
            return Err(BackpropError::AlreadyPropagated);
        }
        if data.consumer_count > 0 {
            return Err(BackpropError::NotARoot {
                consumer_count: data.consumer_count,
            });
        }
        data.derivative = seed;
        data.state = DerivativeState::Final;
        Ok(())
    }

    /// Runs the backward pass from this node with a seed of one.
    ///
    /// Afterwards every node reachable from here holds its final
    /// [`derivative`](Node::derivative). Accumulators are never reset, so a graph can be
    /// back-propagated only once.
    ///
    /// # Errors
    /// * `UnboundSymbol` if the forward pass fails; no derivative is touched in that case.
    /// * `NotARoot` if this node is an operand of another node.
    /// * `AlreadyPropagated` on a second call.
    /// * `IncompleteBackward` if some node below this one has a consumer outside this
    ///   graph and so never received all of its contributions.
    pub fn back_propagate(&self) -> Result<(), BackpropError> {
        self.back_propagate_with(BackpropOptions::default())
    }

    /// Runs the backward pass with an explicit seed and/or traversal strategy.
    pub fn back_propagate_with(&self, options: BackpropOptions<V>) -> Result<(), BackpropError> {
        backward::run(self, options)
    }
}
