// src/autograd/backward.rs
use crate::autograd::graph::topological_order;
use crate::error::BackpropError;
use crate::node::Node;
use crate::value::GradValue;
use log::{debug, trace};

/// How the backward pass walks the graph once the root has been seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Ready nodes go on an explicit work stack, so graph depth costs no call stack.
    #[default]
    Iterative,
    /// Each node propagates by calling [`Node::accumulate_derivative`] on its operands,
    /// which recurses once the operand is ready. Stack usage grows with graph depth.
    Recursive,
}

/// Options for [`Node::back_propagate_with`].
#[derive(Debug, Clone)]
pub struct BackpropOptions<V: GradValue> {
    /// Derivative assigned to the root. `None` means one.
    pub seed: Option<V>,
    pub traversal: Traversal,
}

impl<V: GradValue> Default for BackpropOptions<V> {
    fn default() -> Self {
        BackpropOptions {
            seed: None,
            traversal: Traversal::default(),
        }
    }
}

impl<V: GradValue> BackpropOptions<V> {
    pub fn with_seed(mut self, seed: V) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}

/// Seeds `root` and propagates until every reachable node is final.
///
/// The forward pass runs first, so an unbound symbol fails before any derivative
/// is written. A reachable node left pending afterwards (one of its consumers lies
/// outside the graph of `root`) is reported as `IncompleteBackward`.
pub(crate) fn run<V: GradValue>(
    root: &Node<V>,
    options: BackpropOptions<V>,
) -> Result<(), BackpropError> {
    root.value()?;
    let seed = options.seed.unwrap_or_else(V::one);
    debug!(
        "backward pass from '{}' (seed {}, {:?})",
        root.label(),
        seed,
        options.traversal
    );
    root.seed(seed)?;

    match options.traversal {
        Traversal::Iterative => propagate_iterative(root)?,
        Traversal::Recursive => propagate_recursive(root)?,
    }
    check_complete(root)?;
    debug!("backward pass from '{}' complete", root.label());
    Ok(())
}

/// Fails on the first node below `root`, operands first, that is still waiting for
/// contributions.
fn check_complete<V: GradValue>(root: &Node<V>) -> Result<(), BackpropError> {
    match topological_order(root)
        .into_iter()
        .find(|node| !node.is_finalized())
    {
        Some(node) => Err(BackpropError::IncompleteBackward {
            label: node.label(),
            accumulated: node.accumulated_contributions(),
            expected: node.consumer_count(),
        }),
        None => Ok(()),
    }
}

/// Fires `node` (whose derivative must be final) and keeps firing operands as they
/// become ready, using a work stack.
fn propagate_iterative<V: GradValue>(node: &Node<V>) -> Result<(), BackpropError> {
    let mut ready = vec![node.clone()];
    while let Some(current) = ready.pop() {
        trace!("firing node '{}'", current.label());
        for (operand, contribution) in current.contributions()? {
            if operand.accumulate(contribution)? {
                ready.push(operand);
            }
        }
    }
    Ok(())
}

/// Fires `node` by handing each operand its contribution through
/// [`Node::accumulate_derivative`].
pub(crate) fn propagate_recursive<V: GradValue>(node: &Node<V>) -> Result<(), BackpropError> {
    trace!("firing node '{}'", node.label());
    for (operand, contribution) in node.contributions()? {
        operand.accumulate_derivative(contribution)?;
    }
    Ok(())
}

// --- Tests ---
#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
