use std::cell::RefCell;
use std::collections::HashSet;

use log::{debug, trace};

use crate::error::{MicroLlmError, Result};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Identity of a graph node: the address of its shared `TensorData`.
///
/// Addresses are stable while a `Tensor` handle to the node is alive, which the
/// sorted list returned by [`topological_sort`] guarantees for the whole backward pass.
pub type NodeId = *const RefCell<TensorData>;

enum Visit {
    Enter(Tensor),
    Exit(Tensor),
}

/// Builds a topological sort of the computation graph reachable from `root`.
///
/// Depth-first, post-order: a node is pushed to the returned list only after all
/// of its parents. Nodes reachable through several paths appear once. The
/// traversal uses an explicit stack instead of recursion.
///
/// Only the traversal is iterative. Releasing the last handle to the root of a
/// very long chain still drops the nodes recursively through their `Rc`s.
///
/// # Errors
/// Returns `CycleDetected` if a node is reached again while it is still on the
/// current DFS path. Operators cannot produce such a graph; only a hand-written
/// `BackwardOp` reporting a descendant as its input can.
pub fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    let mut stack = vec![Visit::Enter(root.clone())];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                let id = node.id();
                if on_path.contains(&id) {
                    return Err(MicroLlmError::CycleDetected);
                }
                if !visited.insert(id) {
                    continue;
                }
                on_path.insert(id);
                let parents = node.parents();
                stack.push(Visit::Exit(node));
                // Reversed so the first parent is explored first, as a recursive DFS would.
                for parent in parents.into_iter().rev() {
                    stack.push(Visit::Enter(parent));
                }
            }
            Visit::Exit(node) => {
                on_path.remove(&node.id());
                sorted.push(node);
            }
        }
    }
    Ok(sorted)
}

/// Runs reverse-mode differentiation from `root`.
///
/// 1. Collects the reachable graph in topological order.
/// 2. Clears the gradient of every non-leaf node and seeds the root's
///    gradient with ones.
/// 3. Replays each node's backward operation in reverse order, adding the
///    returned contributions into its parents' gradients.
///
/// Because the order is a post-order DFS from the root, a node's backward runs
/// only after every node depending on it has run, so it always sees its
/// complete gradient.
///
/// Intermediate gradients are rebuilt from scratch on every call, so calling
/// this twice without zeroing adds the same contribution to each leaf twice.
pub fn backward(root: &Tensor) -> Result<()> {
    let sorted = topological_sort(root)?;
    debug!(
        "backward: {} node(s) reachable from root of shape {:?}",
        sorted.len(),
        root.shape()
    );

    for node in sorted.iter().filter(|node| !node.is_leaf()) {
        node.zero_grad();
    }
    root.fill_grad(1.0);

    for node in sorted.iter().rev() {
        let Some(grad_fn) = node.grad_fn() else {
            continue;
        };
        trace!("backward: running {} for node {:?}", grad_fn.name(), node.id());

        // Snapshot the gradient so the operation never holds a borrow on the node.
        let grad_output = node.grad_to_vec();
        let inputs = grad_fn.inputs();
        let contributions = grad_fn.backward(&grad_output)?;

        if contributions.len() != inputs.len() {
            return Err(MicroLlmError::GradientAccumulation {
                operation: grad_fn.name().to_string(),
                expected: inputs.len(),
                actual: contributions.len(),
            });
        }
        for (input, contribution) in inputs.iter().zip(contributions.iter()) {
            input.accumulate_grad(contribution, grad_fn.name())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
