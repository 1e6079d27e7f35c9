use std::rc::Rc;

use crate::autograd::{self, BackwardOp};
use crate::error::{MicroLlmError, Result};
use crate::tensor::Tensor;

impl Tensor {
    /// Overwrites the gradient with zeros.
    pub fn zero_grad(&self) {
        self.fill_grad(0.0);
    }

    /// Overwrites every gradient element with `value`.
    pub(crate) fn fill_grad(&self, value: f32) {
        self.write_data().grad.fill(value);
    }

    /// Adds `contribution` element-wise into the gradient.
    ///
    /// # Errors
    /// Returns `GradientAccumulation` if the lengths differ.
    pub(crate) fn accumulate_grad(&self, contribution: &[f32], operation: &str) -> Result<()> {
        let mut guard = self.write_data();
        if contribution.len() != guard.grad.len() {
            return Err(MicroLlmError::GradientAccumulation {
                operation: operation.to_string(),
                expected: guard.grad.len(),
                actual: contribution.len(),
            });
        }
        for (g, c) in guard.grad.iter_mut().zip(contribution) {
            *g += c;
        }
        Ok(())
    }

    /// Returns a clone of the `Rc` pointing to the backward operation node (`grad_fn`).
    pub fn grad_fn(&self) -> Option<Rc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Sets the backward operation node (`grad_fn`) for this tensor.
    pub(crate) fn set_grad_fn(&self, grad_fn: Option<Rc<dyn BackwardOp>>) {
        self.write_data().grad_fn = grad_fn;
    }

    /// `true` for tensors not produced by an operator (inputs, parameters).
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// The tensors this node was computed from, in operand order. Empty for leaves.
    pub fn parents(&self) -> Vec<Tensor> {
        self.grad_fn().map(|op| op.inputs()).unwrap_or_default()
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Seeds this tensor's gradient with ones and accumulates gradients into
    /// every tensor it was computed from. See [`autograd::backward`].
    ///
    /// # Errors
    /// Returns `CycleDetected` for a malformed graph, or `GradientAccumulation`
    /// if a backward operation returns buffers of the wrong arity or length.
    pub fn backward(&self) -> Result<()> {
        autograd::backward(self)
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
