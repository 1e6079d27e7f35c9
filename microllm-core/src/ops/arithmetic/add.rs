use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;

// --- Backward Operation ---

/// The upstream gradient flows unchanged to both operands.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        Ok(vec![grad_output.to_vec(), grad_output.to_vec()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

// --- Forward Operation ---

/// Element-wise addition of two tensors with identical shapes.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let grad_fn = Rc::new(AddBackward {
        a: a.clone(),
        b: b.clone(),
    });
    apply_binary_op(a, b, |x, y| x + y, grad_fn, "add")
}

impl Tensor {
    /// See [`add_op`].
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        add_op(self, other)
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
