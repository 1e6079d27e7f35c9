use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;

/// `d(a - b)/da = 1`, `d(a - b)/db = -1`.
#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let grad_b = grad_output.iter().map(|&g| -g).collect();
        Ok(vec![grad_output.to_vec(), grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "sub"
    }
}

/// Element-wise subtraction `a - b` of two tensors with identical shapes.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let grad_fn = Rc::new(SubBackward {
        a: a.clone(),
        b: b.clone(),
    });
    apply_binary_op(a, b, |x, y| x - y, grad_fn, "sub")
}

impl Tensor {
    /// See [`sub_op`].
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        sub_op(self, other)
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
