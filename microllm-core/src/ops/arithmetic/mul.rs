use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;

// --- Backward Operation ---

/// Each operand receives the upstream gradient scaled by the other operand.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let a_data = self.a.data();
        let b_data = self.b.data();
        let grad_a = grad_output
            .iter()
            .zip(b_data.iter())
            .map(|(&g, &y)| g * y)
            .collect();
        let grad_b = grad_output
            .iter()
            .zip(a_data.iter())
            .map(|(&g, &x)| g * x)
            .collect();
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "mul"
    }
}

// --- Forward Operation ---

/// Element-wise (Hadamard) product of two tensors with identical shapes.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let grad_fn = Rc::new(MulBackward {
        a: a.clone(),
        b: b.clone(),
    });
    apply_binary_op(a, b, |x, y| x * y, grad_fn, "mul")
}

impl Tensor {
    /// Element-wise product, see [`mul_op`].
    pub fn multiply(&self, other: &Tensor) -> Result<Tensor> {
        mul_op(self, other)
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
