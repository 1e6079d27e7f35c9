use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Broadcasts the scalar upstream gradient back to every input element.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let g = grad_output.first().copied().unwrap_or(0.0);
        Ok(vec![vec![g; self.input.numel()]])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Sums all elements into a `1 x 1` tensor.
pub fn sum_op(input: &Tensor) -> Result<Tensor> {
    let total: f32 = input.data().iter().sum();
    let grad_fn = Rc::new(SumBackward {
        input: input.clone(),
    });
    new_op_output(vec![total], 1, 1, grad_fn)
}

impl Tensor {
    /// See [`sum_op`].
    pub fn sum(&self) -> Result<Tensor> {
        sum_op(self)
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
