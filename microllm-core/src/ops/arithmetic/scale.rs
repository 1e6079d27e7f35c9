use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

#[derive(Debug)]
struct ScaleBackward {
    input: Tensor,
    factor: f32,
}

impl BackwardOp for ScaleBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        Ok(vec![grad_output.iter().map(|&g| g * self.factor).collect()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Multiplies every element by a constant `factor`.
pub fn scale_op(input: &Tensor, factor: f32) -> Result<Tensor> {
    apply_unary_op(
        input,
        |x| x * factor,
        |_| {
            Rc::new(ScaleBackward {
                input: input.clone(),
                factor,
            })
        },
    )
}

impl Tensor {
    /// See [`scale_op`].
    pub fn scale(&self, factor: f32) -> Result<Tensor> {
        scale_op(self, factor)
    }
}

#[cfg(test)]
#[path = "scale_test.rs"]
mod tests;
