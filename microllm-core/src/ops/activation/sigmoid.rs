use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// d sigmoid(x)/dx = y (1 - y), computed from the cached output.
#[derive(Debug)]
struct SigmoidBackward {
    input: Tensor,
    output: Vec<f32>,
}

impl BackwardOp for SigmoidBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let grad_input = self
            .output
            .iter()
            .zip(grad_output)
            .map(|(&y, &g)| y * (1.0 - y) * g)
            .collect();
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }
}

/// Logistic function `1 / (1 + e^-x)`.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Applies the logistic sigmoid element-wise.
pub fn sigmoid_op(input: &Tensor) -> Result<Tensor> {
    apply_unary_op(input, sigmoid, |output| {
        Rc::new(SigmoidBackward {
            input: input.clone(),
            output: output.to_vec(),
        })
    })
}

impl Tensor {
    /// See [`sigmoid_op`].
    pub fn sigmoid(&self) -> Result<Tensor> {
        sigmoid_op(self)
    }
}
