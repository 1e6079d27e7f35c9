use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// d tanh(x)/dx = 1 - tanh(x)², computed from the cached output.
#[derive(Debug)]
struct TanhBackward {
    input: Tensor,
    output: Vec<f32>,
}

impl BackwardOp for TanhBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let grad_input = self
            .output
            .iter()
            .zip(grad_output)
            .map(|(&y, &g)| (1.0 - y * y) * g)
            .collect();
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "tanh"
    }
}

/// Applies the hyperbolic tangent element-wise.
pub fn tanh_op(input: &Tensor) -> Result<Tensor> {
    apply_unary_op(input, f32::tanh, |output| {
        Rc::new(TanhBackward {
            input: input.clone(),
            output: output.to_vec(),
        })
    })
}

impl Tensor {
    /// See [`tanh_op`].
    pub fn tanh(&self) -> Result<Tensor> {
        tanh_op(self)
    }
}
