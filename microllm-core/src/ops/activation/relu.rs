use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

// --- Backward Operation ---

/// Gradient passes where the input was strictly positive, zero elsewhere
/// (including at exactly 0).
#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let input_data = self.input.data();
        let grad_input = input_data
            .iter()
            .zip(grad_output)
            .map(|(&x, &g)| if x > 0.0 { g } else { 0.0 })
            .collect();
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "relu"
    }
}

// --- Forward Operation ---

/// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
/// ReLU(x) = max(0, x)
pub fn relu_op(input: &Tensor) -> Result<Tensor> {
    apply_unary_op(
        input,
        |x| x.max(0.0),
        |_| Rc::new(ReluBackward { input: input.clone() }),
    )
}

impl Tensor {
    /// See [`relu_op`].
    pub fn relu(&self) -> Result<Tensor> {
        relu_op(self)
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
