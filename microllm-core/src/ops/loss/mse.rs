use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::{check_same_shape, new_op_output};
use crate::tensor::Tensor;

#[derive(Debug)]
struct MseLossBackward {
    pred: Tensor,
    target: Vec<f32>,
}

impl BackwardOp for MseLossBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let g = grad_output.first().copied().unwrap_or(0.0);
        let n = self.target.len() as f32;
        let pred = self.pred.data();
        let grad_pred = pred
            .iter()
            .zip(&self.target)
            .map(|(&p, &t)| 2.0 * (p - t) / n * g)
            .collect();
        Ok(vec![grad_pred])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.pred.clone()]
    }

    fn name(&self) -> &'static str {
        "mse_loss"
    }
}

/// Mean squared error over all elements: `mean((pred - target)^2)`.
///
/// # Errors
/// `ShapeMismatch` if `pred` and `target` differ in shape.
pub fn mse_loss_op(pred: &Tensor, target: &Tensor) -> Result<Tensor> {
    check_same_shape(pred, target, "mse_loss")?;
    let target = target.to_vec();
    let loss = {
        let p = pred.data();
        let sq: f32 = p.iter().zip(&target).map(|(&p, &t)| (p - t) * (p - t)).sum();
        sq / target.len() as f32
    };
    let grad_fn = Rc::new(MseLossBackward {
        pred: pred.clone(),
        target,
    });
    new_op_output(vec![loss], 1, 1, grad_fn)
}

impl Tensor {
    /// See [`mse_loss_op`].
    pub fn mse_loss(&self, target: &Tensor) -> Result<Tensor> {
        mse_loss_op(self, target)
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
