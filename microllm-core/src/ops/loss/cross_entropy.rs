use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::{check_same_shape, new_op_output};
use crate::tensor::Tensor;

use super::LOSS_EPSILON;

/// `d/dpred = -target / (pred + eps) / rows`, scaled by the upstream gradient.
#[derive(Debug)]
struct CrossEntropyLossBackward {
    pred: Tensor,
    target: Vec<f32>,
    rows: usize,
}

impl BackwardOp for CrossEntropyLossBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let g = grad_output.first().copied().unwrap_or(0.0);
        let rows = self.rows as f32;
        let pred = self.pred.data();
        let grad_pred = pred
            .iter()
            .zip(&self.target)
            .map(|(&p, &t)| -t / (p + LOSS_EPSILON) / rows * g)
            .collect();
        Ok(vec![grad_pred])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.pred.clone()]
    }

    fn name(&self) -> &'static str {
        "cross_entropy_loss"
    }
}

/// Cross-entropy between predicted probabilities and a target distribution,
/// averaged over rows: `-sum(target * ln(pred + eps)) / rows`.
///
/// `pred` is expected to already be a probability distribution per row
/// (typically the output of `softmax_op`).
///
/// # Errors
/// `ShapeMismatch` if `pred` and `target` differ in shape.
pub fn cross_entropy_loss_op(pred: &Tensor, target: &Tensor) -> Result<Tensor> {
    check_same_shape(pred, target, "cross_entropy_loss")?;
    let rows = pred.rows();
    let target = target.to_vec();
    let loss = {
        let p = pred.data();
        let total: f32 = p
            .iter()
            .zip(&target)
            .map(|(&p, &t)| t * (p + LOSS_EPSILON).ln())
            .sum();
        -total / rows as f32
    };
    let grad_fn = Rc::new(CrossEntropyLossBackward {
        pred: pred.clone(),
        target,
        rows,
    });
    new_op_output(vec![loss], 1, 1, grad_fn)
}

impl Tensor {
    /// See [`cross_entropy_loss_op`].
    pub fn cross_entropy_loss(&self, target: &Tensor) -> Result<Tensor> {
        cross_entropy_loss_op(self, target)
    }
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
