use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Value written above the diagonal by [`causal_mask_op`]. Large enough that
/// softmax assigns those positions a probability of zero.
pub const MASK_VALUE: f32 = -1e9;

#[derive(Debug)]
struct CausalMaskBackward {
    input: Tensor,
    size: usize,
}

impl BackwardOp for CausalMaskBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let n = self.size;
        let mut grad_input = grad_output.to_vec();
        for (i, row) in grad_input.chunks_mut(n).enumerate() {
            row[i + 1..].iter_mut().for_each(|g| *g = 0.0);
        }
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "causal_mask"
    }
}

/// Masks out future positions of a square score matrix: entry `(i, j)` with
/// `j > i` is replaced by [`MASK_VALUE`]. Masked entries receive no gradient.
///
/// # Errors
/// `ShapeMismatch` if `input` is not square.
pub fn causal_mask_op(input: &Tensor) -> Result<Tensor> {
    let [rows, cols] = input.shape();
    if rows != cols {
        return Err(MicroLlmError::ShapeMismatch {
            operation: "causal_mask".to_string(),
            expected: vec![rows, rows],
            actual: vec![rows, cols],
        });
    }
    let mut output = input.to_vec();
    for (i, row) in output.chunks_mut(cols).enumerate() {
        row[i + 1..].iter_mut().for_each(|x| *x = MASK_VALUE);
    }
    let grad_fn = Rc::new(CausalMaskBackward {
        input: input.clone(),
        size: rows,
    });
    new_op_output(output, rows, cols, grad_fn)
}

impl Tensor {
    /// See [`causal_mask_op`].
    pub fn causal_mask(&self) -> Result<Tensor> {
        causal_mask_op(self)
    }
}

#[cfg(test)]
#[path = "masked_fill_test.rs"]
mod tests;
