use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// `input` receives the upstream gradient as is; `bias` receives its
/// column sums over all rows.
#[derive(Debug)]
struct AddBiasBackward {
    input: Tensor,
    bias: Tensor,
    cols: usize,
}

impl BackwardOp for AddBiasBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let mut grad_bias = vec![0.0; self.cols];
        for row in grad_output.chunks(self.cols) {
            for (gb, &g) in grad_bias.iter_mut().zip(row) {
                *gb += g;
            }
        }
        Ok(vec![grad_output.to_vec(), grad_bias])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone(), self.bias.clone()]
    }

    fn name(&self) -> &'static str {
        "add_bias"
    }
}

/// Adds a `1 x m` bias row to every row of an `n x m` input.
///
/// # Errors
/// `ShapeMismatch` unless `bias` is `1 x input.cols()`.
pub fn add_bias_op(input: &Tensor, bias: &Tensor) -> Result<Tensor> {
    let [rows, cols] = input.shape();
    if bias.shape() != [1, cols] {
        return Err(MicroLlmError::ShapeMismatch {
            operation: "add_bias".to_string(),
            expected: vec![1, cols],
            actual: bias.shape().to_vec(),
        });
    }
    let output = {
        let x = input.data();
        let b = bias.data();
        let mut out = x.to_vec();
        for row in out.chunks_mut(cols) {
            for (o, &bj) in row.iter_mut().zip(b.iter()) {
                *o += bj;
            }
        }
        out
    };
    let grad_fn = Rc::new(AddBiasBackward {
        input: input.clone(),
        bias: bias.clone(),
        cols,
    });
    new_op_output(output, rows, cols, grad_fn)
}

impl Tensor {
    /// See [`add_bias_op`].
    pub fn add_bias(&self, bias: &Tensor) -> Result<Tensor> {
        add_bias_op(self, bias)
    }
}

#[cfg(test)]
#[path = "add_bias_test.rs"]
mod tests;
