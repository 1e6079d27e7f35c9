use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Transposes a `rows x cols` buffer into a `cols x rows` buffer.
pub(crate) fn transpose_buffer(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = data[i * cols + j];
        }
    }
    out
}

/// Backward pass of transpose: the gradient is transposed back.
#[derive(Debug)]
struct TransposeBackward {
    input: Tensor,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let [rows, cols] = self.input.shape();
        // grad_output is cols x rows
        Ok(vec![transpose_buffer(grad_output, cols, rows)])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "transpose"
    }
}

/// Returns a new `cols x rows` tensor with `C[j, i] = A[i, j]`.
///
/// Always copies: there are no strided views in this crate.
pub fn transpose_op(a: &Tensor) -> Result<Tensor> {
    let [rows, cols] = a.shape();
    let output_data = transpose_buffer(&a.data(), rows, cols);
    let grad_fn = TransposeBackward { input: a.clone() };
    new_op_output(output_data, cols, rows, Rc::new(grad_fn))
}

impl Tensor {
    /// See [`transpose_op`].
    pub fn transpose(&self) -> Result<Tensor> {
        transpose_op(self)
    }
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
