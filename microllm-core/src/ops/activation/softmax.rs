use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Backward pass of the row-wise softmax.
///
/// For each row with output `s` and upstream gradient `dY`:
/// `dX = s * (dY - sum(s * dY))`.
#[derive(Debug)]
struct SoftmaxBackward {
    input: Tensor,
    output: Vec<f32>,
    cols: usize,
}

impl BackwardOp for SoftmaxBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let mut grad_input = vec![0.0; self.output.len()];
        if self.cols == 0 {
            return Ok(vec![grad_input]);
        }
        for ((s, dy), dx) in self
            .output
            .chunks(self.cols)
            .zip(grad_output.chunks(self.cols))
            .zip(grad_input.chunks_mut(self.cols))
        {
            let dot: f32 = s.iter().zip(dy).map(|(&si, &gi)| si * gi).sum();
            for ((d, &si), &gi) in dx.iter_mut().zip(s).zip(dy) {
                *d = si * (gi - dot);
            }
        }
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "softmax"
    }
}

/// Writes the softmax of `row` into `out`, subtracting the row maximum first
/// so large logits do not overflow.
fn softmax_row(row: &[f32], out: &mut [f32]) {
    let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut denom = 0.0;
    for (o, &x) in out.iter_mut().zip(row) {
        *o = (x - max).exp();
        denom += *o;
    }
    for o in out.iter_mut() {
        *o /= denom;
    }
}

/// Row-wise softmax: every output row is a probability distribution.
pub fn softmax_op(input: &Tensor) -> Result<Tensor> {
    let [rows, cols] = input.shape();
    let mut output = vec![0.0; rows * cols];
    {
        let data = input.data();
        for (row, out) in data.chunks(cols).zip(output.chunks_mut(cols)) {
            softmax_row(row, out);
        }
    }
    let grad_fn = Rc::new(SoftmaxBackward {
        input: input.clone(),
        output: output.clone(),
        cols,
    });
    new_op_output(output, rows, cols, grad_fn)
}

impl Tensor {
    /// See [`softmax_op`].
    pub fn softmax(&self) -> Result<Tensor> {
        softmax_op(self)
    }
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
