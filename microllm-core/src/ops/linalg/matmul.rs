use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Backward pass of `C = A @ B`.
///
/// dA = dC @ Bᵀ, dB = Aᵀ @ dC, computed directly from the row-major buffers.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let a = self.a.read_data();
        let b = self.b.read_data();
        let (m, k, n) = (a.rows, a.cols, b.cols);

        let mut grad_a = vec![0.0; m * k];
        let mut grad_b = vec![0.0; k * n];
        for i in 0..m {
            for j in 0..n {
                let g = grad_output[i * n + j];
                for l in 0..k {
                    grad_a[i * k + l] += g * b.data[l * n + j];
                    grad_b[l * n + j] += a.data[i * k + l] * g;
                }
            }
        }
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "matmul"
    }
}

/// Performs matrix multiplication C = A @ B.
/// A: [M, K], B: [K, N] -> C: [M, N]
///
/// # Errors
/// Returns `ShapeMismatch` if `A.cols != B.rows`; `expected` is the shape B
/// should have (`[A.cols, B.cols]`), `actual` is B's shape.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let [m, k] = a.shape();
    let [k_b, n] = b.shape();
    if k != k_b {
        return Err(MicroLlmError::ShapeMismatch {
            operation: "matmul (inner dim)".to_string(),
            expected: vec![k, n],
            actual: vec![k_b, n],
        });
    }

    let mut output_data = vec![0.0f32; m * n];
    {
        let a_data = a.data();
        let b_data = b.data();
        for i in 0..m {
            for l in 0..k {
                let a_il = a_data[i * k + l];
                for j in 0..n {
                    output_data[i * n + j] += a_il * b_data[l * n + j];
                }
            }
        }
    }

    let grad_fn = MatmulBackward {
        a: a.clone(),
        b: b.clone(),
    };
    new_op_output(output_data, m, n, Rc::new(grad_fn))
}

impl Tensor {
    /// Matrix product `self @ other`. See [`matmul_op`].
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor> {
        matmul_op(self, other)
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
