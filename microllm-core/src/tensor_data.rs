// src/tensor_data.rs
use std::fmt;
use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the value buffer, the gradient buffer, the 2-D shape and
/// the autograd link to the operation that produced it.
/// It is wrapped in `Rc<RefCell<TensorData>>` by the `Tensor` struct to allow
/// shared ownership and interior mutability on a single thread.
pub struct TensorData {
    /// Number of rows. Fixed at creation.
    pub(crate) rows: usize,
    /// Number of columns. Fixed at creation.
    pub(crate) cols: usize,
    /// Values in row-major order, `rows * cols` elements.
    pub(crate) data: Vec<f32>,
    /// Accumulated gradient, same length as `data`, zero on creation.
    pub(crate) grad: Vec<f32>,
    /// Backward operation of the operator that produced this tensor.
    /// Leaf tensors (inputs, parameters) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Rc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from row-major values.
    ///
    /// # Errors
    /// * `InvalidShape` if either dimension is zero.
    /// * `TensorCreation` if `data.len() != rows * cols`.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MicroLlmError::InvalidShape { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(MicroLlmError::TensorCreation {
                data_len: data.len(),
                rows,
                cols,
            });
        }
        let grad = vec![0.0; data.len()];
        Ok(TensorData {
            rows,
            cols,
            data,
            grad,
            grad_fn: None,
        })
    }

    /// Number of elements (`rows * cols`).
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Flat row-major offset of element `(i, j)`.
    #[inline]
    pub(crate) fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of range for shape [{}, {}]",
            i,
            j,
            self.rows,
            self.cols
        );
        i * self.cols + j
    }
}

impl fmt::Debug for TensorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorData")
            .field("shape", &[self.rows, self.cols])
            .field("data", &self.data)
            .field("grad", &self.grad)
            .field("grad_fn", &self.grad_fn.as_ref().map(|op| op.name()))
            .finish()
    }
}
