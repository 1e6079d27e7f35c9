// src/tensor/mod.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::tensor_data::TensorData;

mod accessors;
mod autograd_methods;
pub mod create;
mod debug;

pub use create::{full, ones, zeros, zeros_like};

/// A dense, row-major 2-D matrix of `f32` values taking part in the autograd graph.
///
/// `Tensor` uses `Rc<RefCell<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Multiple `Tensor` handles (user code, child nodes'
///     parent lists, backward operations) point to the same node. Cloning a
///     `Tensor` is cheap and never copies the buffers.
/// 2.  **Interior Mutability:** the gradient buffer is accumulated and the
///     values are updated by optimizers through shared handles.
///
/// The graph is strictly single-threaded, so `Tensor` is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) data: Rc<RefCell<TensorData>>,
}

impl Tensor {
    /// Creates a zero-filled `rows x cols` leaf tensor.
    ///
    /// # Errors
    /// Returns `MicroLlmError::InvalidShape` if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Tensor::from_vec(vec![0.0; rows * cols], rows, cols)
    }

    /// Creates a leaf tensor from row-major values.
    ///
    /// # Errors
    /// * `InvalidShape` if `rows` or `cols` is zero.
    /// * `TensorCreation` if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        let tensor_data = TensorData::new(data, rows, cols)?;
        Ok(Tensor::from_tensor_data(tensor_data))
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Rc::new(RefCell::new(tensor_data)),
        }
    }

    /// Borrows the underlying `TensorData` immutably.
    ///
    /// Panics if the node is currently mutably borrowed.
    pub fn read_data(&self) -> std::cell::Ref<'_, TensorData> {
        self.data.borrow()
    }

    /// Borrows the underlying `TensorData` mutably.
    ///
    /// Panics if the node is currently borrowed.
    pub fn write_data(&self) -> std::cell::RefMut<'_, TensorData> {
        self.data.borrow_mut()
    }
}
