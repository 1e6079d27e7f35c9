use std::cell::{Ref, RefMut};
use std::rc::Rc;

use crate::autograd::graph::NodeId;
use crate::error::{MicroLlmError, Result};
use crate::tensor::Tensor;

impl Tensor {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.read_data().rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.read_data().cols
    }

    /// Returns the shape as `[rows, cols]`.
    pub fn shape(&self) -> [usize; 2] {
        let guard = self.read_data();
        [guard.rows, guard.cols]
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Borrows the row-major values.
    pub fn data(&self) -> Ref<'_, [f32]> {
        Ref::map(self.read_data(), |td| td.data.as_slice())
    }

    /// Borrows the accumulated gradient.
    pub fn grad(&self) -> Ref<'_, [f32]> {
        Ref::map(self.read_data(), |td| td.grad.as_slice())
    }

    /// Copies the values into a new `Vec`.
    pub fn to_vec(&self) -> Vec<f32> {
        self.read_data().data.clone()
    }

    /// Copies the gradient into a new `Vec`.
    pub fn grad_to_vec(&self) -> Vec<f32> {
        self.read_data().grad.clone()
    }

    /// Mutable access to the value at `(i, j)`.
    ///
    /// Indices are not re-checked beyond a debug assertion: callers guarantee
    /// `i < rows` and `j < cols`.
    pub fn at(&self, i: usize, j: usize) -> RefMut<'_, f32> {
        RefMut::map(self.write_data(), |td| {
            let offset = td.offset(i, j);
            &mut td.data[offset]
        })
    }

    /// Mutable access to the gradient at `(i, j)`. Same contract as [`Tensor::at`].
    pub fn grad_at(&self, i: usize, j: usize) -> RefMut<'_, f32> {
        RefMut::map(self.write_data(), |td| {
            let offset = td.offset(i, j);
            &mut td.grad[offset]
        })
    }

    /// Reads the value at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        let guard = self.read_data();
        guard.data[guard.offset(i, j)]
    }

    /// Reads the gradient at `(i, j)`.
    pub fn grad_get(&self, i: usize, j: usize) -> f32 {
        let guard = self.read_data();
        guard.grad[guard.offset(i, j)]
    }

    /// Returns the first value, typically of a 1x1 loss tensor.
    pub fn item(&self) -> f32 {
        self.read_data().data[0]
    }

    /// Overwrites all values. Used by optimizers on leaf parameters.
    ///
    /// # Errors
    /// Returns `TensorCreation` if `values` does not have `rows * cols` elements.
    pub fn set_data(&self, values: &[f32]) -> Result<()> {
        let mut guard = self.write_data();
        if values.len() != guard.numel() {
            return Err(MicroLlmError::TensorCreation {
                data_len: values.len(),
                rows: guard.rows,
                cols: guard.cols,
            });
        }
        guard.data.copy_from_slice(values);
        Ok(())
    }

    /// Mutates the values in place. Used by optimizers on leaf parameters.
    /// The closure receives the values and the current gradient.
    pub fn update_data<F>(&self, mut f: F)
    where
        F: FnMut(&mut [f32], &[f32]),
    {
        let mut guard = self.write_data();
        let td = &mut *guard;
        f(&mut td.data, &td.grad);
    }

    /// Stable identity of the underlying node, used as a graph key.
    pub fn id(&self) -> NodeId {
        Rc::as_ptr(&self.data)
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}
