// src/tensor/create.rs

use rand::Rng;

use crate::error::Result;
use crate::nn::init;
use crate::tensor::Tensor;

/// Creates a new `rows x cols` tensor filled with zeros.
pub fn zeros(rows: usize, cols: usize) -> Result<Tensor> {
    Tensor::new(rows, cols)
}

/// Creates a new `rows x cols` tensor filled with ones.
pub fn ones(rows: usize, cols: usize) -> Result<Tensor> {
    full(rows, cols, 1.0)
}

/// Creates a new `rows x cols` tensor filled with `value`.
pub fn full(rows: usize, cols: usize, value: f32) -> Result<Tensor> {
    Tensor::from_vec(vec![value; rows * cols], rows, cols)
}

/// Creates a zero-filled leaf tensor with the same shape as `other`.
pub fn zeros_like(other: &Tensor) -> Result<Tensor> {
    Tensor::new(other.rows(), other.cols())
}

impl Tensor {
    /// See [`ones`].
    pub fn ones(rows: usize, cols: usize) -> Result<Tensor> {
        ones(rows, cols)
    }

    /// See [`full`].
    pub fn full(rows: usize, cols: usize, value: f32) -> Result<Tensor> {
        full(rows, cols, value)
    }

    /// Fills the values with Xavier/Glorot uniform noise drawn from the thread RNG.
    ///
    /// Values are drawn from `[-limit, limit]` with `limit = sqrt(6 / (rows + cols))`.
    /// The gradient buffer and graph links are left untouched.
    pub fn random_init(&self) {
        self.random_init_with(&mut rand::thread_rng());
    }

    /// Same as [`Tensor::random_init`] but driven by the given RNG, for reproducible runs.
    pub fn random_init_with<R: Rng + ?Sized>(&self, rng: &mut R) {
        init::xavier_uniform_(self, rng);
    }
}
