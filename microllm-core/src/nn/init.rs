//! In-place parameter initialization.
//!
//! These helpers only write values: gradients and graph links are left as they are.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::tensor::Tensor;

/// Fills the input `Tensor` with the scalar value 0.
pub fn zeros_(tensor: &Tensor) {
    fill_(tensor, 0.0);
}

/// Fills the input `Tensor` with the scalar value 1.
pub fn ones_(tensor: &Tensor) {
    fill_(tensor, 1.0);
}

/// Fills the input `Tensor` with `value`.
pub fn fill_(tensor: &Tensor, value: f32) {
    tensor.write_data().data.fill(value);
}

/// Xavier/Glorot uniform initialization.
///
/// Draws every value from `U[-limit, limit]` with
/// `limit = sqrt(6 / (rows + cols))`, treating `rows` as fan-in and `cols` as
/// fan-out.
pub fn xavier_uniform_<R: Rng + ?Sized>(tensor: &Tensor, rng: &mut R) {
    let mut guard = tensor.write_data();
    let limit = (6.0 / (guard.rows + guard.cols) as f32).sqrt();
    let dist = Uniform::new_inclusive(-limit, limit);
    for x in guard.data.iter_mut() {
        *x = dist.sample(rng);
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
