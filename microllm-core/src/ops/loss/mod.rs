//! # Loss Functions
//!
//! Both losses compare a prediction with a target of the same shape and reduce
//! to a `1 x 1` tensor. The target is treated as a constant: it is not a
//! parent of the loss node and never receives a gradient.

pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::cross_entropy_loss_op;
pub use mse::mse_loss_op;

/// Added to predictions before taking the logarithm in cross-entropy.
pub const LOSS_EPSILON: f32 = 1e-7;
