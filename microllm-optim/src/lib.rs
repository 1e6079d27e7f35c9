//! # microllm-optim
//!
//! Gradient-descent optimizers updating `microllm-core` parameters in place.
//!
//! An optimizer owns handles to the parameters it updates. Since a `Tensor`
//! handle shares storage with the model that created it, stepping the
//! optimizer updates the model directly:
//!
//! ```
//! use microllm_core::nn::{Linear, Module};
//! use microllm_optim::{Optimizer, Sgd};
//!
//! let layer = Linear::new(2, 1, true)?;
//! let mut optimizer = Sgd::new(layer.parameters(), 0.1)?;
//! let x = microllm_core::Tensor::from_vec(vec![1.0, 2.0], 1, 2)?;
//! layer.forward(&x)?.backward()?;
//! optimizer.step()?;
//! optimizer.zero_grad();
//! # Ok::<(), microllm_core::MicroLlmError>(())
//! ```

use microllm_core::{MicroLlmError, Tensor};

pub mod adam;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use sgd::Sgd;

/// Trait for optimization algorithms.
/// Optimizers update the parameters of a model based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step (parameter update) from the
    /// gradients currently accumulated on the parameters.
    fn step(&mut self) -> Result<(), MicroLlmError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    /// Should be called before the backward pass to avoid accumulating gradients
    /// from multiple iterations.
    fn zero_grad(&mut self) {
        for param in self.params() {
            param.zero_grad();
        }
    }

    /// The parameters this optimizer updates.
    fn params(&self) -> &[Tensor];
}

/// Fails with `Configuration` unless `lr` is finite and strictly positive.
pub(crate) fn check_learning_rate(lr: f32) -> Result<(), MicroLlmError> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(MicroLlmError::Configuration(format!(
            "learning rate must be finite and > 0, got {}",
            lr
        )));
    }
    Ok(())
}
