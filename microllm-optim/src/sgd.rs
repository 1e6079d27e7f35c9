use log::debug;
use microllm_core::{MicroLlmError, Tensor};

use crate::{check_learning_rate, Optimizer};

/// Implements plain stochastic gradient descent.
///
/// Updates parameters `p` according to the rule:
/// `p = p - lr * grad(p)`
#[derive(Debug)]
pub struct Sgd {
    params: Vec<Tensor>,
    lr: f32,
}

impl Sgd {
    /// Creates a new SGD optimizer over `params`.
    ///
    /// # Errors
    /// `Configuration` if `lr` is not finite and strictly positive.
    pub fn new(params: impl IntoIterator<Item = Tensor>, lr: f32) -> Result<Self, MicroLlmError> {
        check_learning_rate(lr)?;
        let params: Vec<Tensor> = params.into_iter().collect();
        debug!("Sgd: created with {} parameter(s), lr = {}", params.len(), lr);
        Ok(Sgd { params, lr })
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), MicroLlmError> {
        debug!("Sgd: step() over {} parameter(s)", self.params.len());
        let lr = self.lr;
        for param in &self.params {
            param.update_data(|values, grad| {
                for (p, &g) in values.iter_mut().zip(grad) {
                    *p -= lr * g;
                }
            });
        }
        Ok(())
    }

    fn params(&self) -> &[Tensor] {
        &self.params
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
