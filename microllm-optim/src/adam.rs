use log::debug;
use microllm_core::{MicroLlmError, Tensor};

use crate::{check_learning_rate, Optimizer};

/// Hyperparameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub eps: f32,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
        }
    }
}

impl AdamConfig {
    /// Default configuration with the given learning rate.
    pub fn with_lr(lr: f32) -> Self {
        AdamConfig {
            lr,
            ..Self::default()
        }
    }

    /// Checks `lr > 0`, both betas in `[0, 1)` and `eps > 0`.
    pub fn validate(&self) -> Result<(), MicroLlmError> {
        check_learning_rate(self.lr)?;
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(MicroLlmError::Configuration(format!(
                    "{} must be in [0, 1), got {}",
                    name, beta
                )));
            }
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(MicroLlmError::Configuration(format!(
                "eps must be finite and > 0, got {}",
                self.eps
            )));
        }
        Ok(())
    }
}

/// Implements the Adam optimization algorithm.
/// Reference: https://arxiv.org/abs/1412.6980
///
/// Keeps an exponential moving average of the gradient (`m`) and of its
/// square (`v`) per parameter element, both starting at zero and
/// bias-corrected by the step counter `t`.
#[derive(Debug)]
pub struct Adam {
    params: Vec<Tensor>,
    config: AdamConfig,
    t: u64,
    moments1: Vec<Vec<f32>>,
    moments2: Vec<Vec<f32>>,
}

impl Adam {
    /// Creates a new Adam optimizer over `params`.
    ///
    /// # Errors
    /// `Configuration` if `config` fails [`AdamConfig::validate`].
    pub fn new(params: impl IntoIterator<Item = Tensor>, config: AdamConfig) -> Result<Self, MicroLlmError> {
        config.validate()?;
        let params: Vec<Tensor> = params.into_iter().collect();
        let moments1 = params.iter().map(|p| vec![0.0; p.numel()]).collect();
        let moments2 = params.iter().map(|p| vec![0.0; p.numel()]).collect();
        debug!("Adam: created with {} parameter(s), {:?}", params.len(), config);
        Ok(Adam {
            params,
            config,
            t: 0,
            moments1,
            moments2,
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self) -> Result<(), MicroLlmError> {
        self.t += 1;
        let AdamConfig {
            lr,
            beta1,
            beta2,
            eps,
        } = self.config;
        let exponent = i32::try_from(self.t).unwrap_or(i32::MAX);
        let bias_correction1 = 1.0 - beta1.powi(exponent);
        let bias_correction2 = 1.0 - beta2.powi(exponent);
        debug!(
            "Adam: step t = {}, bias corrections ({}, {})",
            self.t, bias_correction1, bias_correction2
        );

        for ((param, m), v) in self
            .params
            .iter()
            .zip(self.moments1.iter_mut())
            .zip(self.moments2.iter_mut())
        {
            param.update_data(|values, grad| {
                for (((p, &g), m_i), v_i) in values
                    .iter_mut()
                    .zip(grad)
                    .zip(m.iter_mut())
                    .zip(v.iter_mut())
                {
                    *m_i = beta1 * *m_i + (1.0 - beta1) * g;
                    *v_i = beta2 * *v_i + (1.0 - beta2) * g * g;
                    let m_hat = *m_i / bias_correction1;
                    let v_hat = *v_i / bias_correction2;
                    *p -= lr * m_hat / (v_hat.sqrt() + eps);
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
#[path = "adam_test.rs"]
mod tests;
