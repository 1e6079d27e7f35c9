use rand::Rng;

use crate::error::Result;
use crate::nn::init;
use crate::nn::module::Module;
use crate::ops::{add_bias_op, matmul_op};
use crate::tensor::Tensor;

/// Applies a linear transformation to the incoming data: `y = x W + b`.
///
/// `weight` is `in_features x out_features` so a batch of row vectors
/// (`n x in_features`) maps to `n x out_features` with a single matmul.
#[derive(Debug, Clone)]
pub struct Linear {
    pub weight: Tensor,
    pub bias: Option<Tensor>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a new Linear layer with Xavier-initialized weights and a zero bias.
    ///
    /// # Errors
    /// `InvalidShape` if either feature count is zero.
    pub fn new(in_features: usize, out_features: usize, has_bias: bool) -> Result<Self> {
        Self::with_rng(in_features, out_features, has_bias, &mut rand::thread_rng())
    }

    /// Same as [`Linear::new`] with weights drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self> {
        let weight = Tensor::new(in_features, out_features)?;
        init::xavier_uniform_(&weight, rng);
        let bias = if has_bias {
            Some(Tensor::new(1, out_features)?)
        } else {
            None
        };
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let output = matmul_op(input, &self.weight)?;
        match &self.bias {
            Some(bias) => add_bias_op(&output, bias),
            None => Ok(output),
        }
    }

    fn parameters(&self) -> Vec<Tensor> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
