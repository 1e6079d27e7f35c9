use rand::Rng;

use crate::error::Result;
use crate::nn::layers::linear::Linear;
use crate::nn::module::Module;
use crate::ops::{causal_mask_op, matmul_op, scale_op, softmax_op, transpose_op};
use crate::tensor::Tensor;

/// Single-head scaled dot-product self-attention.
///
/// For an `n x embed_dim` input `X`:
/// `Q = X Wq`, `K = X Wk`, `V = X Wv`,
/// `A = softmax(Q K^T / sqrt(head_dim))`, output `A V` (`n x head_dim`).
/// With `causal` set, position `i` only attends to positions `<= i`.
#[derive(Debug, Clone)]
pub struct SelfAttention {
    pub query: Linear,
    pub key: Linear,
    pub value: Linear,
    head_dim: usize,
    causal: bool,
}

impl SelfAttention {
    pub fn new(embed_dim: usize, head_dim: usize, causal: bool) -> Result<Self> {
        Self::with_rng(embed_dim, head_dim, causal, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        embed_dim: usize,
        head_dim: usize,
        causal: bool,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(SelfAttention {
            query: Linear::with_rng(embed_dim, head_dim, false, rng)?,
            key: Linear::with_rng(embed_dim, head_dim, false, rng)?,
            value: Linear::with_rng(embed_dim, head_dim, false, rng)?,
            head_dim,
            causal,
        })
    }

    pub fn head_dim(&self) -> usize {
        self.head_dim
    }

    pub fn is_causal(&self) -> bool {
        self.causal
    }

    /// Returns the `n x n` attention weights for `input`. Each row sums to one.
    pub fn attention_weights(&self, input: &Tensor) -> Result<Tensor> {
        let q = self.query.forward(input)?;
        let k = self.key.forward(input)?;
        let scores = matmul_op(&q, &transpose_op(&k)?)?;
        let mut scores = scale_op(&scores, 1.0 / (self.head_dim as f32).sqrt())?;
        if self.causal {
            scores = causal_mask_op(&scores)?;
        }
        softmax_op(&scores)
    }
}

impl Module for SelfAttention {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let weights = self.attention_weights(input)?;
        let v = self.value.forward(input)?;
        matmul_op(&weights, &v)
    }

    fn parameters(&self) -> Vec<Tensor> {
        let mut params = self.query.parameters();
        params.extend(self.key.parameters());
        params.extend(self.value.parameters());
        params
    }
}

#[cfg(test)]
#[path = "attention_test.rs"]
mod tests;
