use rand::Rng;

use crate::error::Result;
use crate::nn::layers::attention::SelfAttention;
use crate::nn::layers::linear::Linear;
use crate::nn::module::Module;
use crate::ops::{add_op, relu_op};
use crate::tensor::Tensor;

/// Pre-activation-free transformer block with residual connections:
///
/// ```text
/// h   = x + proj(attn(x))
/// out = h + ff_out(relu(ff_in(h)))
/// ```
#[derive(Debug, Clone)]
pub struct TransformerBlock {
    pub attention: SelfAttention,
    pub proj: Linear,
    pub ff_in: Linear,
    pub ff_out: Linear,
}

impl TransformerBlock {
    /// Creates a block with causal attention.
    pub fn new(embed_dim: usize, head_dim: usize, ff_dim: usize) -> Result<Self> {
        Self::with_rng(embed_dim, head_dim, ff_dim, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        embed_dim: usize,
        head_dim: usize,
        ff_dim: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(TransformerBlock {
            attention: SelfAttention::with_rng(embed_dim, head_dim, true, rng)?,
            proj: Linear::with_rng(head_dim, embed_dim, true, rng)?,
            ff_in: Linear::with_rng(embed_dim, ff_dim, true, rng)?,
            ff_out: Linear::with_rng(ff_dim, embed_dim, true, rng)?,
        })
    }
}

impl Module for TransformerBlock {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let attended = self.proj.forward(&self.attention.forward(input)?)?;
        let h = add_op(input, &attended)?;
        let ff = self.ff_out.forward(&relu_op(&self.ff_in.forward(&h)?)?)?;
        add_op(&h, &ff)
    }

    fn parameters(&self) -> Vec<Tensor> {
        let mut params = self.attention.parameters();
        params.extend(self.proj.parameters());
        params.extend(self.ff_in.parameters());
        params.extend(self.ff_out.parameters());
        params
    }
}

#[cfg(test)]
#[path = "transformer_test.rs"]
mod tests;
