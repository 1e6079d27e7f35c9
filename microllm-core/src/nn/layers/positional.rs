use rand::Rng;

use crate::error::{MicroLlmError, Result};
use crate::nn::init;
use crate::nn::module::Module;
use crate::ops::{add_op, index_select_op};
use crate::tensor::Tensor;

/// Learned absolute position embeddings, added to the token embeddings.
#[derive(Debug, Clone)]
pub struct PositionalEmbedding {
    pub weight: Tensor,
}

impl PositionalEmbedding {
    /// Creates a `max_len x embed_dim` Xavier-initialized table.
    pub fn new(max_len: usize, embed_dim: usize) -> Result<Self> {
        Self::with_rng(max_len, embed_dim, &mut rand::thread_rng())
    }

    /// Same as [`PositionalEmbedding::new`] with the table drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(max_len: usize, embed_dim: usize, rng: &mut R) -> Result<Self> {
        let weight = Tensor::new(max_len, embed_dim)?;
        init::xavier_uniform_(&weight, rng);
        Ok(PositionalEmbedding { weight })
    }

    pub fn max_len(&self) -> usize {
        self.weight.rows()
    }
}

impl Module for PositionalEmbedding {
    /// Adds the embedding of position `i` to row `i` of `input`.
    ///
    /// # Errors
    /// `SequenceTooLong` if `input` has more rows than `max_len`.
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let len = input.rows();
        if len > self.max_len() {
            return Err(MicroLlmError::SequenceTooLong {
                len,
                max: self.max_len(),
            });
        }
        let positions: Vec<usize> = (0..len).collect();
        let pos = index_select_op(&self.weight, &positions)?;
        add_op(input, &pos)
    }

    fn parameters(&self) -> Vec<Tensor> {
        vec![self.weight.clone()]
    }
}

#[cfg(test)]
#[path = "positional_test.rs"]
mod tests;
