use rand::Rng;

use crate::error::{MicroLlmError, Result};
use crate::nn::init;
use crate::nn::module::Module;
use crate::ops::index_select_op;
use crate::tensor::Tensor;

/// Token embedding table: maps token ids to learned `embed_dim` vectors.
#[derive(Debug, Clone)]
pub struct Embedding {
    pub weight: Tensor,
}

impl Embedding {
    /// Creates a `vocab_size x embed_dim` Xavier-initialized table.
    pub fn new(vocab_size: usize, embed_dim: usize) -> Result<Self> {
        Self::with_rng(vocab_size, embed_dim, &mut rand::thread_rng())
    }

    /// Same as [`Embedding::new`] with the table drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(vocab_size: usize, embed_dim: usize, rng: &mut R) -> Result<Self> {
        let weight = Tensor::new(vocab_size, embed_dim)?;
        init::xavier_uniform_(&weight, rng);
        Ok(Embedding { weight })
    }

    pub fn vocab_size(&self) -> usize {
        self.weight.rows()
    }

    pub fn embed_dim(&self) -> usize {
        self.weight.cols()
    }

    /// Gathers the rows for `ids` into an `ids.len() x embed_dim` tensor.
    ///
    /// # Errors
    /// `IndexOutOfRange` if an id is `>= vocab_size`, `InvalidShape` if `ids` is empty.
    pub fn lookup(&self, ids: &[usize]) -> Result<Tensor> {
        index_select_op(&self.weight, ids)
    }
}

/// Converts a column or row vector of float-encoded ids to indices.
pub(crate) fn token_ids(input: &Tensor) -> Result<Vec<usize>> {
    let [rows, cols] = input.shape();
    if rows != 1 && cols != 1 {
        return Err(MicroLlmError::ShapeMismatch {
            operation: "embedding (token ids)".to_string(),
            expected: vec![rows * cols, 1],
            actual: vec![rows, cols],
        });
    }
    input
        .data()
        .iter()
        .map(|&value| {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                Ok(value as usize)
            } else {
                Err(MicroLlmError::InvalidTokenId { value })
            }
        })
        .collect()
}

impl Module for Embedding {
    /// `input` holds one token id per element, as an `n x 1` or `1 x n` tensor.
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let ids = token_ids(input)?;
        self.lookup(&ids)
    }

    fn parameters(&self) -> Vec<Tensor> {
        vec![self.weight.clone()]
    }
}

#[cfg(test)]
#[path = "embedding_test.rs"]
mod tests;
