use log::debug;
use rand::Rng;

use crate::error::{MicroLlmError, Result};
use crate::nn::layers::embedding::{token_ids, Embedding};
use crate::nn::layers::linear::Linear;
use crate::nn::layers::positional::PositionalEmbedding;
use crate::nn::layers::transformer::TransformerBlock;
use crate::nn::module::Module;
use crate::ops::softmax_op;
use crate::tensor::Tensor;

/// Hyperparameters of a [`Gpt`] model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GptConfig {
    pub vocab_size: usize,
    pub embed_dim: usize,
    pub max_seq_len: usize,
    pub head_dim: usize,
    pub ff_dim: usize,
    pub num_layers: usize,
}

impl Default for GptConfig {
    fn default() -> Self {
        GptConfig {
            vocab_size: 4,
            embed_dim: 8,
            max_seq_len: 4,
            head_dim: 8,
            ff_dim: 16,
            num_layers: 1,
        }
    }
}

impl GptConfig {
    /// Fails with `Configuration` if any dimension is zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("vocab_size", self.vocab_size),
            ("embed_dim", self.embed_dim),
            ("max_seq_len", self.max_seq_len),
            ("head_dim", self.head_dim),
            ("ff_dim", self.ff_dim),
            ("num_layers", self.num_layers),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(MicroLlmError::Configuration(format!(
                    "GptConfig.{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// A small decoder-only language model.
///
/// Token ids are embedded, summed with learned position embeddings, passed
/// through `num_layers` causal [`TransformerBlock`]s and projected to one row
/// of vocabulary logits per position.
#[derive(Debug, Clone)]
pub struct Gpt {
    config: GptConfig,
    pub token_embedding: Embedding,
    pub position_embedding: PositionalEmbedding,
    pub blocks: Vec<TransformerBlock>,
    pub lm_head: Linear,
}

impl Gpt {
    pub fn new(config: GptConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds the model with every parameter drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: GptConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let token_embedding = Embedding::with_rng(config.vocab_size, config.embed_dim, rng)?;
        let position_embedding =
            PositionalEmbedding::with_rng(config.max_seq_len, config.embed_dim, rng)?;
        let blocks = (0..config.num_layers)
            .map(|_| TransformerBlock::with_rng(config.embed_dim, config.head_dim, config.ff_dim, rng))
            .collect::<Result<Vec<_>>>()?;
        let lm_head = Linear::with_rng(config.embed_dim, config.vocab_size, true, rng)?;
        let model = Gpt {
            config,
            token_embedding,
            position_embedding,
            blocks,
            lm_head,
        };
        debug!(
            "Gpt: {:?}, {} parameter tensors, {} scalars",
            config,
            model.parameters().len(),
            model.num_parameters()
        );
        Ok(model)
    }

    pub fn config(&self) -> &GptConfig {
        &self.config
    }

    /// Computes `ids.len() x vocab_size` logits for a token sequence.
    ///
    /// # Errors
    /// `IndexOutOfRange` for an id outside the vocabulary, `SequenceTooLong`
    /// beyond `max_seq_len`.
    pub fn forward_ids(&self, ids: &[usize]) -> Result<Tensor> {
        let embedded = self.token_embedding.lookup(ids)?;
        self.forward_embedded(&embedded)
    }

    fn forward_embedded(&self, embedded: &Tensor) -> Result<Tensor> {
        let mut x = self.position_embedding.forward(embedded)?;
        for block in &self.blocks {
            x = block.forward(&x)?;
        }
        self.lm_head.forward(&x)
    }

    /// Most likely next token at every position (argmax of the softmax row).
    pub fn predict(&self, ids: &[usize]) -> Result<Vec<(usize, f32)>> {
        let probs = softmax_op(&self.forward_ids(ids)?)?;
        let vocab = self.config.vocab_size;
        let data = probs.data();
        let predictions = data
            .chunks(vocab)
            .map(|row| {
                row.iter()
                    .copied()
                    .enumerate()
                    .fold((0, f32::NEG_INFINITY), |best, (j, p)| if p > best.1 { (j, p) } else { best })
            })
            .collect();
        Ok(predictions)
    }
}

impl Module for Gpt {
    /// `input` is an `n x 1` (or `1 x n`) tensor of token ids; returns `n x vocab_size` logits.
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let ids = token_ids(input)?;
        self.forward_ids(&ids)
    }

    fn parameters(&self) -> Vec<Tensor> {
        let mut params = self.token_embedding.parameters();
        params.extend(self.position_embedding.parameters());
        for block in &self.blocks {
            params.extend(block.parameters());
        }
        params.extend(self.lm_head.parameters());
        params
    }
}

#[cfg(test)]
#[path = "gpt_test.rs"]
mod tests;
