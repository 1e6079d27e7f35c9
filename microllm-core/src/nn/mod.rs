//! Neural network building blocks composed from the differentiable operators.

pub mod init;
pub mod layers;
pub mod module;

pub use layers::{
    Embedding, Gpt, GptConfig, Linear, PositionalEmbedding, SelfAttention, TransformerBlock,
};
pub use module::Module;
