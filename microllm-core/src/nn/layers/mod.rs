pub mod attention;
pub mod embedding;
pub mod gpt;
pub mod linear;
pub mod positional;
pub mod transformer;

pub use attention::SelfAttention;
pub use embedding::Embedding;
pub use gpt::{Gpt, GptConfig};
pub use linear::Linear;
pub use positional::PositionalEmbedding;
pub use transformer::TransformerBlock;
