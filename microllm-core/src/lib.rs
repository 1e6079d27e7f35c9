//! # microllm-core
//!
//! 2-D `f32` tensors with reverse-mode automatic differentiation, the
//! differentiable operators built on them, and the layers of a small GPT-style
//! language model.
//!
//! ```
//! use microllm_core::{ops, Tensor};
//!
//! let x = Tensor::from_vec(vec![1.0, -2.0, 3.0], 1, 3)?;
//! let w = Tensor::from_vec(vec![0.5, 0.5, 0.5], 3, 1)?;
//! let y = ops::relu_op(&x.matmul(&w)?)?;
//! y.backward()?;
//! assert_eq!(w.grad_to_vec(), vec![1.0, -2.0, 3.0]);
//! # Ok::<(), microllm_core::MicroLlmError>(())
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

pub use error::{MicroLlmError, Result};
pub use tensor::Tensor;
