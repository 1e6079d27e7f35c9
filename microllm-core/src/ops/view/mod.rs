//! Row gathering and masking.

pub mod index_select;
pub mod masked_fill;

pub use index_select::index_select_op;
pub use masked_fill::{causal_mask_op, MASK_VALUE};
