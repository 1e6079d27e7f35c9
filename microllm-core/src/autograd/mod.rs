//! # Reverse-mode automatic differentiation
//!
//! Operators record their operands and a [`BackwardOp`] on the tensors they
//! produce, forming a DAG. [`backward`] sorts that DAG topologically and replays
//! the backward operations from the root down to the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use graph::{backward, topological_sort, NodeId};
