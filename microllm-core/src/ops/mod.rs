//! # Tensor Operations Module (`ops`)
//!
//! This module is the differentiable operator library. Operations are grouped
//! into submodules by functionality.
//!
//! ## Structure:
//!
//! - **`_op` Functions:** Each operation has a core function (named `xxx_op`)
//!   that validates shapes, performs the forward computation and attaches the
//!   backward operation to its output. A `Tensor` method with the short name
//!   (`a.matmul(&b)`) forwards to it.
//! - **`Backward` Structs:** Each operation has a struct (e.g. `MatmulBackward`)
//!   implementing [`BackwardOp`](crate::autograd::BackwardOp). It stores what the
//!   vector-Jacobian product needs: operand handles and, for activations, the
//!   forward output values.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: element-wise add, sub, multiply, scale and row-broadcast bias addition.
//! - [`linalg`]: matmul and transpose.
//! - [`activation`]: relu, tanh, sigmoid and row-wise softmax.
//! - [`loss`]: mean squared error and cross-entropy, both reducing to 1x1.
//! - [`reduction`]: sum of all elements.
//! - [`view`]: row gathering (`index_select`) and causal masking.

use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
pub mod view;

pub use activation::{relu_op, sigmoid_op, softmax_op, tanh_op};
pub use arithmetic::{add_bias_op, add_op, mul_op, scale_op, sub_op};
pub use linalg::{matmul_op, transpose_op};
pub use loss::{cross_entropy_loss_op, mse_loss_op, LOSS_EPSILON};
pub use reduction::sum_op;
pub use view::{causal_mask_op, index_select_op, MASK_VALUE};

/// Fails with `ShapeMismatch` unless `a` and `b` have identical shapes.
pub(crate) fn check_same_shape(a: &Tensor, b: &Tensor, operation: &str) -> Result<()> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    if a_shape != b_shape {
        return Err(MicroLlmError::ShapeMismatch {
            operation: operation.to_string(),
            expected: a_shape.to_vec(),
            actual: b_shape.to_vec(),
        });
    }
    Ok(())
}

/// Allocates an operator output and links it to its backward operation.
pub(crate) fn new_op_output(
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    grad_fn: Rc<dyn BackwardOp>,
) -> Result<Tensor> {
    let output = Tensor::from_vec(data, rows, cols)?;
    output.set_grad_fn(Some(grad_fn));
    Ok(output)
}

/// Applies a unary element-wise operation to a tensor.
///
/// Handles output allocation and autograd setup.
///
/// # Arguments
/// * `a`: The input tensor.
/// * `op`: The element-wise function.
/// * `backward_builder`: Builds the `BackwardOp` from the forward output values
///   (activations such as tanh and sigmoid differentiate through their output).
pub(crate) fn apply_unary_op<F, B>(a: &Tensor, op: F, backward_builder: B) -> Result<Tensor>
where
    F: Fn(f32) -> f32,
    B: FnOnce(&[f32]) -> Rc<dyn BackwardOp>,
{
    let (rows, cols, output_data) = {
        let guard = a.read_data();
        let output_data: Vec<f32> = guard.data.iter().map(|&x| op(x)).collect();
        (guard.rows, guard.cols, output_data)
    };
    let grad_fn = backward_builder(&output_data);
    new_op_output(output_data, rows, cols, grad_fn)
}

/// Applies a binary element-wise operation to two tensors of identical shape.
///
/// # Errors
/// Returns `ShapeMismatch` (tagged with `op_name`) if the shapes differ.
pub(crate) fn apply_binary_op<F>(
    a: &Tensor,
    b: &Tensor,
    op: F,
    grad_fn: Rc<dyn BackwardOp>,
    op_name: &str,
) -> Result<Tensor>
where
    F: Fn(f32, f32) -> f32,
{
    check_same_shape(a, b, op_name)?;
    let [rows, cols] = a.shape();
    let output_data: Vec<f32> = {
        let a_data = a.data();
        let b_data = b.data();
        a_data.iter().zip(b_data.iter()).map(|(&x, &y)| op(x, y)).collect()
    };
    new_op_output(output_data, rows, cols, grad_fn)
}
