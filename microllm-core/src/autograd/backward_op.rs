use std::fmt::Debug;

use crate::error::Result;
use crate::tensor::Tensor;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operator that creates a non-leaf `Tensor` attaches an implementation of
/// this trait to its output's `grad_fn`. The implementation stores the context of
/// the forward pass (operand handles, cached forward values) and is invoked once
/// per `backward()` call, after the output's gradient is fully accumulated.
pub trait BackwardOp: Debug {
    /// Computes the vector-Jacobian product of the operation.
    ///
    /// Receives \( \frac{dL}{d\text{Output}} \) (`grad_output`, row-major, same
    /// length as the output) and returns one gradient buffer per input,
    /// \( \frac{dL}{d\text{Input}_i} \), each with the length of that input.
    ///
    /// The returned buffers are *contributions*: the engine adds them to the
    /// inputs' existing gradients, it never overwrites.
    ///
    /// # Returns
    /// The order of the returned buffers **must** match the order of [`BackwardOp::inputs`].
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>>;

    /// Returns the operand tensors of the forward call (the node's parents), in order.
    ///
    /// The operation holds strong handles, so parents stay alive for as long as
    /// the output node does.
    fn inputs(&self) -> Vec<Tensor>;

    /// Short operation name, used in logs and error messages.
    fn name(&self) -> &'static str;
}
