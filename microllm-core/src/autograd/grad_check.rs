use thiserror::Error;

use crate::error::MicroLlmError;
use crate::tensor::Tensor;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] MicroLlmError),
}

/// Sum of all output values, accumulated in f64.
fn total(output: &Tensor) -> f64 {
    output.data().iter().map(|&x| x as f64).sum()
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// The scalar being differentiated is the sum of all elements of `func(inputs)`:
/// seeding the output gradient with ones (what `backward` does) yields exactly
/// its gradient. Each input element is perturbed by `±epsilon` in place and
/// restored afterwards.
///
/// An element passes when `|analytical - numerical| <= abs_tol + rel_tol * |numerical|`.
///
/// # Errors
/// Returns the first mismatching element, or the error raised by `func`/`backward`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f32,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, MicroLlmError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    // --- Analytical gradients ---
    let output = func(inputs)?;
    output.backward()?;
    let analytical: Vec<Vec<f32>> = inputs.iter().map(|t| t.grad_to_vec()).collect();

    // --- Numerical gradients ---
    for (input_index, input) in inputs.iter().enumerate() {
        for element_index in 0..input.numel() {
            let original = input.read_data().data[element_index];

            input.write_data().data[element_index] = original + epsilon;
            let loss_plus = total(&func(inputs)?);
            input.write_data().data[element_index] = original - epsilon;
            let loss_minus = total(&func(inputs)?);
            input.write_data().data[element_index] = original;

            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon as f64);
            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_grad = analytical[input_index][element_index] as f64;
            let difference = (analytical_grad - numerical_grad).abs();
            if difference > abs_tol + rel_tol * numerical_grad.abs() {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    for input in inputs {
        input.zero_grad();
    }
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
