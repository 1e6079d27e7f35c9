use crate::tensor::Tensor;

/// Checks that a tensor has the expected shape and values within `tolerance`.
/// Panics with the first differing index otherwise.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: [usize; 2],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    check_slice_near(&actual.data(), expected_data, tolerance);
}

/// Checks that a tensor's gradient matches `expected_grad` within `tolerance`.
pub fn check_grad_near(actual: &Tensor, expected_grad: &[f32], tolerance: f32) {
    check_slice_near(&actual.grad(), expected_grad, tolerance);
}

/// Element-wise comparison of two slices with an absolute tolerance.
pub fn check_slice_near(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple tensor for testing purposes.
pub fn create_test_tensor(data: Vec<f32>, rows: usize, cols: usize) -> Tensor {
    Tensor::from_vec(data, rows, cols).expect("Failed to create test tensor")
}
