use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autograd::grad_check::check_grad;
use crate::error::MicroLlmError;
use crate::nn::{Linear, Module};
use crate::tensor::Tensor;
use crate::utils::testing::{check_grad_near, check_tensor_near, create_test_tensor};

#[test]
fn test_linear_creation() {
    let linear = Linear::new(10, 5, true).unwrap();
    assert_eq!(linear.weight.shape(), [10, 5]);
    let bias = linear.bias.as_ref().unwrap();
    assert_eq!(bias.shape(), [1, 5]);
    assert!(bias.to_vec().iter().all(|&b| b == 0.0));
    assert_eq!(linear.parameters().len(), 2);
    assert_eq!(linear.num_parameters(), 55);

    let limit = (6.0f32 / 15.0).sqrt();
    assert!(linear.weight.to_vec().iter().all(|w| w.abs() <= limit));
}

#[test]
fn test_linear_no_bias() {
    let linear = Linear::new(3, 2, false).unwrap();
    assert!(linear.bias.is_none());
    assert_eq!(linear.parameters().len(), 1);
    assert_eq!((linear.in_features(), linear.out_features()), (3, 2));
}

#[test]
fn test_linear_zero_features() {
    assert!(matches!(
        Linear::new(0, 2, true),
        Err(MicroLlmError::InvalidShape { .. })
    ));
}

#[test]
fn test_linear_forward_with_manual_weights() {
    let linear = Linear::new(3, 2, true).unwrap();
    linear.weight.set_data(&[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
    linear.bias.as_ref().unwrap().set_data(&[0.5, -1.0]).unwrap();

    let input = create_test_tensor(vec![1.0, 1.0, 1.0, 1.0, 0.0, -1.0], 2, 3);
    let output = linear.forward(&input).unwrap();
    check_tensor_near(&output, [2, 2], &[6.5, 14.0, -1.5, -3.0], 1e-6);
}

#[test]
fn test_linear_backward_bias_sums_rows() {
    let linear = Linear::new(3, 2, true).unwrap();
    let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
    let output = linear.forward(&input).unwrap();
    output.backward().unwrap();

    check_grad_near(linear.bias.as_ref().unwrap(), &[2.0, 2.0], 0.0);
    // dW = x^T . ones
    check_grad_near(&linear.weight, &[5.0, 5.0, 7.0, 7.0, 9.0, 9.0], 1e-6);

    linear.zero_grad();
    assert!(linear.weight.grad_to_vec().iter().all(|&g| g == 0.0));
}

#[test]
fn test_linear_grad_check() {
    let linear = Linear::with_rng(3, 2, true, &mut StdRng::seed_from_u64(3)).unwrap();
    let input = create_test_tensor(vec![0.2, -0.4, 1.0, 0.7, 0.1, -0.3], 2, 3);
    let mut inputs = vec![input];
    inputs.extend(linear.parameters());
    // The parameter handles share storage with the layer, so perturbing
    // `inputs[1..]` perturbs the layer itself.
    let func = |ts: &[Tensor]| linear.forward(&ts[0])?.tanh();
    check_grad(func, &inputs, 1e-2, 1e-3, 1e-2)
        .unwrap_or_else(|e| panic!("Linear grad check failed: {:?}", e));
}
