mod common;

use approx::assert_relative_eq;
use microllm_core::autograd::topological_sort;
use microllm_core::ops::{
    add_bias_op, cross_entropy_loss_op, matmul_op, mse_loss_op, relu_op, softmax_op, sum_op,
};
use microllm_core::MicroLlmError;

use common::{init_logger, tensor};

#[test]
fn relu_of_linear_backward() {
    init_logger();
    let x = tensor(vec![1.0, -2.0, 3.0], 1, 3);
    let w = tensor(vec![0.5, 0.5, 0.5], 3, 1);
    let y = relu_op(&matmul_op(&x, &w).unwrap()).unwrap();
    assert_relative_eq!(y.item(), 1.0);

    y.backward().unwrap();
    assert_eq!(x.grad_to_vec(), vec![0.5, 0.5, 0.5]);
    assert_eq!(w.grad_to_vec(), vec![1.0, -2.0, 3.0]);
}

#[test]
fn perfect_regression_has_zero_loss_and_gradient() {
    let x = tensor(vec![1.0, 2.0, 3.0], 3, 1);
    let w = tensor(vec![2.0], 1, 1);
    let target = tensor(vec![2.0, 4.0, 6.0], 3, 1);
    let loss = mse_loss_op(&matmul_op(&x, &w).unwrap(), &target).unwrap();
    assert_eq!(loss.item(), 0.0);
    loss.backward().unwrap();
    assert_eq!(w.grad_to_vec(), vec![0.0]);
}

#[test]
fn regression_gradient_matches_closed_form() {
    // loss = mean((x w - t)^2), dL/dw = 2/n * sum(x (x w - t))
    let x = tensor(vec![1.0, 2.0, 3.0], 3, 1);
    let w = tensor(vec![0.5], 1, 1);
    let target = tensor(vec![2.0, 4.0, 6.0], 3, 1);
    let loss = mse_loss_op(&x.matmul(&w).unwrap(), &target).unwrap();
    loss.backward().unwrap();

    let expected: f32 = [1.0f32, 2.0, 3.0]
        .iter()
        .zip([2.0f32, 4.0, 6.0])
        .map(|(&xi, ti)| xi * (xi * 0.5 - ti))
        .sum::<f32>()
        * 2.0
        / 3.0;
    assert_relative_eq!(w.grad_get(0, 0), expected, epsilon = 1e-5);
    assert_relative_eq!(loss.item(), (1.5f32.powi(2) + 3.0f32.powi(2) + 4.5f32.powi(2)) / 3.0, epsilon = 1e-5);
}

#[test]
fn classifier_graph_collects_each_node_once() {
    // logits = x W + b; loss = CE(softmax(logits), onehot)
    let x = tensor(vec![0.2, -0.1, 0.4, 0.3], 2, 2);
    let w = tensor(vec![0.1, 0.2, -0.3, 0.4, 0.5, -0.6], 2, 3);
    let b = tensor(vec![0.0, 0.0, 0.0], 1, 3);
    let target = tensor(vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0], 2, 3);

    let logits = add_bias_op(&matmul_op(&x, &w).unwrap(), &b).unwrap();
    let probs = softmax_op(&logits).unwrap();
    let loss = cross_entropy_loss_op(&probs, &target).unwrap();

    let order = topological_sort(&loss).unwrap();
    // x, w, matmul, b, add_bias, softmax, loss
    assert_eq!(order.len(), 7);
    assert!(order.last().unwrap().ptr_eq(&loss));

    loss.backward().unwrap();
    // Softmax + cross-entropy: dlogits = (p - t) / rows, so db = column sums.
    let p = probs.to_vec();
    let t = target.to_vec();
    for j in 0..3 {
        let expected = ((p[j] - t[j]) + (p[3 + j] - t[3 + j])) / 2.0;
        assert_relative_eq!(b.grad_get(0, j), expected, epsilon = 1e-5);
    }
}

#[test]
fn gradients_accumulate_until_zeroed() {
    let a = tensor(vec![1.0, 2.0], 1, 2);
    let loss = sum_op(&a.multiply(&a).unwrap()).unwrap();
    loss.backward().unwrap();
    loss.backward().unwrap();
    assert_eq!(a.grad_to_vec(), vec![4.0, 8.0]);
    a.zero_grad();
    loss.backward().unwrap();
    assert_eq!(a.grad_to_vec(), vec![2.0, 4.0]);
}

#[test]
fn shape_errors_surface_from_public_api() {
    let a = tensor(vec![1.0; 6], 2, 3);
    let b = tensor(vec![1.0; 6], 2, 3);
    assert!(matches!(
        matmul_op(&a, &b),
        Err(MicroLlmError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        microllm_core::Tensor::from_vec(vec![], 0, 1),
        Err(MicroLlmError::InvalidShape { rows: 0, cols: 1 })
    ));
}
