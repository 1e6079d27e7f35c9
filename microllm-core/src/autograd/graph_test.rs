use std::rc::Rc;

use crate::autograd::{topological_sort, BackwardOp};
use crate::error::{MicroLlmError, Result};
use crate::ops::{add_op, matmul_op, mul_op, relu_op, scale_op};
use crate::tensor::Tensor;
use crate::utils::testing::{check_grad_near, check_tensor_near, create_test_tensor};

/// Hand-written op used to build graphs operators cannot produce.
#[derive(Debug)]
struct FakeOp {
    inputs: Vec<Tensor>,
    outputs: usize,
}

impl BackwardOp for FakeOp {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        Ok(vec![grad_output.to_vec(); self.outputs])
    }

    fn inputs(&self) -> Vec<Tensor> {
        self.inputs.clone()
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

#[test]
fn test_topological_sort_parents_first() {
    let a = create_test_tensor(vec![1.0], 1, 1);
    let b = create_test_tensor(vec![2.0], 1, 1);
    let c = add_op(&a, &b).unwrap();
    let d = mul_op(&c, &a).unwrap();

    let sorted = topological_sort(&d).unwrap();
    assert_eq!(sorted.len(), 4);
    let pos = |t: &Tensor| sorted.iter().position(|s| s.ptr_eq(t)).unwrap();
    assert!(pos(&a) < pos(&c));
    assert!(pos(&b) < pos(&c));
    assert!(pos(&c) < pos(&d));
    assert_eq!(pos(&d), 3);
}

#[test]
fn test_leaf_backward_seeds_ones() {
    let a = create_test_tensor(vec![1.0, 2.0], 1, 2);
    a.backward().unwrap();
    assert_eq!(a.grad_to_vec(), vec![1.0, 1.0]);
}

#[test]
fn test_diamond_graph_processed_once() {
    // y = a*b + a  ->  dy/da = b + 1, dy/db = a
    let a = create_test_tensor(vec![2.0], 1, 1);
    let b = create_test_tensor(vec![3.0], 1, 1);
    let ab = mul_op(&a, &b).unwrap();
    let y = add_op(&ab, &a).unwrap();
    y.backward().unwrap();

    check_grad_near(&a, &[4.0], 0.0);
    check_grad_near(&b, &[2.0], 0.0);
    check_grad_near(&ab, &[1.0], 0.0);
}

#[test]
fn test_shared_intermediate_receives_full_gradient() {
    // h = 2x, y = h*h  ->  dy/dx = 2h * 2 = 8x
    let x = create_test_tensor(vec![1.5], 1, 1);
    let h = scale_op(&x, 2.0).unwrap();
    let y = mul_op(&h, &h).unwrap();
    y.backward().unwrap();
    check_grad_near(&h, &[6.0], 1e-6);
    check_grad_near(&x, &[12.0], 1e-6);
}

#[test]
fn test_repeated_backward_accumulates() {
    let a = create_test_tensor(vec![1.0, 2.0], 1, 2);
    let b = create_test_tensor(vec![3.0, 4.0], 1, 2);
    let c = mul_op(&a, &b).unwrap();

    c.backward().unwrap();
    c.backward().unwrap();
    check_grad_near(&a, &[6.0, 8.0], 0.0);
    check_grad_near(&b, &[2.0, 4.0], 0.0);
    // The root is re-seeded, not accumulated.
    check_grad_near(&c, &[1.0, 1.0], 0.0);

    a.zero_grad();
    b.zero_grad();
    c.backward().unwrap();
    check_grad_near(&a, &[3.0, 4.0], 0.0);
}

#[test]
fn test_repeated_backward_doubles_through_intermediates() {
    let x = create_test_tensor(vec![1.0, -2.0, 3.0], 1, 3);
    let w = create_test_tensor(vec![0.5, 0.5, 0.5], 3, 1);
    let xw = matmul_op(&x, &w).unwrap();
    let y = relu_op(&xw).unwrap();

    y.backward().unwrap();
    y.backward().unwrap();
    check_grad_near(&x, &[1.0, 1.0, 1.0], 1e-7);
    check_grad_near(&w, &[2.0, -4.0, 6.0], 1e-7);
    // The intermediate holds one pass worth of gradient, not two.
    check_grad_near(&xw, &[1.0], 0.0);
}

#[test]
fn test_repeated_backward_three_levels() {
    // y = relu(2 * (a * a)), dy/da = 4a for positive a.
    let a = create_test_tensor(vec![1.0, 2.0], 1, 2);
    let sq = mul_op(&a, &a).unwrap();
    let y = relu_op(&scale_op(&sq, 2.0).unwrap()).unwrap();

    for _ in 0..3 {
        y.backward().unwrap();
    }
    check_grad_near(&a, &[12.0, 24.0], 1e-6);
    check_grad_near(&sq, &[2.0, 2.0], 0.0);
}

#[test]
fn test_relu_of_linear_scenario() {
    // [1, -2, 3] . [0.5, 0.5, 0.5] = 1.0, relu keeps it.
    let x = create_test_tensor(vec![1.0, -2.0, 3.0], 1, 3);
    let w = create_test_tensor(vec![0.5, 0.5, 0.5], 3, 1);
    let y = relu_op(&matmul_op(&x, &w).unwrap()).unwrap();
    check_tensor_near(&y, [1, 1], &[1.0], 1e-7);

    y.backward().unwrap();
    check_grad_near(&x, &[0.5, 0.5, 0.5], 1e-7);
    check_grad_near(&w, &[1.0, -2.0, 3.0], 1e-7);
}

#[test]
fn test_cycle_detected() {
    let a = create_test_tensor(vec![1.0], 1, 1);
    let b = relu_op(&a).unwrap();
    a.set_grad_fn(Some(Rc::new(FakeOp {
        inputs: vec![b.clone()],
        outputs: 1,
    })));

    assert_eq!(b.backward().unwrap_err(), MicroLlmError::CycleDetected);
    assert!(matches!(topological_sort(&a), Err(MicroLlmError::CycleDetected)));

    // Break the cycle so both nodes are freed.
    a.set_grad_fn(None);
}

#[test]
fn test_backward_arity_mismatch() {
    let a = create_test_tensor(vec![1.0], 1, 1);
    let out = create_test_tensor(vec![1.0], 1, 1);
    out.set_grad_fn(Some(Rc::new(FakeOp {
        inputs: vec![a.clone()],
        outputs: 2,
    })));
    assert_eq!(
        out.backward().unwrap_err(),
        MicroLlmError::GradientAccumulation {
            operation: "fake".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_backward_contribution_length_mismatch() {
    let a = create_test_tensor(vec![1.0, 2.0], 1, 2);
    let out = create_test_tensor(vec![1.0], 1, 1);
    out.set_grad_fn(Some(Rc::new(FakeOp {
        inputs: vec![a.clone()],
        outputs: 1,
    })));
    assert!(matches!(
        out.backward(),
        Err(MicroLlmError::GradientAccumulation { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn test_deep_chain_does_not_overflow() {
    const DEPTH: usize = 5_000;
    let x = create_test_tensor(vec![1.0], 1, 1);
    let mut nodes = vec![x.clone()];
    for _ in 0..DEPTH {
        let next = scale_op(nodes.last().unwrap(), 1.0).unwrap();
        nodes.push(next);
    }
    nodes.last().unwrap().backward().unwrap();
    check_grad_near(&x, &[1.0], 0.0);

    // Release from the root down so dropping never recurses through the chain.
    while let Some(node) = nodes.pop() {
        drop(node);
    }
}
