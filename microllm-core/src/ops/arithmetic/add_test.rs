use crate::autograd::grad_check::check_grad;
use crate::error::MicroLlmError;
use crate::ops::arithmetic::add_op;
use crate::tensor::Tensor;
use crate::utils::testing::{check_grad_near, check_tensor_near, create_test_tensor};

#[test]
fn test_add_tensors_ok() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], 2, 2);
    let result = add_op(&t1, &t2).unwrap();
    check_tensor_near(&result, [2, 2], &[6.0, 8.0, 10.0, 12.0], 0.0);
    assert_eq!(result.parents().len(), 2);
}

#[test]
fn test_add_shape_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0], 1, 2);
    let t2 = create_test_tensor(vec![1.0, 2.0], 2, 1);
    let err = add_op(&t1, &t2).unwrap_err();
    assert_eq!(
        err,
        MicroLlmError::ShapeMismatch {
            operation: "add".to_string(),
            expected: vec![1, 2],
            actual: vec![2, 1],
        }
    );
}

#[test]
fn test_add_backward() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0], 1, 3);
    let b = create_test_tensor(vec![4.0, 5.0, 6.0], 1, 3);
    let c = add_op(&a, &b).unwrap();
    c.backward().unwrap();
    check_grad_near(&a, &[1.0, 1.0, 1.0], 0.0);
    check_grad_near(&b, &[1.0, 1.0, 1.0], 0.0);
}

#[test]
fn test_add_same_operand_accumulates() {
    let a = create_test_tensor(vec![1.0, -1.0], 1, 2);
    let c = add_op(&a, &a).unwrap();
    c.backward().unwrap();
    check_tensor_near(&c, [1, 2], &[2.0, -2.0], 0.0);
    check_grad_near(&a, &[2.0, 2.0], 0.0);
}

#[test]
fn test_add_backward_grad_check() {
    let a = create_test_tensor(vec![0.5, -1.0, 2.0, 0.1], 2, 2);
    let b = create_test_tensor(vec![1.5, 0.3, -0.7, 0.9], 2, 2);
    let func = |inputs: &[Tensor]| add_op(&inputs[0], &inputs[1]);
    check_grad(func, &[a, b], 1e-2, 1e-3, 1e-3)
        .unwrap_or_else(|e| panic!("Add grad check failed: {:?}", e));
}
