use crate::ops::reduction::sum_op;
use crate::utils::testing::{check_grad_near, check_tensor_near, create_test_tensor};

#[test]
fn test_sum_all() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
    let s = sum_op(&t).unwrap();
    check_tensor_near(&s, [1, 1], &[21.0], 0.0);
    assert_eq!(s.item(), 21.0);
}

#[test]
fn test_sum_backward() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
    let s = t.sum().unwrap();
    s.backward().unwrap();
    check_grad_near(&t, &[1.0; 4], 0.0);
}

#[test]
fn test_sum_of_sum() {
    let t = create_test_tensor(vec![-1.0, 2.5], 1, 2);
    let s = sum_op(&sum_op(&t).unwrap()).unwrap();
    check_tensor_near(&s, [1, 1], &[1.5], 0.0);
    s.backward().unwrap();
    check_grad_near(&t, &[1.0, 1.0], 0.0);
}
