use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autograd::grad_check::check_grad;
use crate::nn::init::{fill_, zeros_};
use crate::nn::{Module, TransformerBlock};
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_near, create_test_tensor};

fn input() -> Tensor {
    create_test_tensor(vec![0.3, -0.1, 0.2, 0.5, -0.4, 0.0, 0.1, 0.6], 2, 4)
}

#[test]
fn test_block_preserves_shape() {
    let block = TransformerBlock::with_rng(4, 3, 8, &mut StdRng::seed_from_u64(10)).unwrap();
    let out = block.forward(&input()).unwrap();
    assert_eq!(out.shape(), [2, 4]);
    // attention (3 weights) + proj, ff_in, ff_out (weight and bias each)
    assert_eq!(block.parameters().len(), 9);
}

#[test]
fn test_block_is_identity_with_zero_output_layers() {
    let block = TransformerBlock::with_rng(4, 3, 8, &mut StdRng::seed_from_u64(11)).unwrap();
    zeros_(&block.proj.weight);
    zeros_(&block.ff_out.weight);
    let x = input();
    let out = block.forward(&x).unwrap();
    check_tensor_near(&out, [2, 4], &x.to_vec(), 1e-7);

    // The residual path carries the gradient straight through.
    out.backward().unwrap();
    assert!(x.grad_to_vec().iter().all(|&g| (g - 1.0).abs() < 1e-6));
}

#[test]
fn test_block_grad_check() {
    let block = TransformerBlock::with_rng(4, 2, 3, &mut StdRng::seed_from_u64(12)).unwrap();
    // Keep every feed-forward pre-activation well above the ReLU kink.
    if let Some(bias) = &block.ff_in.bias {
        fill_(bias, 10.0);
    }
    let mut inputs = vec![input()];
    inputs.extend(block.parameters());
    let func = |ts: &[Tensor]| block.forward(&ts[0]);
    check_grad(func, &inputs, 1e-2, 2e-3, 2e-2)
        .unwrap_or_else(|e| panic!("TransformerBlock grad check failed: {:?}", e));
}
