//! Fits `y = 2x` with a single weight, once with SGD and once with Adam.
//!
//! Run with `RUST_LOG=debug` to see the optimizer steps.

use microllm_core::ops::{matmul_op, mse_loss_op};
use microllm_core::{MicroLlmError, Tensor};
use microllm_optim::{Adam, AdamConfig, Optimizer, Sgd};

fn train(name: &str, weight: &Tensor, optimizer: &mut dyn Optimizer) -> Result<(), MicroLlmError> {
    println!("=== Training with {} ===", name);
    let input = Tensor::from_vec(vec![1.0, 2.0, 3.0], 3, 1)?;
    let target = Tensor::from_vec(vec![2.0, 4.0, 6.0], 3, 1)?;

    for epoch in 0..=100 {
        let loss = mse_loss_op(&matmul_op(&input, weight)?, &target)?;
        optimizer.zero_grad();
        loss.backward()?;
        optimizer.step()?;

        if epoch % 20 == 0 {
            println!(
                "Epoch {:3} | Loss: {:.6} | Weight: {:.4}",
                epoch,
                loss.item(),
                weight.item()
            );
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<(), MicroLlmError> {
    env_logger::init();

    let weight = Tensor::new(1, 1)?;
    weight.random_init();
    let mut sgd = Sgd::new(vec![weight.clone()], 0.1)?;
    train("SGD (lr = 0.1)", &weight, &mut sgd)?;

    let weight = Tensor::new(1, 1)?;
    weight.random_init();
    let mut adam = Adam::new(vec![weight.clone()], AdamConfig::with_lr(0.5))?;
    train("Adam (lr = 0.5)", &weight, &mut adam)?;

    Ok(())
}
