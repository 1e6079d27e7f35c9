//! Trains a `Linear(3, 2)` layer with bias on two samples and prints the
//! parameters before and after.

use microllm_core::nn::{Linear, Module};
use microllm_core::ops::mse_loss_op;
use microllm_core::{MicroLlmError, Tensor};
use microllm_optim::{Optimizer, Sgd};

fn main() -> Result<(), MicroLlmError> {
    env_logger::init();

    let input = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3)?;
    let target = Tensor::from_vec(vec![1.0, 0.0, 0.0, 1.0], 2, 2)?;
    let layer = Linear::new(3, 2, true)?;

    println!("Initial weight:\n{}", layer.weight);
    if let Some(bias) = &layer.bias {
        println!("Initial bias:\n{}", bias);
    }

    let mut optimizer = Sgd::new(layer.parameters(), 0.01)?;
    for epoch in 0..=200 {
        let loss = mse_loss_op(&layer.forward(&input)?, &target)?;
        optimizer.zero_grad();
        loss.backward()?;
        optimizer.step()?;

        if epoch % 40 == 0 {
            println!("Epoch {:3} | Loss: {:.6}", epoch, loss.item());
        }
    }

    println!("\nFinal weight:\n{}", layer.weight);
    if let Some(bias) = &layer.bias {
        println!("Final bias:\n{}", bias);
    }
    println!("Final output:\n{}", layer.forward(&input)?);
    Ok(())
}
