//! Teaches a tiny GPT the cyclic pattern `1 -> 2 -> 3 -> 1` and prints the
//! predicted next token at every position.

use log::info;
use microllm_core::nn::{Gpt, GptConfig, Module};
use microllm_core::ops::{cross_entropy_loss_op, softmax_op};
use microllm_core::{MicroLlmError, Tensor};
use microllm_optim::{Adam, AdamConfig, Optimizer};

const EPOCHS: usize = 500;

fn main() -> Result<(), MicroLlmError> {
    env_logger::init();

    // Token 0 is padding; the pattern uses 1, 2 and 3.
    let config = GptConfig::default();
    let model = Gpt::new(config)?;
    info!("model has {} parameters", model.num_parameters());
    println!(
        "GPT: vocab {}, embed {}, max sequence {}, head {}",
        config.vocab_size, config.embed_dim, config.max_seq_len, config.head_dim
    );

    let mut optimizer = Adam::new(model.parameters(), AdamConfig::with_lr(0.01))?;

    let train_inputs: [[usize; 3]; 3] = [[1, 2, 3], [2, 3, 1], [3, 1, 2]];
    let train_targets: [[usize; 3]; 3] = [[2, 3, 1], [3, 1, 2], [1, 2, 3]];

    for epoch in 0..EPOCHS {
        let mut total_loss = 0.0;
        for (input, next) in train_inputs.iter().zip(&train_targets) {
            let mut onehot = vec![0.0; input.len() * config.vocab_size];
            for (i, &tok) in next.iter().enumerate() {
                onehot[i * config.vocab_size + tok] = 1.0;
            }
            let target = Tensor::from_vec(onehot, input.len(), config.vocab_size)?;

            let probs = softmax_op(&model.forward_ids(input)?)?;
            let loss = cross_entropy_loss_op(&probs, &target)?;

            optimizer.zero_grad();
            loss.backward()?;
            optimizer.step()?;
            total_loss += loss.item();
        }
        if epoch % 50 == 0 {
            println!(
                "Epoch {:3} | Avg loss: {:.4}",
                epoch,
                total_loss / train_inputs.len() as f32
            );
        }
    }

    println!("\n=== Predictions ===");
    for input in &train_inputs {
        println!("Input: {:?}", input);
        for (position, (token, prob)) in model.predict(input)?.into_iter().enumerate() {
            println!("  position {}: token {} (prob {:.4})", position, token, prob);
        }
    }
    Ok(())
}
