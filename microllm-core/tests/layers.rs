mod common;

use microllm_core::nn::{Gpt, GptConfig, Linear, Module};
use microllm_core::ops::{mse_loss_op, softmax_op};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{init_logger, tensor};

#[test]
fn linear_layer_parameters_share_storage() {
    let layer = Linear::new(3, 2, true).unwrap();
    let params = layer.parameters();
    params[0].set_data(&[1.0; 6]).unwrap();
    assert_eq!(layer.weight.to_vec(), vec![1.0; 6]);

    let x = tensor(vec![1.0, 2.0, 3.0], 1, 3);
    let y = layer.forward(&x).unwrap();
    assert_eq!(y.to_vec(), vec![6.0, 6.0]);

    let loss = mse_loss_op(&y, &tensor(vec![6.0, 5.0], 1, 2)).unwrap();
    loss.backward().unwrap();
    // dL/dy = [0, 1], db = dL/dy
    assert_eq!(params[1].grad_to_vec(), vec![0.0, 1.0]);
}

#[test]
fn gpt_end_to_end_probabilities() {
    init_logger();
    let model = Gpt::with_rng(GptConfig::default(), &mut StdRng::seed_from_u64(99)).unwrap();
    let ids = tensor(vec![1.0, 2.0, 3.0], 3, 1);
    let probs = softmax_op(&model.forward(&ids).unwrap()).unwrap();
    assert_eq!(probs.shape(), [3, 4]);
    for row in probs.to_vec().chunks(4) {
        let total: f32 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }
}
