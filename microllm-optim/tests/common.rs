use microllm_core::Tensor;

#[allow(dead_code)]
pub fn tensor(data: Vec<f32>, rows: usize, cols: usize) -> Tensor {
    Tensor::from_vec(data, rows, cols).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
