use microllm_core::Tensor;

// Shared by several test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn tensor(data: Vec<f32>, rows: usize, cols: usize) -> Tensor {
    Tensor::from_vec(data, rows, cols).expect("Test tensor creation failed")
}

/// Initializes `env_logger` once so `RUST_LOG=debug cargo test` shows engine logs.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
