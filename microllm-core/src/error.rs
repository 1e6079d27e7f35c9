use thiserror::Error;

/// Custom error type for the microllm framework.
///
/// Every variant is a precondition violation detected at the point of the call;
/// nothing in the core retries or returns partial results.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum MicroLlmError {
    #[error("Invalid shape: rows={rows}, cols={cols} (both dimensions must be positive)")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Tensor creation error: data length {data_len} does not match shape [{rows}, {cols}]")]
    TensorCreation {
        data_len: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Index out of range: index {index} for a table of {size} rows")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Invalid token id {value}: ids must be non-negative integers")]
    InvalidTokenId { value: f32 },

    #[error("Sequence of length {len} exceeds the maximum supported length {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Gradient accumulation error in {operation}: expected {expected}, got {actual}")]
    GradientAccumulation {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MicroLlmError>;
