// src/tensor/debug.rs
use std::fmt;

use crate::tensor::Tensor;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_borrow() {
            Ok(guard) => f
                .debug_struct("Tensor")
                .field("shape", &[guard.rows, guard.cols])
                .field("data", &guard.data)
                .field("grad_fn", &guard.grad_fn.as_ref().map(|op| op.name()))
                .finish(),
            Err(_) => write!(f, "Tensor(<mutably borrowed>)"),
        }
    }
}

/// Prints the matrix one row per line, values with four decimals.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        for row in guard.data.chunks(guard.cols) {
            let line: Vec<String> = row.iter().map(|x| format!("{:.4}", x)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
