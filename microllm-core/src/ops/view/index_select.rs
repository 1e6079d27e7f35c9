use std::rc::Rc;

use crate::autograd::BackwardOp;
use crate::error::{MicroLlmError, Result};
use crate::ops::new_op_output;
use crate::tensor::Tensor;

/// Scatters each output row's gradient back to the table row it was read
/// from. Repeated ids accumulate.
#[derive(Debug)]
struct IndexSelectBackward {
    table: Tensor,
    ids: Vec<usize>,
}

impl BackwardOp for IndexSelectBackward {
    fn backward(&self, grad_output: &[f32]) -> Result<Vec<Vec<f32>>> {
        let [rows, cols] = self.table.shape();
        let mut grad_table = vec![0.0; rows * cols];
        for (&id, g_row) in self.ids.iter().zip(grad_output.chunks(cols)) {
            let dst = &mut grad_table[id * cols..(id + 1) * cols];
            for (d, &g) in dst.iter_mut().zip(g_row) {
                *d += g;
            }
        }
        Ok(vec![grad_table])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.table.clone()]
    }

    fn name(&self) -> &'static str {
        "index_select"
    }
}

/// Gathers rows of `table`: output row `i` is `table[ids[i], :]`.
///
/// # Errors
/// * `InvalidShape` if `ids` is empty.
/// * `IndexOutOfRange` if any id is `>= table.rows()`.
pub fn index_select_op(table: &Tensor, ids: &[usize]) -> Result<Tensor> {
    let [rows, cols] = table.shape();
    if ids.is_empty() {
        return Err(MicroLlmError::InvalidShape { rows: 0, cols });
    }
    if let Some(&bad) = ids.iter().find(|&&id| id >= rows) {
        return Err(MicroLlmError::IndexOutOfRange {
            index: bad,
            size: rows,
        });
    }
    let output = {
        let data = table.data();
        let mut out = Vec::with_capacity(ids.len() * cols);
        for &id in ids {
            out.extend_from_slice(&data[id * cols..(id + 1) * cols]);
        }
        out
    };
    let grad_fn = Rc::new(IndexSelectBackward {
        table: table.clone(),
        ids: ids.to_vec(),
    });
    new_op_output(output, ids.len(), cols, grad_fn)
}

impl Tensor {
    /// See [`index_select_op`].
    pub fn index_select(&self, ids: &[usize]) -> Result<Tensor> {
        index_select_op(self, ids)
    }
}

#[cfg(test)]
#[path = "index_select_test.rs"]
mod tests;
