use crate::error::Result;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers and models).
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module, recording the operations on the graph.
    fn forward(&self, input: &Tensor) -> Result<Tensor>;

    /// Returns handles to all learnable parameters, including those of sub-modules.
    ///
    /// The handles share storage with the module, so an optimizer built from
    /// them updates the module in place.
    fn parameters(&self) -> Vec<Tensor>;

    /// Zeroes the gradient of every parameter.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    /// Total number of learnable scalars.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(Tensor::numel).sum()
    }
}
