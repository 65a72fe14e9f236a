//! The model capability contract.
//!
//! The attribution engine treats the model as an opaque differentiable
//! function. The only requirement is a batched forward pass on an autodiff
//! backend, which is what lets the engine record gradients of the outputs
//! with respect to interpolated inputs.

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::error::Result;

/// A differentiable model that can be explained.
///
/// # Type Parameters
///
/// * `B` - The autodiff backend (e.g. `Autodiff<NdArray>`)
/// * `D` - Input tensor rank, including the leading batch axis
///
/// Implementations map a batch of inputs of shape `(batch, ...)` to a score
/// matrix of shape `(batch, n_outputs)`. A model with `n_outputs == 1` is
/// single-output; anything wider is multi-output (per-class logits, multi-task
/// heads, ...).
///
/// The forward pass is fallible: shape mismatches or numerical failures
/// surface as [`crate::CoreError`] and are propagated to the caller of the
/// attribution engine unmodified.
pub trait DifferentiableModel<B: AutodiffBackend, const D: usize> {
    /// Forward pass on the autodiff backend.
    ///
    /// # Arguments
    ///
    /// * `x` - Input tensor of shape `(batch, ...)`
    ///
    /// # Returns
    ///
    /// Score tensor of shape `(batch, n_outputs)`.
    fn forward(&self, x: Tensor<B, D>) -> Result<Tensor<B, 2>>;

    /// Number of output columns, when statically known.
    ///
    /// Models that declare their cardinality let the engine validate
    /// output selection without evaluating the model; for the rest the
    /// engine probes once with the first input row.
    fn n_outputs(&self) -> Option<usize> {
        None
    }

    /// Forward pass on the value backend, without gradient tracking.
    ///
    /// Used for cheap probing (e.g. determining output cardinality). The
    /// default lifts the input onto the autodiff backend and drops the
    /// recorded graph afterwards.
    fn predict(&self, x: Tensor<B::InnerBackend, D>) -> Result<Tensor<B::InnerBackend, 2>> {
        Ok(self.forward(Tensor::from_inner(x))?.inner())
    }
}
