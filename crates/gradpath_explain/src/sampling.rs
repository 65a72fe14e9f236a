//! Baseline and interpolation-constant sampling.

use burn::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Interpolation-constant policy for expectation (Expected Gradients) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpectationAlphas {
    /// Draw from the degenerate interval `[0, 0]`: every interpolation
    /// constant is exactly zero, so gradients are evaluated at the sampled
    /// baselines only. This is the default; existing consumers depend on its
    /// numeric output even though it departs from the usual Expected
    /// Gradients formulation.
    #[default]
    Degenerate,

    /// Draw uniformly from `[0, 1]`, the conventional Expected Gradients
    /// formulation. Opt-in.
    Uniform,
}

/// Draw `number_to_draw` baseline rows from a reference set.
///
/// In expectation mode, row indices are sampled from `[0, R)` (with
/// replacement when `R <= number_to_draw`, without replacement when
/// `R > number_to_draw`) and the rows are gathered. Otherwise the single
/// supplied row is tiled `number_to_draw` times; the orchestrator has already
/// narrowed the reference set to one row in that mode.
pub(crate) fn sample_baseline<B: Backend, const D: usize>(
    baseline: &Tensor<B, D>,
    number_to_draw: usize,
    use_expectation: bool,
    rng: &mut ChaCha8Rng,
) -> Tensor<B, D> {
    if use_expectation {
        let pool = baseline.dims()[0];
        let indices: Vec<i32> = if pool <= number_to_draw {
            (0..number_to_draw)
                .map(|_| rng.gen_range(0..pool) as i32)
                .collect()
        } else {
            rand::seq::index::sample(rng, pool, number_to_draw)
                .into_iter()
                .map(|i| i as i32)
                .collect()
        };
        let indices = Tensor::<B, 1, Int>::from_ints(indices.as_slice(), &baseline.device());
        baseline.clone().select(0, indices)
    } else {
        baseline.clone().repeat_dim(0, number_to_draw)
    }
}

/// Produce `num_samples` interpolation constants in `[0, 1]`.
///
/// Non-expectation mode yields the inclusive linear grid from 0 to 1, the
/// Riemann-sum abscissae for deterministic path integration. Expectation mode
/// draws according to `policy`.
pub(crate) fn sample_alphas(
    num_samples: usize,
    use_expectation: bool,
    policy: ExpectationAlphas,
    rng: &mut ChaCha8Rng,
) -> Vec<f32> {
    if use_expectation {
        match policy {
            ExpectationAlphas::Degenerate => vec![0.0; num_samples],
            ExpectationAlphas::Uniform => (0..num_samples)
                .map(|_| rng.gen_range(0.0..=1.0))
                .collect(),
        }
    } else if num_samples == 1 {
        vec![0.0]
    } else {
        (0..num_samples)
            .map(|i| i as f32 / (num_samples - 1) as f32)
            .collect()
    }
}

/// Reshape a slice of interpolation constants into a broadcastable column of
/// shape `(len, 1, ..., 1)`.
pub(crate) fn alpha_column<B: Backend, const D: usize>(
    alphas: &[f32],
    device: &B::Device,
) -> Tensor<B, D> {
    let mut dims = [1usize; D];
    dims[0] = alphas.len();
    Tensor::<B, 1>::from_floats(alphas, device).reshape(dims)
}
