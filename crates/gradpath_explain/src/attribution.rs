//! Attribution result container.

use burn::prelude::*;

/// Attribution maps computed by [`crate::PathExplainer::attributions`].
///
/// The variant is decided once per call from the model's output cardinality
/// and the presence of per-input output selection:
///
/// - single-output model → [`Attributions::PerInput`]
/// - multi-output model, caller-selected outputs → [`Attributions::PerInput`]
/// - multi-output model, no selection → [`Attributions::PerClass`]
#[derive(Debug, Clone)]
pub enum Attributions<B: Backend, const D: usize> {
    /// One attribution map per input; shape `(n_inputs, ...)`.
    PerInput(Tensor<B, D>),

    /// One attribution map per input per output class; `n_classes` tensors,
    /// each of shape `(n_inputs, ...)`.
    PerClass(Vec<Tensor<B, D>>),
}

impl<B: Backend, const D: usize> Attributions<B, D> {
    /// Number of explained inputs.
    pub fn n_inputs(&self) -> usize {
        match self {
            Self::PerInput(values) => values.dims()[0],
            Self::PerClass(classes) => classes.first().map_or(0, |t| t.dims()[0]),
        }
    }

    /// Number of output classes, when attributions were computed per class.
    pub fn n_classes(&self) -> Option<usize> {
        match self {
            Self::PerInput(_) => None,
            Self::PerClass(classes) => Some(classes.len()),
        }
    }

    /// The per-input attribution tensor, for single-output or
    /// output-selected results.
    pub fn per_input(&self) -> Option<&Tensor<B, D>> {
        match self {
            Self::PerInput(values) => Some(values),
            Self::PerClass(_) => None,
        }
    }

    /// The attribution tensor for one output class.
    pub fn class(&self, class: usize) -> Option<&Tensor<B, D>> {
        match self {
            Self::PerInput(_) => None,
            Self::PerClass(classes) => classes.get(class),
        }
    }

    /// Min-max normalize every attribution tensor to `[0, 1]`.
    ///
    /// Each tensor is scaled by its own range; a constant tensor is returned
    /// unchanged.
    pub fn normalize(&self) -> Self {
        match self {
            Self::PerInput(values) => Self::PerInput(normalize_tensor(values)),
            Self::PerClass(classes) => {
                Self::PerClass(classes.iter().map(normalize_tensor).collect())
            }
        }
    }

    /// Sum of each input's attribution map, one vector per class (a single
    /// vector for per-input results).
    ///
    /// For integrated gradients these sums approximate
    /// `f(input) - f(baseline)` (the completeness property), which makes them
    /// a cheap sanity check on sampling resolution.
    pub fn completeness_sums(&self) -> Vec<Vec<f32>> {
        match self {
            Self::PerInput(values) => vec![row_sums(values)],
            Self::PerClass(classes) => classes.iter().map(row_sums).collect(),
        }
    }
}

fn normalize_tensor<B: Backend, const D: usize>(values: &Tensor<B, D>) -> Tensor<B, D> {
    let min_val: f32 = values.clone().min().into_scalar().elem();
    let max_val: f32 = values.clone().max().into_scalar().elem();
    let range = max_val - min_val;

    if range > 1e-8 {
        (values.clone() - min_val) / range
    } else {
        values.clone()
    }
}

fn row_sums<B: Backend, const D: usize>(values: &Tensor<B, D>) -> Vec<f32> {
    let dims = values.dims();
    let n_inputs = dims[0];
    let features: usize = dims[1..].iter().product::<usize>().max(1);

    values
        .clone()
        .reshape([n_inputs, features])
        .sum_dim(1)
        .into_data()
        .to_vec()
        .expect("attribution sums are f32")
}
