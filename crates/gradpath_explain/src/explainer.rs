//! The path attribution engine.

use std::marker::PhantomData;

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use gradpath_core::{DifferentiableModel, Seed};

use crate::attribution::Attributions;
use crate::error::{ExplainError, Result};
use crate::gradient::GradientEvaluator;
use crate::sampling::{alpha_column, sample_alphas, sample_baseline, ExpectationAlphas};

/// Configuration for a call to [`PathExplainer::attributions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Maximum number of interpolated samples the model evaluates at once.
    /// The sole mechanism bounding peak memory.
    pub batch_size: usize,

    /// Number of path-integration steps per input. Larger values shrink the
    /// Riemann-sum approximation error.
    pub num_samples: usize,

    /// `true` selects Expected Gradients (random baseline sampling), `false`
    /// selects Integrated Gradients (single or per-input baseline with a
    /// deterministic linear alpha grid).
    pub use_expectation: bool,

    /// How expectation mode draws interpolation constants.
    pub expectation_alphas: ExpectationAlphas,

    /// Log per-input progress via `tracing`.
    pub verbose: bool,

    /// Seed for every random draw in the call. Each input gets its own
    /// sub-stream derived from this seed.
    pub seed: Seed,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            num_samples: 100,
            use_expectation: true,
            expectation_alphas: ExpectationAlphas::default(),
            verbose: false,
            seed: Seed::default(),
        }
    }
}

impl AttributionConfig {
    /// Set the model micro-batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the number of path-integration steps.
    #[must_use]
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    /// Select Expected Gradients (`true`) or Integrated Gradients (`false`).
    #[must_use]
    pub fn with_use_expectation(mut self, use_expectation: bool) -> Self {
        self.use_expectation = use_expectation;
        self
    }

    /// Set the expectation-mode interpolation-constant policy.
    #[must_use]
    pub fn with_expectation_alphas(mut self, policy: ExpectationAlphas) -> Self {
        self.expectation_alphas = policy;
        self
    }

    /// Enable per-input progress logging.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the seed for all random draws.
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }
}

/// Output handling, resolved once per call before the per-input loop.
#[derive(Debug, Clone)]
enum OutputPlan {
    /// Single-output model: one map per input.
    Single,
    /// Multi-output model without selection: one map per input per class.
    PerClassAll(usize),
    /// Multi-output model with one caller-selected class per input.
    Selected(Vec<usize>),
}

impl OutputPlan {
    fn resolve(
        n_outputs: usize,
        output_indices: Option<&[usize]>,
        n_inputs: usize,
    ) -> Result<Self> {
        match output_indices {
            Some(_) if n_outputs == 1 => Err(ExplainError::InvalidArgument(
                "output indices were provided but the model is not multi-output".into(),
            )),
            Some(indices) if indices.len() != n_inputs => Err(ExplainError::InvalidArgument(
                format!(
                    "expected one output index per input ({} inputs), got {}",
                    n_inputs,
                    indices.len()
                ),
            )),
            Some(indices) => {
                if let Some(&bad) = indices.iter().find(|&&class| class >= n_outputs) {
                    return Err(ExplainError::InvalidArgument(format!(
                        "output index {} out of range for a model with {} outputs",
                        bad, n_outputs
                    )));
                }
                Ok(Self::Selected(indices.to_vec()))
            }
            None if n_outputs == 1 => Ok(Self::Single),
            None => Ok(Self::PerClassAll(n_outputs)),
        }
    }
}

/// Computes path attributions for a differentiable model.
///
/// Wraps the model once; every call to [`attributions`](Self::attributions)
/// is self-contained and leaves no state behind.
pub struct PathExplainer<B: AutodiffBackend, M> {
    model: M,
    marker: PhantomData<B>,
}

impl<B: AutodiffBackend, M> PathExplainer<B, M> {
    /// Wrap a model for explanation.
    pub fn new(model: M) -> Self {
        Self {
            model,
            marker: PhantomData,
        }
    }

    /// Access the wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Unwrap the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Compute path attributions for a batch of inputs.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Input batch of shape `(n_inputs, ...)`.
    /// * `baseline` - Reference samples of shape `(n_refs, ...)` with the
    ///   same feature dimensions as `inputs`. In integrated-gradients mode
    ///   (`use_expectation == false`) `n_refs` must be 1 (shared baseline) or
    ///   `n_inputs` (baseline `i` paired with input `i`); expectation mode
    ///   accepts any non-empty reference set and samples from it.
    /// * `config` - Sampling parameters, see [`AttributionConfig`].
    /// * `output_indices` - For multi-output models, one class index per
    ///   input; attributions are computed for that class only. `None` on a
    ///   multi-output model computes attributions for every class. Must be
    ///   `None` for single-output models.
    ///
    /// # Errors
    ///
    /// [`ExplainError::InvalidArgument`] for rejected arguments (raised
    /// before any attribution work); [`ExplainError::Model`] for any failure
    /// raised by the model, passed through unmodified. Errors abort the whole
    /// call; no partial results.
    ///
    /// Inputs are processed strictly one at a time. Each input's randomness
    /// comes from its own sub-stream of `config.seed` and its result occupies
    /// its own output row, so a caller needing parallelism can shard the
    /// input batch across explainer calls without coordination.
    pub fn attributions<const D: usize>(
        &self,
        inputs: Tensor<B::InnerBackend, D>,
        baseline: Tensor<B::InnerBackend, D>,
        config: &AttributionConfig,
        output_indices: Option<&[usize]>,
    ) -> Result<Attributions<B::InnerBackend, D>>
    where
        M: DifferentiableModel<B, D>,
    {
        let input_dims = inputs.dims();
        let baseline_dims = baseline.dims();
        let n_inputs = input_dims[0];
        let n_refs = baseline_dims[0];

        self.validate(&input_dims, &baseline_dims, config)?;

        let n_outputs = match self.model.n_outputs() {
            Some(declared) => declared,
            None => {
                let probe = self.model.predict(inputs.clone().narrow(0, 0, 1))?;
                probe.dims()[1]
            }
        };
        tracing::debug!("model has {} output(s)", n_outputs);

        let plan = OutputPlan::resolve(n_outputs, output_indices, n_inputs)?;

        let evaluator = GradientEvaluator::new(&self.model);
        let per_input_baseline = !config.use_expectation && n_refs > 1;

        let mut per_input: Vec<Tensor<B::InnerBackend, D>> = Vec::new();
        let mut per_class: Vec<Vec<Tensor<B::InnerBackend, D>>> = match &plan {
            OutputPlan::PerClassAll(n_classes) => {
                vec![Vec::with_capacity(n_inputs); *n_classes]
            }
            _ => Vec::new(),
        };

        for i in 0..n_inputs {
            let mut rng = config.seed.stream(i as u64).to_rng();
            let alphas = sample_alphas(
                config.num_samples,
                config.use_expectation,
                config.expectation_alphas,
                &mut rng,
            );

            let current_baseline = if per_input_baseline {
                baseline.clone().narrow(0, i, 1)
            } else {
                baseline.clone()
            };
            let input_row = inputs.clone().narrow(0, i, 1);

            match &plan {
                OutputPlan::Single => {
                    per_input.push(self.single_attribution(
                        &evaluator,
                        &input_row,
                        &current_baseline,
                        &alphas,
                        config,
                        None,
                        &mut rng,
                    )?);
                }
                OutputPlan::Selected(indices) => {
                    per_input.push(self.single_attribution(
                        &evaluator,
                        &input_row,
                        &current_baseline,
                        &alphas,
                        config,
                        Some(indices[i]),
                        &mut rng,
                    )?);
                }
                OutputPlan::PerClassAll(n_classes) => {
                    for class in 0..*n_classes {
                        per_class[class].push(self.single_attribution(
                            &evaluator,
                            &input_row,
                            &current_baseline,
                            &alphas,
                            config,
                            Some(class),
                            &mut rng,
                        )?);
                    }
                }
            }

            if config.verbose {
                tracing::info!("computed attributions for input {}/{}", i + 1, n_inputs);
            }
        }

        Ok(match plan {
            OutputPlan::PerClassAll(_) => Attributions::PerClass(
                per_class
                    .into_iter()
                    .map(|maps| Tensor::cat(maps, 0))
                    .collect(),
            ),
            _ => Attributions::PerInput(Tensor::cat(per_input, 0)),
        })
    }

    fn validate<const D: usize>(
        &self,
        input_dims: &[usize; D],
        baseline_dims: &[usize; D],
        config: &AttributionConfig,
    ) -> Result<()> {
        if input_dims[0] == 0 {
            return Err(ExplainError::InvalidArgument(
                "input batch is empty".into(),
            ));
        }
        if baseline_dims[0] == 0 {
            return Err(ExplainError::InvalidArgument(
                "baseline set is empty".into(),
            ));
        }
        if config.batch_size == 0 {
            return Err(ExplainError::InvalidArgument(
                "batch_size must be positive".into(),
            ));
        }
        if config.num_samples == 0 {
            return Err(ExplainError::InvalidArgument(
                "num_samples must be positive".into(),
            ));
        }
        if input_dims[1..] != baseline_dims[1..] {
            return Err(ExplainError::InvalidArgument(format!(
                "baseline feature dimensions {:?} do not match input feature dimensions {:?}",
                &baseline_dims[1..],
                &input_dims[1..]
            )));
        }
        if !config.use_expectation
            && baseline_dims[0] != 1
            && baseline_dims[0] != input_dims[0]
        {
            return Err(ExplainError::InvalidArgument(format!(
                "integrated gradients needs 1 baseline or one per input ({}), got {}",
                input_dims[0], baseline_dims[0]
            )));
        }
        Ok(())
    }

    /// Path integral for one input against its baseline set.
    ///
    /// Interpolation steps are processed in chunks of at most
    /// `config.batch_size`; each chunk draws its baselines, forms the
    /// integrand `gradient * (input - baseline)`, and the mean over all
    /// `num_samples` contributions estimates the line integral.
    #[allow(clippy::too_many_arguments)]
    fn single_attribution<const D: usize>(
        &self,
        evaluator: &GradientEvaluator<'_, B, M>,
        input_row: &Tensor<B::InnerBackend, D>,
        baseline: &Tensor<B::InnerBackend, D>,
        alphas: &[f32],
        config: &AttributionConfig,
        output_index: Option<usize>,
        rng: &mut ChaCha8Rng,
    ) -> Result<Tensor<B::InnerBackend, D>>
    where
        M: DifferentiableModel<B, D>,
    {
        let device = input_row.device();
        let num_samples = alphas.len();
        let mut contributions = Vec::new();

        let mut start = 0;
        while start < num_samples {
            let number_to_draw = config.batch_size.min(num_samples - start);

            let batch_baseline =
                sample_baseline(baseline, number_to_draw, config.use_expectation, rng);
            let batch_input = input_row.clone().repeat_dim(0, number_to_draw);
            let batch_alphas = alpha_column::<B::InnerBackend, D>(
                &alphas[start..start + number_to_draw],
                &device,
            );

            let difference = batch_input.clone() - batch_baseline.clone();
            let gradients = evaluator.interpolation_gradients(
                batch_input,
                batch_baseline,
                batch_alphas,
                output_index,
            )?;

            contributions.push(gradients * difference);
            start += number_to_draw;
        }

        Ok(Tensor::cat(contributions, 0).mean_dim(0))
    }
}
