//! # gradpath
//!
//! Path attributions for differentiable models in Rust.
//!
//! gradpath answers "how much did each input feature contribute to this
//! prediction?" by integrating the model's gradients along a straight-line
//! path from a baseline (a reference input representing absence of signal)
//! to the input:
//!
//! - **Integrated Gradients**: a deterministic linear grid of interpolation
//!   points against one shared baseline, or one baseline per input.
//! - **Expected Gradients**: baselines drawn at random from a reference set,
//!   averaging over many paths.
//!
//! The model is opaque: anything implementing
//! [`DifferentiableModel`](gradpath_core::DifferentiableModel), a batched
//! forward pass on a Burn autodiff backend, can be explained, whatever its
//! architecture.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gradpath::prelude::*;
//! use burn_autodiff::Autodiff;
//! use burn_ndarray::NdArray;
//!
//! let explainer = PathExplainer::<Autodiff<NdArray>, _>::new(model);
//! let config = AttributionConfig::default()
//!     .with_use_expectation(false)
//!     .with_num_samples(200)
//!     .with_seed(Seed::new(42));
//!
//! // inputs: (n_inputs, ...), baseline: (n_refs, ...)
//! let attr = explainer.attributions(inputs, baseline, &config, None)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `backend-ndarray` (default): CPU backend using ndarray

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use gradpath_core as core;
pub use gradpath_explain as explain;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use gradpath::prelude::*;
/// ```
pub mod prelude {
    pub use gradpath_core::{DifferentiableModel, Seed};
    pub use gradpath_explain::{
        AttributionConfig, Attributions, ExpectationAlphas, PathExplainer,
    };
}
