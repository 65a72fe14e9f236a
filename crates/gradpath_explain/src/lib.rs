//! # gradpath_explain
//!
//! Path attribution engine for differentiable models.
//!
//! Attributes a model's prediction to its input features by integrating
//! gradients along the straight-line path from a baseline to the input:
//!
//! ```text
//! attribution(x) = (x - b) * integral over alpha in [0, 1] of
//!                  grad f(b + alpha * (x - b))
//! ```
//!
//! Two sampling modes are supported:
//! - **Integrated Gradients**: one shared baseline (or one baseline per
//!   input) and a deterministic linear grid of interpolation constants.
//! - **Expected Gradients**: baselines drawn at random from a reference set;
//!   see [`ExpectationAlphas`] for the interpolation-constant policies.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gradpath_explain::{AttributionConfig, PathExplainer};
//! use gradpath_core::Seed;
//!
//! let explainer = PathExplainer::new(model);
//! let config = AttributionConfig::default()
//!     .with_use_expectation(false)
//!     .with_num_samples(200)
//!     .with_seed(Seed::new(42));
//! let attr = explainer.attributions(inputs, baseline, &config, None)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod attribution;
mod error;
mod explainer;
mod gradient;
mod sampling;

pub use attribution::Attributions;
pub use error::{ExplainError, Result};
pub use explainer::{AttributionConfig, PathExplainer};
pub use sampling::ExpectationAlphas;
