//! # gradpath_core
//!
//! Core types and traits for gradpath-rs path attributions.
//!
//! This crate provides:
//! - [`Seed`] for deterministic random number generation
//! - [`DifferentiableModel`], the capability contract a model must satisfy
//!   to be explained (batched forward plus input-gradient support via an
//!   autodiff backend)
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Batched data follows the convention `(N, ...)`:
//! - `N`: Batch size (number of samples), always the leading axis
//! - `...`: Feature dimensions of arbitrary rank
//!
//! Model outputs are `(N, C)` score matrices; `C == 1` marks a single-output
//! model.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod model;
mod seed;

pub use error::{CoreError, Result};
pub use model::DifferentiableModel;
pub use seed::Seed;

/// Backend type aliases for convenience
pub mod backend {
    pub use burn_autodiff::Autodiff;

    #[cfg(feature = "backend-ndarray")]
    pub use burn_ndarray::NdArray;
}
