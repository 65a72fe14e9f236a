//! Error types for gradpath_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by model evaluation and core tensor plumbing.
///
/// Models implementing [`crate::DifferentiableModel`] return these from their
/// forward pass; the attribution engine propagates them to the caller
/// unmodified.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid tensor shape provided.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Shape mismatch between tensors.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Numerical failure during evaluation (NaN/Inf, singular op, ...).
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
