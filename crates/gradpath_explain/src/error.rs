//! Error types for gradpath_explain.

use gradpath_core::CoreError;
use thiserror::Error;

/// Result type alias using [`ExplainError`].
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Errors raised by the attribution engine.
///
/// All errors are fatal to the current call; no partial attributions are
/// returned.
#[derive(Error, Debug)]
pub enum ExplainError {
    /// Arguments rejected by validation, before any attribution work.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure raised by the model during forward or gradient evaluation,
    /// passed through unmodified.
    #[error(transparent)]
    Model(#[from] CoreError),
}
