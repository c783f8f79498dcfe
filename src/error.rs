//! Defines the error type shared by the whole crate.

use thiserror::Error;

/// Errors returned by the ensemble, the trainers, and the sample readers.
///
/// Every error is raised at the call boundary,
/// before any state of the receiver is touched.
#[derive(Debug, Error)]
pub enum EnsembleError {
    /// A weight, a batch, or a trainer option is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The ensemble has no members yet.
    #[error("the ensemble is not initialized. call `initialize` first")]
    NotInitialized,

    /// Query samples or labels are malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A member trainer broke its contract.
    #[error("member trainer failed: {0}")]
    Trainer(String),

    /// Reading a file or writing a log failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A shorthand for `std::result::Result<T, EnsembleError>`.
pub type Result<T> = std::result::Result<T, EnsembleError>;
