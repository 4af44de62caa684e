//! Error types for pr-cascade

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while promoting a change through the chain.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration (token, repository slug, API URL,
    /// environment selection).
    #[error("configuration error: {0}")]
    Config(String),

    /// A prerequisite check failed before any branch was built.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A git operation failed outside of conflict handling.
    #[error("git error: {0}")]
    Git(String),

    /// The pull-request API rejected a request.
    #[error("platform error: {0}")]
    Platform(String),

    /// The interactive prompt could not be read.
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}
