//! Search errors.

use thiserror::Error;

/// Result alias for searches.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A bound in the configuration is out of range.
    #[error("invalid bound: {name} = {value} ({reason})")]
    InvalidBounds {
        /// The configuration field.
        name: &'static str,
        /// The rejected value.
        value: usize,
        /// What the bound must satisfy.
        reason: &'static str,
    },

    /// Evaluating a candidate failed. The whole search is aborted.
    #[error("evaluation failed: {0}")]
    Value(#[from] closedform_units::Error),

    /// The worker pool could not be built.
    #[error("cannot build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
