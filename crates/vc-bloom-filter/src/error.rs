//! Error types for the membership filter core

use thiserror::Error;

/// Errors that can occur while constructing, building or publishing a filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Capacity is zero or the target error rate is not strictly inside (0, 1)
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    /// The record source could not be iterated to completion, or stalled
    /// past the build timeout
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(#[from] DataError),

    /// No filter has been published yet
    #[error("Filter not ready: no filter has been published")]
    NotReady,

    /// Another rebuild currently holds the build slot
    #[error("Rebuild already in progress")]
    RebuildInProgress,
}

impl FilterError {
    /// Whether a retry of the same build could succeed
    ///
    /// Parameter errors are deterministic and never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, FilterError::SourceUnavailable(_))
    }
}

/// Errors raised by a record source while it is being iterated
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
