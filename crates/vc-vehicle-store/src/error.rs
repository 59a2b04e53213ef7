//! Error types for the vehicle store

use thiserror::Error;
use vc_bloom_filter::DataError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed vehicle record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode vehicle record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<StoreError> for DataError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io(e) => DataError::ConnectionError(e.to_string()),
            e @ StoreError::Parse { .. } => DataError::ParseError(e.to_string()),
            e @ StoreError::Encode(_) => DataError::QueryError(e.to_string()),
        }
    }
}
