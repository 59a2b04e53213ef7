//! HTTP-facing error type

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use vc_bloom_filter::FilterError;
use vc_vehicle_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Vehicle filter is not ready yet")]
    NotReady,

    #[error("A filter rebuild is already in progress")]
    RebuildInProgress,

    #[error("Vehicle store unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotReady | ApiError::SourceUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::RebuildInProgress => StatusCode::CONFLICT,
            ApiError::InvalidParameters(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::NotReady => ApiError::NotReady,
            FilterError::RebuildInProgress => ApiError::RebuildInProgress,
            FilterError::SourceUnavailable(e) => ApiError::SourceUnavailable(e.to_string()),
            FilterError::InvalidParameters(msg) => ApiError::InvalidParameters(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
