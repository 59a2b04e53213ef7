//! Filter inspection and manual rebuilds

use axum::extract::State;
use axum::Json;
use tracing::info;
use vc_bloom_filter::FilterStatus;

use crate::domain::{ApiError, FilterStatusResponse};
use crate::router::AppState;

pub async fn filter_status(
    State(state): State<AppState>,
) -> Result<Json<FilterStatusResponse>, ApiError> {
    let filter = state.filter.status().ok_or(ApiError::NotReady)?;

    Ok(Json(FilterStatusResponse {
        filter,
        metrics: state.metrics.snapshot(),
    }))
}

/// Rebuild from the store and publish the result
///
/// A failed rebuild leaves the previous filter serving lookups.
pub async fn rebuild_filter(
    State(state): State<AppState>,
) -> Result<Json<FilterStatus>, ApiError> {
    info!("Manual filter rebuild requested");
    let filter = state.filter.rebuild().await?;
    Ok(Json(filter.status()))
}
