//! Plate lookups and listing

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::domain::{ApiError, CheckVehicleRequest, CheckVehicleResponse, VehiclesResponse};
use crate::router::AppState;

/// Ask the published filter whether a plate is possibly registered
///
/// The plate is checked byte for byte, with no trimming or case folding.
pub async fn check_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CheckVehicleRequest>,
) -> Result<Json<CheckVehicleResponse>, ApiError> {
    let found = state
        .filter
        .contains(request.vehicle_to_check.as_bytes())?;

    debug!(vehicle = %request.vehicle_to_check, found, "Checked vehicle");

    Ok(Json(CheckVehicleResponse {
        vehicle_to_check: request.vehicle_to_check,
        status: found.into(),
    }))
}

/// Every plate in the store, in storage order
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehiclesResponse>, ApiError> {
    let vehicles = state
        .store
        .list()
        .await?
        .into_iter()
        .map(|v| v.vehicle_number)
        .collect();

    Ok(Json(VehiclesResponse { vehicles }))
}
