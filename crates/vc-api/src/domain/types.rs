//! Request and response bodies

use serde::{Deserialize, Serialize};
use vc_bloom_filter::{FilterStatus, MetricsSnapshot};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckVehicleRequest {
    pub vehicle_to_check: String,
}

/// Lookup verdict: `yes` means possibly registered, `no` means definitely not
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Yes,
    No,
}

impl From<bool> for CheckStatus {
    fn from(found: bool) -> Self {
        if found {
            CheckStatus::Yes
        } else {
            CheckStatus::No
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckVehicleResponse {
    pub vehicle_to_check: String,
    pub status: CheckStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehiclesResponse {
    pub vehicles: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Vehicle API is running!".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FilterStatusResponse {
    pub filter: FilterStatus,
    pub metrics: MetricsSnapshot,
}
