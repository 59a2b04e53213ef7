pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, CorsConfig};
pub use error::ApiError;
pub use types::{
    CheckStatus, CheckVehicleRequest, CheckVehicleResponse, FilterStatusResponse, HealthResponse,
    VehiclesResponse,
};
