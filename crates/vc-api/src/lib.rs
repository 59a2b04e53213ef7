//! # VC API
//!
//! HTTP front end for the vehicle check service.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/check_vehicle/` | `yes` if the plate is possibly registered, `no` if definitely not |
//! | GET | `/api/vehicles/` | All stored plates |
//! | GET | `/health` | Liveness |
//! | GET | `/api/filter/status` | Published filter summary and lookup metrics |
//! | POST | `/api/filter/rebuild` | Rebuild from the store and publish |

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use domain::{ApiConfig, ApiError, CorsConfig};
pub use router::{create_router, AppState, VehicleFilter};
