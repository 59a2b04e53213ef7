//! Route table and shared state

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use vc_bloom_filter::{FilterLifecycle, Metrics};
use vc_vehicle_store::{VehicleRecordSource, VehicleStore};

use crate::domain::CorsConfig;
use crate::handlers;
use crate::middleware::create_cors_layer;

pub type VehicleFilter = FilterLifecycle<VehicleRecordSource>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub filter: Arc<VehicleFilter>,
    pub store: Arc<dyn VehicleStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        filter: Arc<VehicleFilter>,
        store: Arc<dyn VehicleStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            filter,
            store,
            metrics,
        }
    }
}

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(cors));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/check_vehicle/", post(handlers::check_vehicle))
        .route("/api/vehicles/", get(handlers::list_vehicles))
        .route("/api/filter/status", get(handlers::filter_status))
        .route("/api/filter/rebuild", post(handlers::rebuild_filter))
        .layer(middleware)
        .with_state(state)
}
