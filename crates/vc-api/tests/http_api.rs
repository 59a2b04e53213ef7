//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vc_api::{create_router, AppState, CorsConfig};
use vc_bloom_filter::{
    BloomFilterService, FilterLifecycle, FilterParameters, LifecycleConfig, Metrics,
};
use vc_vehicle_store::{
    FileVehicleStore, InMemoryVehicleStore, Vehicle, VehicleRecordSource, VehicleStore,
};

const PLATES: [&str; 3] = ["AB-12-CD-3456", "EF-34-GH-5678", "IJ-56-KL-7890"];

struct TestApp {
    router: Router,
    state: AppState,
}

fn app_with_store(store: Arc<dyn VehicleStore>) -> TestApp {
    let metrics = Arc::new(Metrics::new());
    let service = BloomFilterService::new()
        .with_metrics(metrics.clone())
        .with_build_timeout(Duration::from_secs(5));
    let config = LifecycleConfig {
        parameters: FilterParameters::new(1000, 0.001),
        retry_attempts: 1,
        retry_backoff: Duration::from_millis(1),
    };
    let filter = Arc::new(FilterLifecycle::new(
        service,
        Arc::new(VehicleRecordSource::new(store.clone())),
        config,
    ));
    let state = AppState::new(filter, store, metrics);

    TestApp {
        router: create_router(state.clone(), &CorsConfig::default()),
        state,
    }
}

async fn ready_app() -> TestApp {
    let store = Arc::new(InMemoryVehicleStore::with_vehicles(
        PLATES.iter().map(|p| Vehicle::new(*p)).collect(),
    ));
    let app = app_with_store(store);
    app.state.filter.initialize().await.unwrap();
    app
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn check_request(plate: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/check_vehicle/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "vehicle_to_check": plate }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_running() {
    let app = ready_app().await;
    let (status, body) = send(&app.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "ok", "message": "Vehicle API is running!" })
    );
}

#[tokio::test]
async fn registered_plate_is_reported_yes() {
    let app = ready_app().await;

    for plate in PLATES {
        let (status, body) = send(&app.router, check_request(plate)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "vehicle_to_check": plate, "status": "yes" }));
    }
}

#[tokio::test]
async fn unknown_plate_is_reported_no() {
    let app = ready_app().await;

    let (status, body) = send(&app.router, check_request("ZZ-99-ZZ-0001")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "vehicle_to_check": "ZZ-99-ZZ-0001", "status": "no" })
    );
}

#[tokio::test]
async fn check_before_first_build_is_unavailable() {
    let app = app_with_store(Arc::new(InMemoryVehicleStore::new()));

    let (status, body) = send(&app.router, check_request("AB-12-CD-3456")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not ready"));
}

#[tokio::test]
async fn malformed_check_body_is_rejected() {
    let app = ready_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/check_vehicle/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"plate":"AB-12-CD-3456"}"#))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn vehicles_lists_store_contents() {
    let app = ready_app().await;

    let (status, body) = send(&app.router, get("/api/vehicles/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "vehicles": PLATES }));
}

#[tokio::test]
async fn status_includes_filter_and_metrics() {
    let app = ready_app().await;
    send(&app.router, check_request("AB-12-CD-3456")).await;

    let (status, body) = send(&app.router, get("/api/filter/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"]["elements_inserted"], json!(3));
    assert_eq!(body["filter"]["capacity"], json!(1000));
    assert_eq!(body["filter"]["degraded_accuracy"], json!(false));
    assert_eq!(body["metrics"]["filters_built"], json!(1));
    assert_eq!(body["metrics"]["lookups_performed"], json!(1));
}

#[tokio::test]
async fn status_before_first_build_is_unavailable() {
    let app = app_with_store(Arc::new(InMemoryVehicleStore::new()));

    let (status, _) = send(&app.router, get("/api/filter/status")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn rebuild_picks_up_new_plates() {
    let app = ready_app().await;
    app.state
        .store
        .insert_many(vec![Vehicle::new("MN-78-OP-9012")])
        .await
        .unwrap();

    let rebuild = Request::builder()
        .method(Method::POST)
        .uri("/api/filter/rebuild")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, rebuild).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elements_inserted"], json!(4));

    let (_, body) = send(&app.router, check_request("MN-78-OP-9012")).await;
    assert_eq!(body["status"], json!("yes"));
}

#[tokio::test]
async fn failed_rebuild_keeps_serving_previous_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vehicles.jsonl");
    std::fs::write(&path, "{\"vehicle_number\":\"AB-12-CD-3456\"}\n").unwrap();

    let app = app_with_store(Arc::new(FileVehicleStore::new(&path)));
    app.state.filter.initialize().await.unwrap();

    std::fs::write(&path, "{\"vehicle_number\":\"AB-12-CD-3456\"}\nbroken\n").unwrap();

    let rebuild = Request::builder()
        .method(Method::POST)
        .uri("/api/filter/rebuild")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, rebuild).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(&app.router, check_request("AB-12-CD-3456")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("yes"));
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = ready_app().await;
    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/check_vehicle/")
        .header(header::ORIGIN, "http://localhost:8050")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(preflight).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:8050"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "POST"
    );
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let app = ready_app().await;
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
