use crate::helpers::{seeded_store, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::db::Error;
use std::sync::Arc;

#[tokio::test]
async fn malformed_start_date_is_a_client_error() {
    // no expectations: the store must not be touched
    let store = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, value) = test_app.get_json("/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "invalid_date_format");
    assert!(value["message"].as_str().unwrap().contains("not-a-date"));
}

#[tokio::test]
async fn impossible_end_date_is_a_client_error() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, value) = test_app.get_json("/api/v1.0/2017-01-01/2017-02-30").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "invalid_date_format");
}

#[tokio::test]
async fn non_utf8_date_segments_get_a_json_error() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    for uri in [
        "/api/v1.0/%FF",
        "/api/v1.0/%FF/2017-01-01",
        "/api/v1.0/2017-01-01/%FF",
    ] {
        let (status, value) = test_app.get_json(uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(value["error"], "invalid_date_format", "{uri}");
        assert!(value["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn start_beyond_all_data_is_no_data() {
    let store = seeded_store(
        &[("A", "Station A")],
        &[("A", "2017-08-23", Some(0.0), 80.0)],
    )
    .await;
    let test_app = spawn_app(store).await;

    let (status, value) = test_app.get_json("/api/v1.0/2099-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "no_data");
    assert!(value.get("TMIN").is_none());
}

#[tokio::test]
async fn reversed_range_is_no_data() {
    let store = seeded_store(
        &[("A", "Station A")],
        &[("A", "2017-08-23", Some(0.0), 80.0)],
    )
    .await;
    let test_app = spawn_app(store).await;

    let (status, value) = test_app.get_json("/api/v1.0/2017-08-24/2017-08-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "no_data");
}

#[tokio::test]
async fn tobs_on_empty_dataset_is_no_data() {
    let mut store = MockClimateAccess::new();
    store
        .expect_measurements()
        .times(1)
        .returning(|_| Ok(vec![]));
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, value) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "no_data");
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let mut store = MockClimateAccess::new();
    store
        .expect_stations()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::PoolTimedOut)));
    store
        .expect_measurements()
        .times(1)
        .returning(|_| Err(Error::MissingTable("measurement")));
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, value) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(value["error"], "data_source_unavailable");

    let (status, value) = test_app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(value["error"], "data_source_unavailable");
}

#[tokio::test]
async fn health_reports_store_failure() {
    let mut store = MockClimateAccess::new();
    store
        .expect_health_check()
        .times(1)
        .returning(|| Err(Error::Integrity("*** in database main ***".to_string())));
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = test_app.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Integrity check failed"));
}

#[tokio::test]
async fn unknown_nested_route_is_not_found() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, _) = test_app.get("/api/v1.0/2017-01-01/2017-01-02/extra").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/v1.0/precipitation"));
}
