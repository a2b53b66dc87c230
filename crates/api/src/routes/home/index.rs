use std::sync::Arc;

use axum::{extract::State, http::StatusCode};

use crate::AppState;

pub const ROUTE_LISTING: &str = "Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
";

/// Plain text listing of the data routes (GET /)
pub async fn index_handler() -> &'static str {
    ROUTE_LISTING
}

/// Store readiness probe (GET /health)
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, String) {
    match state.engine.health_check().await {
        Ok(()) => (StatusCode::OK, "ok".to_owned()),
        Err(e) => {
            log::error!("health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}
