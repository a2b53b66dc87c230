use crate::{
    db::{ClimateData, ClimateStore},
    health, index_handler, precipitation, routes, stations, temperature_range, temperature_since,
    tobs, QueryEngine,
};
use anyhow::Context;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use time::Date;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::tobs::tobs,
        routes::climate::temperature::temperature_since,
        routes::climate::temperature::temperature_range,
    ),
    components(
        schemas(
            routes::ErrorBody,
            routes::PrecipitationEntry,
            routes::StationEntry,
            routes::TemperatureObservation,
            routes::TemperatureStats,
        )
    ),
    tags(
        (name = "climate observation api", description = "a read-only RESTful api over daily station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    database: &str,
    max_connections: u32,
    precipitation_cutoff: Date,
) -> Result<AppState, anyhow::Error> {
    let store: Arc<dyn ClimateData> = Arc::new(
        ClimateStore::open(database, max_connections)
            .await
            .with_context(|| format!("error opening observation database {}", database))?,
    );

    Ok(app_state(store, precipitation_cutoff))
}

pub fn app_state(store: Arc<dyn ClimateData>, precipitation_cutoff: Date) -> AppState {
    AppState {
        engine: Arc::new(QueryEngine::new(store, precipitation_cutoff)),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    // Static segments win over `{start}`, so the named routes stay reachable
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_since))
        .route("/api/v1.0/{start}/{end}", get(temperature_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} code: {}, time: {}", path, response.status().as_str(), response_time);

    response
}
