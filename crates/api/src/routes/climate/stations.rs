use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{routes::ErrorBody, AppState, QueryError, Station};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
}

impl From<Station> for StationEntry {
    fn from(station: Station) -> Self {
        Self {
            station: station.station_id,
            name: station.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "All observing stations", content_type = "application/json", body = Vec<StationEntry>),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationEntry>>, QueryError> {
    let stations = state.engine.stations().await?;
    Ok(Json(stations.into_iter().map(Into::into).collect()))
}
