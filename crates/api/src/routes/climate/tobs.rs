use axum::{extract::State, Json};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{routes::ErrorBody, AppState, QueryError, TemperatureReading};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservation {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl From<TemperatureReading> for TemperatureObservation {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            date: reading.date.to_string(),
            temperature: reading.temperature,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over the last year of data", content_type = "application/json", body = Vec<TemperatureObservation>),
        (status = NOT_FOUND, description = "The dataset has no measurements", body = ErrorBody),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, QueryError> {
    let readings = state.engine.year_window_temperatures().await?;
    info!("returning {} temperature observations", readings.len());
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}
