use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{routes::ErrorBody, AppState, PrecipitationReading, QueryError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrecipitationEntry {
    /// YYYY-MM-DD
    pub date: String,
    /// Inches, null when not reported
    pub prcp: Option<f64>,
}

impl From<PrecipitationReading> for PrecipitationEntry {
    fn from(reading: PrecipitationReading) -> Self {
        Self {
            date: reading.date.to_string(),
            prcp: reading.precipitation,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Daily precipitation on or after the cutoff date, ascending by date", content_type = "application/json", body = Vec<PrecipitationEntry>),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationEntry>>, QueryError> {
    let readings = state.engine.precipitation().await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}
