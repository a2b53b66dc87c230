use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{parse_date, routes::ErrorBody, AppState, QueryError, TemperatureSummary};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: f64,
    /// Mean, rounded to one decimal place
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "TMAX")]
    pub tmax: f64,
}

impl From<TemperatureSummary> for TemperatureStats {
    fn from(summary: TemperatureSummary) -> Self {
        Self {
            tmin: summary.min,
            tavg: summary.avg,
            tmax: summary.max,
        }
    }
}

/// A segment that fails extraction, such as a non-UTF-8 percent escape, is a bad date too
fn date_segments<T>(path: Result<Path<T>, PathRejection>) -> Result<T, QueryError> {
    path.map(|Path(segments)| segments)
        .map_err(|rejection| QueryError::InvalidDateFormat(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature statistics for every date on or after start", content_type = "application/json", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Start is not a valid YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No observations on or after start", body = ErrorBody),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = ErrorBody)
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureStats>, QueryError> {
    let start = parse_date(&date_segments(path)?)?;
    let summary = state.engine.temperature_summary(start, None).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature statistics for dates between start and end, inclusive", content_type = "application/json", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Start or end is not a valid YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No observations in the range", body = ErrorBody),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = ErrorBody)
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureStats>, QueryError> {
    let (start, end) = date_segments(path)?;
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    let summary = state.engine.temperature_summary(start, Some(end)).await?;
    Ok(Json(summary.into()))
}
