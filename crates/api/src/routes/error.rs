use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::QueryError;

/// Body returned with every non-2xx JSON response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// One of `invalid_date_format`, `no_data`, `data_source_unavailable`
    pub error: String,
    pub message: String,
}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            QueryError::NoData(_) => StatusCode::NOT_FOUND,
            QueryError::DataSourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::InvalidDateFormat(_) => "invalid_date_format",
            QueryError::NoData(_) => "no_data",
            QueryError::DataSourceUnavailable(_) => "data_source_unavailable",
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            QueryError::DataSourceUnavailable(e) => error!("error reading observation data: {}", e),
            other => warn!("rejected query: {}", other),
        }

        let body = ErrorBody {
            error: self.kind().to_owned(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
