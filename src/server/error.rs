//! Structured HTTP error responses
//!
//! Identifier misses map to 404 with the JSON bodies clients expect;
//! essential-source failure maps to 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::data::UpstreamError;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested identifier matched no country
    #[error("Country not found")]
    CountryNotFound,

    /// One or both comparison identifiers matched no country
    #[error("Invalid countries")]
    InvalidCountries,

    /// The essential country source failed during refresh
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::CountryNotFound | ApiError::InvalidCountries => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::CountryNotFound => "Country not found".to_string(),
            ApiError::InvalidCountries => "Invalid countries".to_string(),
            ApiError::Upstream(_) => "Upstream data source unavailable".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(ref err) = self {
            tracing::error!(error = %err, "refresh failed while serving request");
        }

        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
