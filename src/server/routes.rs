//! HTTP route handlers
//!
//! Thin adapters from HTTP to the query service; all aggregation logic
//! lives below the cache.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;
use crate::data::CountryRecord;
use crate::query::{Comparison, LocalTime};

/// Query parameters for `GET /compare`
#[derive(Debug, Deserialize)]
pub struct CompareParams {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

/// GET / — plain-text status string
pub async fn status() -> &'static str {
    "Country API is running."
}

/// GET /countries — the full merged list
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryRecord>>, ApiError> {
    let countries = state.queries.all().await?;
    Ok(Json(countries.as_ref().clone()))
}

/// GET /country/:name — lookup by name, cca2 or cca3
pub async fn get_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CountryRecord>, ApiError> {
    state
        .queries
        .find_by_identifier(&name)
        .await?
        .map(Json)
        .ok_or(ApiError::CountryNotFound)
}

/// GET /time/:name — current local time in the country's first timezone
pub async fn get_time(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LocalTime>, ApiError> {
    state
        .queries
        .local_time(&name)
        .await?
        .map(Json)
        .ok_or(ApiError::CountryNotFound)
}

/// GET /compare?A=..&B=.. — pairwise lookup
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Comparison>, ApiError> {
    state
        .queries
        .compare(&params.a, &params.b)
        .await?
        .map(Json)
        .ok_or(ApiError::InvalidCountries)
}

/// GET /random — uniform random pick over the current list
pub async fn random(State(state): State<AppState>) -> Result<Json<CountryRecord>, ApiError> {
    state
        .queries
        .random_pick()
        .await?
        .map(Json)
        .ok_or(ApiError::CountryNotFound)
}
