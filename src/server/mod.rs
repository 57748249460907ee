//! HTTP layer: application state and router assembly

pub mod error;
pub mod routes;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::query::QueryService;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    /// Query layer over the aggregate cache
    pub queries: Arc<QueryService>,
}

/// Builds the application router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/countries", get(routes::list_countries))
        .route("/country/:name", get(routes::get_country))
        .route("/time/:name", get(routes::get_time))
        .route("/compare", get(routes::compare))
        .route("/random", get(routes::random))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
