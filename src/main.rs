//! Country aggregation API server entry point
//!
//! Wires the upstream clients, aggregate cache and query service into an
//! axum server listening on the configured address.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use countrylens::cache::AggregateCache;
use countrylens::cli::{Cli, ServerConfig};
use countrylens::data::HttpUpstream;
use countrylens::query::QueryService;
use countrylens::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("countrylens=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(&cli)?;

    let upstream = Arc::new(HttpUpstream::new());
    let cache = Arc::new(AggregateCache::new(upstream));
    let queries = Arc::new(QueryService::new(cache));
    let app = router(AppState { queries });

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "country API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes when ctrl-c is received
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
