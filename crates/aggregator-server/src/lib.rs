//! HTTP API for the cluster report aggregator.
//!
//! Serves per-organization, per-cluster results out of the storage layer
//! the ingestion pipeline writes into. Path parameters are untrusted
//! input and go through the typed extraction helpers in [`params`];
//! see [`handlers`] for the status-code policy.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use aggregator_storage::Storage;

pub mod handlers;
pub mod params;
pub mod response;

pub use params::ParamError;

/// HTTP server configuration, loaded once at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. `0.0.0.0:8080`.
    pub address: String,
    /// Route prefix for the API, e.g. `/api/v1`.
    pub api_prefix: String,
}

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// Build the API router under the configured prefix.
pub fn create_router(config: &ServerConfig, state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(handlers::main_endpoint))
        .route("/organizations", get(handlers::list_organizations))
        .route(
            "/clusters/:organization",
            get(handlers::clusters_for_organization),
        )
        .route(
            "/report/:organization/:cluster",
            get(handlers::report_for_cluster),
        )
        .with_state(state);

    let router = match config.api_prefix.trim_end_matches('/') {
        "" => api,
        prefix => Router::new().nest(prefix, api),
    };

    router.layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until the process exits.
pub async fn run(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let router = create_router(config, state);
    let listener = tokio::net::TcpListener::bind(&config.address).await?;

    tracing::info!(
        address = %config.address,
        prefix = %config.api_prefix,
        "HTTP server listening"
    );

    axum::serve(listener, router).await
}
