//! Router construction and server host for the API.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::http::handlers::{get_relations, trigger_reset, trigger_sync};
use crate::http::sse::stream_sync_events;
use crate::state::ApiState;

/// Assemble the HTTP router with tracing and CORS layers applied.
///
/// The admin screen is served from the app proxy origin, so CORS stays
/// permissive here.
#[must_use]
pub fn build_router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/relations", get(get_relations))
        .route("/v1/sync", post(trigger_sync))
        .route("/v1/sync/events", get(stream_sync_events))
        .route("/v1/reset", post(trigger_reset))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Bind the listener and serve the API until shutdown.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(config: AppConfig, state: Arc<ApiState>) -> Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "relata api listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
