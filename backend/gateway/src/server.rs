//! Main HTTP gateway server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use chol_pipeline::Responder;

use crate::api;
use crate::stream;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub responder: Arc<Responder>,
}

/// Build the Axum router with all API routes.
///
/// CORS is wide open, as the original backend serves a browser widget
/// from a different origin.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/status", get(api::status))
        .route("/api/chat", post(api::chat))
        .route("/api/stats", get(api::stats))
        .route("/stream", post(stream::stream_chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
