//! HTTP service exposing the review and fix operations.
//!
//! Stateless: each request performs exactly one backend call and
//! returns a fixed-shape JSON envelope. Backend failures surface as
//! 502 with the proximate cause rather than a success-shaped body.
//!
//! Endpoints:
//!   GET  /
//!   GET  /health
//!   POST /review
//!   POST /fix

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::invoker::GenerateBackend;

/// Shared handler state: the generation backend chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn GenerateBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerateBackend>) -> Self {
        Self { backend }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/review", post(routes::review))
        .route("/fix", post(routes::fix))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is interrupted.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router).await
}
