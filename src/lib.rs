// Public API for integration tests and potential library usage

pub mod api;
pub mod broadcast;
pub mod config;
pub mod dispatch;
pub mod protocol;
pub mod state;
pub mod types;
pub mod words;
pub mod ws;

use axum::{routing::get, Router};
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use dispatch::AppState;

/// HTTP + WebSocket routes, with `static_dir` as the fallback file server
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/status", get(api::status))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
