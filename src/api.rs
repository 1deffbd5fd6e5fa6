//! HTTP API endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::dispatch::AppState;

/// Response body for `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub sessions: usize,
    pub players: usize,
    pub connections: usize,
    pub server_now: String,
}

/// Live server counters.
///
/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Response {
    match state.status().await {
        Some(snapshot) => Json(StatusResponse {
            sessions: snapshot.sessions,
            players: snapshot.players,
            connections: snapshot.connections,
            server_now: chrono::Utc::now().to_rfc3339(),
        })
        .into_response(),
        None => {
            tracing::error!("Status requested but dispatcher is not running");
            (StatusCode::SERVICE_UNAVAILABLE, "Dispatcher unavailable").into_response()
        }
    }
}
