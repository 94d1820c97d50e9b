//! HTTP request handlers

use super::AppState;
use crate::session::{SessionRuntime, WsTransport};
use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Game sessions: one WebSocket connection per session
        .route("/ws", get(ws_upgrade))
        // Liveness probe
        .route("/healthz", get(healthz))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// WebSocket Session Handler
// ============================================================

/// Upgrade the connection and hand it to a per-connection session task
async fn ws_upgrade(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(socket: WebSocket) {
    let session_id = uuid::Uuid::new_v4().to_string();
    SessionRuntime::new(session_id, WsTransport::new(socket))
        .run()
        .await;
}

// ============================================================
// Health & Version
// ============================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

async fn get_version() -> &'static str {
    concat!("dropfour ", env!("CARGO_PKG_VERSION"))
}
