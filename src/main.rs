//! dropfour - realtime two-player Connect Four server
//!
//! Clients connect over a WebSocket, two to a session, and take turns
//! dropping marks; the server validates moves, detects wins, and reflects
//! every outcome back as JSON events.

mod api;
mod game;
mod protocol;
mod session;

use api::{create_router, AppState};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dropfour=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = match std::env::var("DROPFOUR_PORT") {
        Ok(value) => value
            .parse()
            .map_err(|e| format!("invalid DROPFOUR_PORT {value:?}: {e}"))?,
        Err(_) => 8008,
    };

    // Create router. Browser clients may be served from another origin, so
    // CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(
        rows = game::ROWS,
        columns = game::COLUMNS,
        "dropfour server listening on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
