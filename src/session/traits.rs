//! Transport abstraction for session I/O
//!
//! The session loop reads and writes through this trait, which keeps it
//! runnable against in-memory transports in tests.

use crate::protocol::ServerEvent;
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};

/// A full-duplex ordered text-message channel for one session.
#[async_trait]
pub trait Transport: Send {
    /// Receive the next text message, suspending until one arrives.
    /// Returns `None` once the channel has closed.
    async fn receive(&mut self) -> Option<String>;

    /// Send one event to the session's clients.
    async fn send(&mut self, event: &ServerEvent) -> Result<(), String>;
}

// ============================================================================
// Production Adapters
// ============================================================================

/// [`Transport`] over one WebSocket connection.
pub struct WsTransport {
    socket: WebSocket,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn receive(&mut self) -> Option<String> {
        loop {
            match self.socket.recv().await? {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) => return None,
                // axum answers pings itself; other frame types carry
                // nothing for the game
                Ok(_) => {}
                // A receive error means the peer is gone
                Err(_) => return None,
            }
        }
    }

    async fn send(&mut self, event: &ServerEvent) -> Result<(), String> {
        let text = serde_json::to_string(event).map_err(|e| e.to_string())?;
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|e| e.to_string())
    }
}
