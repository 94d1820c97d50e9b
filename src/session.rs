//! Per-connection session handling
//!
//! One session is one connection carrying one game for the two players
//! sharing it. The listener spawns one task per accepted connection; that
//! task runs [`SessionRuntime::run`], which handles inbound messages
//! strictly one at a time, delivering every event for a move before reading
//! the next message. Sessions own all their state, so nothing here locks
//! across connections.

mod coordinator;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use coordinator::{next_player, GameSession, ProtocolError};
pub use traits::{Transport, WsTransport};

use crate::protocol::ServerEvent;

/// Drives one session to completion: reads from the transport, hands each
/// message to the [`GameSession`], and delivers the resulting events in
/// order.
pub struct SessionRuntime<T: Transport> {
    session_id: String,
    session: GameSession,
    transport: T,
}

impl<T: Transport> SessionRuntime<T> {
    pub fn new(session_id: impl Into<String>, transport: T) -> Self {
        Self {
            session_id: session_id.into(),
            session: GameSession::new(),
            transport,
        }
    }

    /// Run until the client disconnects, a message fails to decode, or an
    /// event cannot be delivered.
    ///
    /// Rejected moves are reported to the client and never end the session.
    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "session opened");

        while let Some(raw) = self.transport.receive().await {
            let events = match self.session.handle_message(&raw) {
                Ok(events) => events,
                Err(error) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        error = %error,
                        "closing session"
                    );
                    break;
                }
            };

            if let Err(error) = self.deliver(&events).await {
                tracing::warn!(
                    session_id = %self.session_id,
                    error = %error,
                    "delivery failed, closing session"
                );
                break;
            }
        }

        tracing::info!(
            session_id = %self.session_id,
            status = ?self.session.game().status(),
            "session closed"
        );
    }

    async fn deliver(&mut self, events: &[ServerEvent]) -> Result<(), String> {
        for event in events {
            match event {
                ServerEvent::Play {
                    player,
                    column,
                    row,
                } => {
                    tracing::debug!(
                        session_id = %self.session_id,
                        player = %player,
                        column,
                        row,
                        board = %self.session.game().board(),
                        "move applied"
                    );
                }
                ServerEvent::Error { message } => {
                    tracing::debug!(
                        session_id = %self.session_id,
                        message = %message,
                        "move rejected"
                    );
                }
                ServerEvent::Win { player } => {
                    tracing::info!(
                        session_id = %self.session_id,
                        player = %player,
                        "game won"
                    );
                }
            }
            self.transport.send(event).await?;
        }
        Ok(())
    }
}
