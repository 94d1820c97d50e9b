//! Mock transports for session tests
//!
//! These run the session loop without real sockets.

use super::traits::Transport;
use crate::protocol::ServerEvent;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Transport with a scripted inbound queue. Once the script runs out the
/// channel reads as closed, like a client that sent its messages and
/// disconnected.
pub struct MockTransport {
    inbound: VecDeque<String>,
    sent: Arc<Mutex<Vec<ServerEvent>>>,
}

impl MockTransport {
    pub fn new<I, S>(inbound: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inbound: inbound.into_iter().map(Into::into).collect(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the events delivered through this transport, in order
    pub fn outbox(&self) -> Arc<Mutex<Vec<ServerEvent>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn receive(&mut self) -> Option<String> {
        self.inbound.pop_front()
    }

    async fn send(&mut self, event: &ServerEvent) -> Result<(), String> {
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Transport fed by an mpsc channel, for tests that interleave sending
/// with a live session task. Dropping the sender closes the session.
pub struct ChannelTransport {
    inbound: mpsc::Receiver<String>,
    sent: Arc<Mutex<Vec<ServerEvent>>>,
}

impl ChannelTransport {
    pub fn channel() -> (mpsc::Sender<String>, Self) {
        let (tx, rx) = mpsc::channel(32);
        let transport = Self {
            inbound: rx,
            sent: Arc::new(Mutex::new(Vec::new())),
        };
        (tx, transport)
    }

    /// Handle to the events delivered through this transport, in order
    pub fn outbox(&self) -> Arc<Mutex<Vec<ServerEvent>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn receive(&mut self) -> Option<String> {
        self.inbound.recv().await
    }

    async fn send(&mut self, event: &ServerEvent) -> Result<(), String> {
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use crate::session::SessionRuntime;
    use std::time::Duration;

    fn play(column: i64) -> String {
        format!(r#"{{"type": "play", "column": {column}}}"#)
    }

    /// Poll the outbox until it holds `count` events or the timeout passes
    async fn wait_for_events(
        outbox: &Arc<Mutex<Vec<ServerEvent>>>,
        count: usize,
        timeout: Duration,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if outbox.lock().unwrap().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_moves_produce_play_events() {
        let transport = MockTransport::new([play(3), play(3)]);
        let outbox = transport.outbox();

        SessionRuntime::new("test-session", transport).run().await;

        let sent = outbox.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                ServerEvent::Play {
                    player: Player::One,
                    column: 3,
                    row: 0,
                },
                ServerEvent::Play {
                    player: Player::Two,
                    column: 3,
                    row: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_win_event_is_delivered_after_its_play_event() {
        // Player one stacks column 0 to a vertical four while player two
        // plays column 6
        let transport =
            MockTransport::new([play(0), play(6), play(0), play(6), play(0), play(6), play(0)]);
        let outbox = transport.outbox();

        SessionRuntime::new("test-session", transport).run().await;

        let sent = outbox.lock().unwrap();
        assert_eq!(sent.len(), 8);
        assert!(sent[..6]
            .iter()
            .all(|event| matches!(event, ServerEvent::Play { .. })));
        assert_eq!(
            sent[6],
            ServerEvent::Play {
                player: Player::One,
                column: 0,
                row: 3,
            }
        );
        assert_eq!(
            sent[7],
            ServerEvent::Win {
                player: Player::One,
            }
        );
    }

    #[tokio::test]
    async fn test_session_continues_after_rejected_move() {
        let transport = MockTransport::new([play(99), play(0)]);
        let outbox = transport.outbox();

        SessionRuntime::new("test-session", transport).run().await;

        let sent = outbox.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                ServerEvent::Error {
                    message: "column is out of bounds".to_string(),
                },
                ServerEvent::Play {
                    player: Player::One,
                    column: 0,
                    row: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_message_closes_the_session() {
        // The valid move behind the garbage must never be read
        let transport = MockTransport::new(["{\"type\": \"dance\"}".to_string(), play(0)]);
        let outbox = transport.outbox();

        SessionRuntime::new("test-session", transport).run().await;

        assert!(outbox.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_ends_the_session_task() {
        let (tx, transport) = ChannelTransport::channel();

        let handle = tokio::spawn(SessionRuntime::new("test-session", transport).run());

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("session task should end on disconnect")
            .unwrap();
    }

    #[tokio::test]
    async fn test_messages_are_handled_in_arrival_order() {
        let (tx, transport) = ChannelTransport::channel();
        let outbox = transport.outbox();

        let handle = tokio::spawn(SessionRuntime::new("test-session", transport).run());

        tx.send(play(0)).await.unwrap();
        assert!(wait_for_events(&outbox, 1, Duration::from_secs(1)).await);

        tx.send(play(1)).await.unwrap();
        assert!(wait_for_events(&outbox, 2, Duration::from_secs(1)).await);

        {
            let sent = outbox.lock().unwrap();
            assert_eq!(
                *sent,
                vec![
                    ServerEvent::Play {
                        player: Player::One,
                        column: 0,
                        row: 0,
                    },
                    ServerEvent::Play {
                        player: Player::Two,
                        column: 1,
                        row: 0,
                    },
                ]
            );
        }

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("session task should end on disconnect")
            .unwrap();
    }
}
