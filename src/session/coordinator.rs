//! Move handling for one session

use crate::game::{Game, PlayError, Player};
use crate::protocol::{ClientEvent, ServerEvent};
use thiserror::Error;

/// Decide who acts next from who moved last: the first move belongs to
/// player one, and every later move flips from whoever moved last.
///
/// Clients never claim an identity. With exactly two players sharing one
/// ordered connection, move history alone determines whose turn it is, and
/// this policy can be swapped (say, for authenticated seats) without
/// touching the engine.
pub fn next_player(last_player: Option<Player>) -> Player {
    match last_player {
        None => Player::One,
        Some(player) => player.other(),
    }
}

/// Inbound text that does not decode as a client event.
///
/// Unlike a rejected move, this is a client speaking the wrong protocol and
/// ends the session.
#[derive(Debug, Error)]
#[error("malformed client message: {0}")]
pub struct ProtocolError(#[from] serde_json::Error);

/// Bridges one inbound message stream to one game.
///
/// Owns the game, infers the acting player, and translates each inbound
/// message into the ordered outbound events it produces.
#[derive(Debug, Default)]
pub struct GameSession {
    game: Game,
}

impl GameSession {
    pub fn new() -> Self {
        Self { game: Game::new() }
    }

    /// The underlying game
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle one raw inbound message, returning the events to deliver in
    /// order.
    ///
    /// A rejected move yields a single error event; an applied move yields
    /// a play event, followed by a win event when it ends the game. Either
    /// way the session keeps accepting messages. Only undecodable text
    /// fails, with a [`ProtocolError`].
    pub fn handle_message(&mut self, raw: &str) -> Result<Vec<ServerEvent>, ProtocolError> {
        let ClientEvent::Play { column } = serde_json::from_str(raw)?;
        Ok(self.handle_play(column))
    }

    fn handle_play(&mut self, column: i64) -> Vec<ServerEvent> {
        let player = next_player(self.game.last_player());

        // The wire carries a signed column; a negative index is the same
        // rejection as a too-large one.
        let outcome = usize::try_from(column)
            .map_err(|_| PlayError::InvalidColumn)
            .and_then(|column| self.game.play(player, column).map(|row| (column, row)));

        match outcome {
            Err(error) => vec![ServerEvent::Error {
                message: error.to_string(),
            }],
            Ok((column, row)) => {
                let mut events = vec![ServerEvent::Play {
                    player,
                    column,
                    row,
                }];
                if self.game.winner() == Some(player) {
                    events.push(ServerEvent::Win { player });
                }
                events
            }
        }
    }
}
