//! Wire schema for session messages
//!
//! JSON objects tagged by `"type"`. Clients only ever name a target column;
//! the server infers which player is acting from turn order, so no inbound
//! message carries an identity. Column is decoded as a signed integer to
//! keep out-of-range values (including negatives) a game-level rejection
//! rather than a decode failure.

use crate::game::Player;
use serde::{Deserialize, Serialize};

/// A message received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Request to drop a mark into a column.
    Play { column: i64 },
}

/// A message sent to the clients of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A move was applied: `player` landed in `column` at `row`.
    Play {
        player: Player,
        column: usize,
        row: usize,
    },
    /// A move was rejected; the session continues.
    Error { message: String },
    /// The game ended with a winner. Always follows the play event for the
    /// winning move.
    Win { player: Player },
}
