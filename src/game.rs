//! Game engine: board state, gravity placement, and win detection
//!
//! [`Game`] is a pure state machine with no I/O. It records which player
//! moved last but does not enforce turn order; deciding who acts belongs to
//! the session layer (see `session::next_player`). A move either applies
//! fully or fails leaving the game untouched.

mod board;
mod player;


pub use board::{Board, COLUMNS, ROWS, WIN_LENGTH};
pub use player::Player;

use thiserror::Error;

/// Why a move was rejected. Rejected moves never modify the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Column index outside `[0, COLUMNS)`.
    #[error("column is out of bounds")]
    InvalidColumn,
    /// Every row in the column is occupied.
    #[error("column is full")]
    ColumnFull,
    /// The game already ended in a win or a draw.
    #[error("the game is already over")]
    GameOver,
}

/// Gameplay status, derived from the winner and the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

/// One Connect Four game: a board plus move bookkeeping.
///
/// Created empty, mutated only through [`Game::play`]. Once a winning line
/// forms the winner is fixed and further moves are rejected; a full board
/// with no winner is a draw and is likewise terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    last_player: Option<Player>,
    winner: Option<Player>,
}

impl Game {
    /// Create a game with an empty board and no move history
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            last_player: None,
            winner: None,
        }
    }

    /// Get a reference to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player who made the most recent move, if any
    pub fn last_player(&self) -> Option<Player> {
        self.last_player
    }

    /// The winning player, once a line of [`WIN_LENGTH`] has formed
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Current gameplay status
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) => GameStatus::Won(player),
            None if self.board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Check if the game has ended (won or drawn)
    pub fn is_over(&self) -> bool {
        !matches!(self.status(), GameStatus::InProgress)
    }

    /// Drop `player`'s mark into `column`, returning the row it landed in.
    ///
    /// Row 0 is the bottom. On success `last_player` is updated and, if the
    /// mark completed a winning line, the winner is set. Fails with
    /// [`PlayError::GameOver`] once the game is terminal; any failure
    /// leaves the game unmodified.
    pub fn play(&mut self, player: Player, column: usize) -> Result<usize, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let row = self.board.drop_piece(column, player)?;
        self.last_player = Some(player);

        if self.board.is_winning_cell(row, column) {
            self.winner = Some(player);
        }

        Ok(row)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
