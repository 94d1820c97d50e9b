//! Board grid, gravity placement, and win scanning

use super::{PlayError, Player};
use std::fmt;

/// Number of rows on the board.
pub const ROWS: usize = 6;
/// Number of columns on the board.
pub const COLUMNS: usize = 7;
/// Length of a winning line.
pub const WIN_LENGTH: usize = 4;

/// The four scan axes through a cell, as (row, column) steps in
/// bottom-origin coordinates: horizontal, vertical, and both diagonals.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A fixed `ROWS` x `COLUMNS` grid of cells.
///
/// Row 0 is the bottom row; marks stack upward. Gravity invariant: a cell
/// is occupied only if every cell below it in the same column is occupied.
/// The only mutation path is [`Board::drop_piece`], which preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Player>; COLUMNS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; COLUMNS]; ROWS],
        }
    }

    /// Get the cell at a specific position. Row 0 is the bottom.
    pub fn get(&self, row: usize, column: usize) -> Option<Player> {
        self.cells[row][column]
    }

    /// Number of occupied cells in a column. By the gravity invariant this
    /// is also the row the next mark in the column lands in.
    pub fn column_height(&self, column: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| self.get(row, column).is_some())
            .count()
    }

    /// Check if a column has no empty cell left
    pub fn is_column_full(&self, column: usize) -> bool {
        if column >= COLUMNS {
            return true;
        }
        self.cells[ROWS - 1][column].is_some()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|column| self.is_column_full(column))
    }

    /// Drop a mark in a column, returns the row where it landed
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<usize, PlayError> {
        if column >= COLUMNS {
            return Err(PlayError::InvalidColumn);
        }

        let row = self.column_height(column);
        if row >= ROWS {
            return Err(PlayError::ColumnFull);
        }

        self.cells[row][column] = Some(player);
        Ok(row)
    }

    /// Check if the mark at (row, column) completes a line of at least
    /// [`WIN_LENGTH`].
    ///
    /// Scans outward in both directions along each of the four axes,
    /// counting contiguous same-player cells including the one at
    /// (row, column). Any line created by a placement passes through the
    /// placed cell, so this matches a full-board scan.
    pub fn is_winning_cell(&self, row: usize, column: usize) -> bool {
        let Some(player) = self.cells[row][column] else {
            return false;
        };

        AXES.iter().any(|&(row_step, col_step)| {
            let line = 1
                + self.run_length(row, column, player, row_step, col_step)
                + self.run_length(row, column, player, -row_step, -col_step);
            line >= WIN_LENGTH
        })
    }

    /// Count contiguous cells belonging to `player` strictly beyond
    /// (row, column) in the direction (`row_step`, `col_step`).
    fn run_length(
        &self,
        row: usize,
        column: usize,
        player: Player,
        row_step: isize,
        col_step: isize,
    ) -> usize {
        let mut count = 0;
        let mut current = (row, column);

        loop {
            let next_row = current.0.checked_add_signed(row_step);
            let next_col = current.1.checked_add_signed(col_step);
            let (Some(next_row), Some(next_col)) = (next_row, next_col) else {
                return count;
            };
            if next_row >= ROWS || next_col >= COLUMNS {
                return count;
            }
            if self.cells[next_row][next_col] != Some(player) {
                return count;
            }
            count += 1;
            current = (next_row, next_col);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the grid top row first, `.` for empty cells and the player
/// number for occupied ones. Used in debug logs and test failures.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            for cell in row {
                match cell {
                    None => write!(f, ".")?,
                    Some(player) => write!(f, "{player}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
