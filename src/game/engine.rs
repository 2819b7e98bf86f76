use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::error::EngineError;

use super::board::{Board, Cell};
use super::player::Player;

/// Columns currently accepting a drop.
pub type LegalColumns = SmallVec<[usize; 8]>;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

/// The board state machine: owns the grid, the turn counter, and the last
/// applied move, and is the only writer of all three.
///
/// The current player is always derived from the turn counter and the first
/// player, never stored, so "who moved" and "whose turn is next" cannot drift
/// apart. [`make_move`](Self::make_move) deliberately does not advance the
/// turn: callers inspect the post-move board (typically via
/// [`winner`](Self::winner)) while the counter still names the player who
/// just moved, then call [`advance_turn`](Self::advance_turn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEngine {
    board: Board,
    turn_counter: u32,
    first_player: Player,
    last_move: Option<(usize, usize)>,
}

impl BoardEngine {
    /// Create a new engine with an empty board and a uniformly random first
    /// player.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below [`MIN_DIM`](crate::game::MIN_DIM).
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut rng = StdRng::from_os_rng();
        let first = if rng.random_range(1..=2) == 1 {
            Player::One
        } else {
            Player::Two
        };
        Self::with_first_player(rows, cols, first)
    }

    /// Create a new engine with a fixed first player (deterministic setup).
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below [`MIN_DIM`](crate::game::MIN_DIM).
    pub fn with_first_player(rows: usize, cols: usize, first_player: Player) -> Self {
        BoardEngine {
            board: Board::new(rows, cols),
            turn_counter: 1,
            first_player,
            last_move: None,
        }
    }

    /// Create a new engine from a validated configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board.rows, config.board.cols)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    /// Raw turn counter, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn_counter
    }

    /// The most recently applied move, `None` before the first one.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Whose turn it is, derived from the turn counter and the first player.
    pub fn current_player(&self) -> Player {
        if (self.turn_counter + self.first_player.id() as u32) % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Cell value at a position, rejecting out-of-range coordinates.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        if row >= self.board.rows() || col >= self.board.cols() {
            return Err(EngineError::OutOfRange { row, col });
        }
        Ok(self.board.get(row, col))
    }

    /// Lowest empty row in a column, `None` when full or out of range.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        self.board.drop_row(col)
    }

    /// Columns that still accept a drop.
    pub fn legal_columns(&self) -> LegalColumns {
        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's disc into a column, returning the row it
    /// landed in. A rejected move leaves the board unchanged.
    ///
    /// The turn counter is not advanced here; see [`advance_turn`](Self::advance_turn).
    pub fn make_move(&mut self, col: usize) -> Result<usize, EngineError> {
        if col >= self.board.cols() {
            return Err(EngineError::IllegalColumn(col));
        }
        let row = self
            .board
            .drop_row(col)
            .ok_or(EngineError::ColumnFull(col))?;
        self.board.set(row, col, self.current_player().to_cell());
        self.last_move = Some((row, col));
        Ok(row)
    }

    /// Advance the turn counter by one, flipping the current player.
    pub fn advance_turn(&mut self) {
        self.turn_counter += 1;
    }

    /// Outcome of the game, recomputed from the last move and the turn
    /// counter: `None` while play continues.
    ///
    /// When a winning line through the last move is found, its four cells are
    /// overlaid with [`Cell::Win`] markers. Call this after
    /// [`make_move`](Self::make_move) and before
    /// [`advance_turn`](Self::advance_turn), so the reported winner is the
    /// player who just moved.
    pub fn winner(&mut self) -> Option<Outcome> {
        let (row, col) = self.last_move?;
        let mover = self.current_player();
        if let Some(run) = self.board.winning_run(row, col, mover.to_cell()) {
            for (r, c) in run {
                self.board.set(r, c, Cell::Win);
            }
            return Some(Outcome::Winner(mover));
        }
        if self.turn_counter as usize == self.board.rows() * self.board.cols() {
            return Some(Outcome::Tie);
        }
        None
    }
}
