//! Core gravity-drop game logic: board grid, players, and the turn state
//! machine with last-move-seeded win detection.

mod board;
mod engine;
mod player;

pub use board::{Axis, Board, Cell, COMBO_LEN, COMBO_STEP, MIN_DIM};
pub use engine::{BoardEngine, LegalColumns, Outcome};
pub use player::Player;
