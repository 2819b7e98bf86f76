use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::error::EvalError;
use crate::game::{Axis, BoardEngine, Cell, Player, COMBO_LEN, COMBO_STEP};

/// Cells gathered along one axis around a candidate: the candidate plus up
/// to [`COMBO_STEP`] cells on either side, the minimal span containing every
/// possible combination through it.
const WINDOW_SPAN: usize = 2 * COMBO_STEP + 1;

type AxisWindow = SmallVec<[Cell; WINDOW_SPAN]>;

// Immediate placement scores, highest first.
const WIN_NOW: i32 = 5000;
const BLOCK_WIN: i32 = 1000;
const OWN_PAIR: i32 = 10;
const OPP_PAIR: i32 = 5;
const LONE_DISC: i32 = 1;

// Penalties for what the reply drop above this column would enable.
const GIVE_WIN: i32 = -500;
const BLOCK_SELF: i32 = -100;
const FEED_PAIR: i32 = -10;

/// Heuristic move evaluator for one player.
///
/// Reads the board through [`BoardEngine`]'s queries and never mutates it.
/// The only state it keeps between calls is its RNG and the last suggestion.
#[derive(Debug)]
pub struct MoveEvaluator {
    player: Player,
    rng: StdRng,
    last_suggestion: Option<usize>,
}

impl MoveEvaluator {
    /// Create an evaluator playing for `player`, seeded from the OS.
    pub fn new(player: Player) -> Self {
        Self::with_rng(player, StdRng::from_os_rng())
    }

    /// Create an evaluator with a fixed seed, for reproducible tie-breaks.
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self::with_rng(player, StdRng::seed_from_u64(seed))
    }

    /// Create an evaluator from a validated configuration.
    pub fn from_config(player: Player, config: &GameConfig) -> Self {
        match config.evaluator.seed {
            Some(seed) => Self::with_seed(player, seed),
            None => Self::new(player),
        }
    }

    fn with_rng(player: Player, rng: StdRng) -> Self {
        MoveEvaluator {
            player,
            rng,
            last_suggestion: None,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Column returned by the most recent successful
    /// [`suggest_move`](Self::suggest_move) call.
    pub fn last_suggestion(&self) -> Option<usize> {
        self.last_suggestion
    }

    /// Recommend a column for this player to drop into.
    ///
    /// Every non-full column is scored by local pattern analysis around the
    /// cell the drop would fill; the best-scoring column wins, with ties
    /// broken uniformly at random. The `timeout` is currently advisory only:
    /// scoring always runs to completion.
    ///
    /// Fails with [`EvalError::WrongTurn`] when it is not this player's turn
    /// and [`EvalError::NoLegalMove`] when the board is full. On failure the
    /// cached suggestion is left untouched.
    pub fn suggest_move(
        &mut self,
        engine: &BoardEngine,
        _timeout: Option<Duration>,
    ) -> Result<usize, EvalError> {
        let current = engine.current_player();
        if current != self.player {
            return Err(EvalError::WrongTurn {
                player: self.player,
                current,
            });
        }

        let candidates: Vec<(usize, usize)> = (0..engine.cols())
            .filter_map(|col| engine.drop_row(col).map(|row| (row, col)))
            .collect();
        if candidates.is_empty() {
            return Err(EvalError::NoLegalMove);
        }

        // Random fallback in case no candidate ever takes the lead.
        let fallback = candidates[self.rng.random_range(0..candidates.len())].1;

        let mut best_score = -1;
        let mut leaders: SmallVec<[usize; 8]> = SmallVec::new();
        for &(row, col) in &candidates {
            let score =
                self.present_score(engine, row, col) + self.risk_score(engine, row, col);
            if score > best_score {
                best_score = score;
                leaders.clear();
                leaders.push(col);
            } else if score == best_score && !leaders.is_empty() {
                leaders.push(col);
            }
        }

        let choice = match leaders.len() {
            0 => fallback,
            1 => leaders[0],
            n => leaders[self.rng.random_range(0..n)],
        };
        self.last_suggestion = Some(choice);
        Ok(choice)
    }

    /// Score the position a drop into `(row, col)` would occupy.
    ///
    /// Slides a combination-sized sub-window across each axis window and
    /// tallies threats for both sides. A window that completes this player's
    /// combination dominates everything else and returns at once.
    fn present_score(&self, engine: &BoardEngine, row: usize, col: usize) -> i32 {
        let mut score = 0;
        for axis in Axis::ALL {
            let window = Self::axis_window(engine, axis, row, col, 0);
            for combo in window.windows(COMBO_LEN) {
                let (own, opp, empty) = self.tally(combo);
                if own == 3 && empty == 1 {
                    return WIN_NOW;
                }
                if opp == 3 && empty == 1 {
                    score += BLOCK_WIN;
                }
                if own == 2 && empty == 2 {
                    score += OWN_PAIR;
                }
                if opp == 2 && empty == 2 {
                    score += OPP_PAIR;
                }
                if own == 1 && empty == 3 {
                    score += LONE_DISC;
                }
                if opp == 1 && empty == 3 {
                    score += LONE_DISC;
                }
            }
        }
        score
    }

    /// Penalize what the cell directly above `(row, col)` — the one gravity
    /// fills if this column is played again — would hand the opponent.
    /// Vertical is skipped: stacking above cannot open a new vertical line
    /// through a different cell.
    fn risk_score(&self, engine: &BoardEngine, row: usize, col: usize) -> i32 {
        let mut score = 0;
        for axis in [Axis::Horizontal, Axis::DiagRight, Axis::DiagLeft] {
            let window = Self::axis_window(engine, axis, row, col, -1);
            for combo in window.windows(COMBO_LEN) {
                let (own, opp, empty) = self.tally(combo);
                if opp == 3 && empty == 1 {
                    score += GIVE_WIN;
                }
                if own == 3 && empty == 1 {
                    score += BLOCK_SELF;
                }
                if opp == 2 && empty == 2 {
                    score += FEED_PAIR;
                }
            }
        }
        score
    }

    /// Collect the in-bounds cells of the length-[`WINDOW_SPAN`] line
    /// centered on `(row + row_offset, col)` along an axis. A window too
    /// short to hold a combination is discarded as empty.
    fn axis_window(
        engine: &BoardEngine,
        axis: Axis,
        row: usize,
        col: usize,
        row_offset: i32,
    ) -> AxisWindow {
        let (dr, dc) = axis.delta();
        let step = COMBO_STEP as i32;
        let start_row = row as i32 + row_offset - step * dr;
        let start_col = col as i32 - step * dc;

        let mut cells = AxisWindow::new();
        for i in 0..WINDOW_SPAN as i32 {
            if let Some(cell) = engine.board().get_signed(start_row + i * dr, start_col + i * dc)
            {
                cells.push(cell);
            }
        }
        if cells.len() < COMBO_LEN {
            cells.clear();
        }
        cells
    }

    fn tally(&self, combo: &[Cell]) -> (usize, usize, usize) {
        let own_cell = self.player.to_cell();
        let opp_cell = self.player.other().to_cell();
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for &cell in combo {
            if cell == own_cell {
                own += 1;
            } else if cell == opp_cell {
                opp += 1;
            } else if cell == Cell::Empty {
                empty += 1;
            }
        }
        (own, opp, empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Outcome;

    fn play(engine: &mut BoardEngine, col: usize) {
        engine.make_move(col).unwrap();
        engine.advance_turn();
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let engine = BoardEngine::with_first_player(6, 7, Player::One);
        let mut evaluator = MoveEvaluator::with_seed(Player::Two, 7);
        assert_eq!(evaluator.player(), Player::Two);
        assert_eq!(
            evaluator.suggest_move(&engine, None),
            Err(EvalError::WrongTurn {
                player: Player::Two,
                current: Player::One,
            })
        );
        assert_eq!(evaluator.last_suggestion(), None);
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        for col in 0..7 {
            for _ in 0..6 {
                play(&mut engine, col);
            }
        }
        let mut evaluator = MoveEvaluator::with_seed(engine.current_player(), 7);
        assert_eq!(
            evaluator.suggest_move(&engine, None),
            Err(EvalError::NoLegalMove)
        );
    }

    #[test]
    fn test_never_suggests_a_full_column() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        for _ in 0..6 {
            play(&mut engine, 0);
        }
        let mut evaluator = MoveEvaluator::with_seed(engine.current_player(), 11);
        for _ in 0..50 {
            let col = evaluator.suggest_move(&engine, None).unwrap();
            assert_ne!(col, 0);
            assert!(engine.drop_row(col).is_some());
        }
    }

    #[test]
    fn test_only_open_column_is_suggested() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        for col in 0..6 {
            for _ in 0..6 {
                play(&mut engine, col);
            }
        }
        let mut evaluator = MoveEvaluator::with_seed(engine.current_player(), 3);
        assert_eq!(evaluator.suggest_move(&engine, None), Ok(6));
    }

    #[test]
    fn test_finds_winning_column() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        // One on the bottom row at 0, 1, 2; Two out of the way
        play(&mut engine, 0); // One (5,0)
        play(&mut engine, 6); // Two
        play(&mut engine, 1); // One (5,1)
        play(&mut engine, 6); // Two
        play(&mut engine, 2); // One (5,2)
        play(&mut engine, 5); // Two

        let mut evaluator = MoveEvaluator::with_seed(Player::One, 1);
        let col = evaluator.suggest_move(&engine, None).unwrap();
        assert_eq!(col, 3);
        assert_eq!(evaluator.last_suggestion(), Some(3));

        engine.make_move(col).unwrap();
        assert_eq!(engine.winner(), Some(Outcome::Winner(Player::One)));
        for col in 0..4 {
            assert_eq!(engine.cell_at(5, col).unwrap(), Cell::Win);
        }
    }

    #[test]
    fn test_blocks_opponent_threat() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        // One threatens at both ends of 1, 2, 3; Two must cover one of them
        play(&mut engine, 1); // One (5,1)
        play(&mut engine, 1); // Two (4,1)
        play(&mut engine, 2); // One (5,2)
        play(&mut engine, 2); // Two (4,2)
        play(&mut engine, 3); // One (5,3)

        let mut evaluator = MoveEvaluator::with_seed(Player::Two, 5);
        let col = evaluator.suggest_move(&engine, None).unwrap();
        assert!(
            col == 0 || col == 4,
            "expected a blocking column, got {col}"
        );
    }

    #[test]
    fn test_win_dominates_block() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        // One holds the bottom row at 0..2, Two the row above: both would
        // complete at column 3, and One moves first
        for col in 0..3 {
            play(&mut engine, col); // One
            play(&mut engine, col); // Two
        }
        let mut evaluator = MoveEvaluator::with_seed(Player::One, 9);
        for _ in 0..20 {
            assert_eq!(evaluator.suggest_move(&engine, None), Ok(3));
        }
    }

    #[test]
    fn test_tied_leaders_split_roughly_evenly() {
        let mut engine = BoardEngine::with_first_player(6, 7, Player::One);
        // One's open-ended triple on 2, 3, 4; Two's own discs stacked on the
        // center column keep the position mirror-symmetric, so the blocking
        // columns 1 and 5 score identically.
        play(&mut engine, 3); // One (5,3)
        play(&mut engine, 3); // Two (4,3)
        play(&mut engine, 2); // One (5,2)
        play(&mut engine, 3); // Two (3,3)
        play(&mut engine, 4); // One (5,4)

        let mut evaluator = MoveEvaluator::with_seed(Player::Two, 42);
        let mut picks = [0usize; 7];
        let trials = 200usize;
        for _ in 0..trials {
            let col = evaluator.suggest_move(&engine, None).unwrap();
            picks[col] += 1;
        }
        assert_eq!(picks[1] + picks[5], trials, "picks: {picks:?}");
        assert!(picks[1] > trials / 4, "picks: {picks:?}");
        assert!(picks[5] > trials / 4, "picks: {picks:?}");
    }

    #[test]
    fn test_seeded_evaluators_agree() {
        let engine = BoardEngine::with_first_player(6, 7, Player::One);
        let mut a = MoveEvaluator::with_seed(Player::One, 123);
        let mut b = MoveEvaluator::with_seed(Player::One, 123);
        for _ in 0..10 {
            assert_eq!(
                a.suggest_move(&engine, None).unwrap(),
                b.suggest_move(&engine, None).unwrap()
            );
        }
    }

    #[test]
    fn test_timeout_is_accepted() {
        let engine = BoardEngine::with_first_player(6, 7, Player::One);
        let mut evaluator = MoveEvaluator::with_seed(Player::One, 2);
        let col = evaluator
            .suggest_move(&engine, Some(Duration::from_millis(1)))
            .unwrap();
        assert!(col < 7);
    }
}
