use std::fmt;

/// Number of same-player discs in a row required to win.
pub const COMBO_LEN: usize = 4;

/// Offset from a cell to the far end of a combination through it.
pub const COMBO_STEP: usize = COMBO_LEN - 1;

/// Smallest board dimension on which a combination fits.
pub const MIN_DIM: usize = COMBO_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
    /// Overlay for the four cells of a confirmed winning line. Terminal: a
    /// `Win` cell is never written again.
    Win,
}

/// One of the four directions a winning line can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    DiagRight,
    DiagLeft,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagRight,
        Axis::DiagLeft,
    ];

    /// Per-step `(row_delta, col_delta)` when walking along this axis.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagRight => (1, 1),
            Axis::DiagLeft => (1, -1),
        }
    }
}

/// A rectangular grid of cells. Row 0 is the top; gravity fills columns from
/// the highest row index upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below [`MIN_DIM`]: a smaller grid can
    /// never hold a winning combination, so this is a caller bug rather than
    /// a runtime condition.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows >= MIN_DIM && cols >= MIN_DIM,
            "board must be at least {MIN_DIM}x{MIN_DIM}, got {rows}x{cols}"
        );
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `rows - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Get a cell by signed coordinates, `None` when outside the grid.
    pub fn get_signed(&self, row: i32, col: i32) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.get(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Lowest empty row in a column, scanning from the bottom upward.
    /// `None` when the column is full or the index is out of range.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Find a winning run of `cell` through `(row, col)`, if one exists.
    ///
    /// For each axis the walk starts at the anchor — the topmost/leftmost
    /// cell of the board-spanning line through the position — and maintains
    /// a run counter that resets on any cell not equal to `cell`. The first
    /// run to reach [`COMBO_LEN`] is returned. Only lines through the last
    /// placed disc can newly become winning, so seeding from it is enough.
    pub(crate) fn winning_run(
        &self,
        row: usize,
        col: usize,
        cell: Cell,
    ) -> Option<[(usize, usize); COMBO_LEN]> {
        for axis in Axis::ALL {
            let (dr, dc) = axis.delta();
            let (mut r, mut c) = self.anchor(axis, row, col);
            let mut run = 0;
            while self.in_bounds(r, c) {
                if self.get(r as usize, c as usize) == cell {
                    run += 1;
                    if run == COMBO_LEN {
                        let mut cells = [(0, 0); COMBO_LEN];
                        for (i, slot) in cells.iter_mut().enumerate() {
                            let back = (COMBO_STEP - i) as i32;
                            *slot = ((r - dr * back) as usize, (c - dc * back) as usize);
                        }
                        return Some(cells);
                    }
                } else {
                    run = 0;
                }
                r += dr;
                c += dc;
            }
        }
        None
    }

    /// Boundary-clamped starting cell of the full line through `(row, col)`
    /// along an axis.
    fn anchor(&self, axis: Axis, row: usize, col: usize) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (row as i32, 0),
            Axis::Vertical => (0, col as i32),
            // Cells on a down-right diagonal share `row - col`.
            Axis::DiagRight => {
                if row < col {
                    (0, (col - row) as i32)
                } else {
                    ((row - col) as i32, 0)
                }
            }
            // Cells on a down-left diagonal share `row + col`.
            Axis::DiagLeft => {
                let sum = row + col;
                let last_col = self.cols - 1;
                if sum <= last_col {
                    (0, sum as i32)
                } else {
                    ((sum - last_col) as i32, last_col as i32)
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::One => '1',
                    Cell::Two => '2',
                    Cell::Win => '*',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
