#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint-tracking board model.
//!
//! A [`Board`] is a flat, row-major array of `N * N` cell values (0 =
//! empty, `1..=N` = placed symbol) plus three [`ConstraintSet`]s, one per
//! group family (rows, columns, blocks). Every placement updates the
//! value array and all three masks together, so testing whether a symbol
//! is legal for a cell is a constant-time mask lookup rather than a scan
//! of the cell's twenty-plus peers.
//!
//! The board does not re-validate placements: [`Board::place`] requires
//! that the caller has checked the move with [`Board::check`], and
//! [`Board::unplace`] must pair LIFO with the `place` that filled the
//! cell. The [`Solver`](crate::sudoku::solver::Solver)'s recursion
//! structure enforces that discipline; the board itself only asserts it
//! in debug builds.

use crate::sudoku::cell::CellRef;
use crate::sudoku::constraint::ConstraintSet;
use crate::sudoku::error::SudokuError;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// Candidate lists stay inline up to this many symbols.
type Candidates = SmallVec<[usize; 16]>;

/// An N x N Sudoku grid with incrementally maintained group masks.
///
/// Invariant: for every filled cell the corresponding bit is set in the
/// masks of all three of its groups; for every empty cell no mask owes it
/// a bit. Equivalently, the masks are exactly the union of the placed
/// cells, which is what makes `check` + `place` + `unplace` a round trip
/// back to the identical board state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    block_size: usize,
    cells: Vec<usize>,
    rows: ConstraintSet,
    cols: ConstraintSet,
    blocks: ConstraintSet,
}

impl Board {
    /// Creates an empty board of `size` symbols per group.
    ///
    /// # Errors
    ///
    /// Returns [`SudokuError::MalformedSize`] when `size` is zero or its
    /// square root is not an integer (no block structure exists).
    pub fn new(size: usize) -> Result<Self, SudokuError> {
        let block_size = size.isqrt();
        if size == 0 || block_size * block_size != size {
            return Err(SudokuError::MalformedSize { size });
        }
        Ok(Self {
            size,
            block_size,
            cells: vec![0; size * size],
            rows: ConstraintSet::new(size, size),
            cols: ConstraintSet::new(size, size),
            blocks: ConstraintSet::new(size, size),
        })
    }

    /// The number of symbols (and of rows, columns and blocks).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cells on one side of a block; the square root of `size`.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of cells, `size * size`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Builds the handle for the cell at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`Self::cell_count`].
    #[must_use]
    pub fn cell(&self, index: usize) -> CellRef {
        assert!(index < self.cell_count(), "cell index out of range");
        CellRef::new(index, self.size, self.block_size)
    }

    /// The current value at `cell`; 0 when empty.
    #[must_use]
    pub fn value(&self, cell: CellRef) -> usize {
        self.cells[cell.index()]
    }

    /// Returns `true` iff `symbol` is legal for `cell`: its bit is clear
    /// in the union of the cell's row, column and block masks. No side
    /// effects, O(1).
    #[must_use]
    pub fn check(&self, cell: CellRef, symbol: usize) -> bool {
        !(self.rows.contains(cell.row(), symbol)
            || self.cols.contains(cell.col(), symbol)
            || self.blocks.contains(cell.block(), symbol))
    }

    /// Writes `symbol` into `cell` and sets its bit in all three group
    /// masks.
    ///
    /// Precondition: the caller has verified [`Self::check`]; placing a
    /// conflicting value corrupts the masks.
    pub fn place(&mut self, cell: CellRef, symbol: usize) {
        debug_assert!(self.check(cell, symbol), "placing a conflicting symbol");
        debug_assert_eq!(self.cells[cell.index()], 0, "placing into a filled cell");
        self.cells[cell.index()] = symbol;
        self.rows.insert(cell.row(), symbol);
        self.cols.insert(cell.col(), symbol);
        self.blocks.insert(cell.block(), symbol);
    }

    /// Empties `cell` and clears its symbol's bit from all three group
    /// masks. Must pair LIFO with the [`Self::place`] that filled the
    /// cell; calling it on an empty cell is a caller bug.
    pub fn unplace(&mut self, cell: CellRef) {
        let symbol = self.cells[cell.index()];
        debug_assert_ne!(symbol, 0, "unplacing an empty cell");
        self.cells[cell.index()] = 0;
        self.rows.remove(cell.row(), symbol);
        self.cols.remove(cell.col(), symbol);
        self.blocks.remove(cell.block(), symbol);
    }

    /// Number of symbols still legal for `cell`. O(N); used only by
    /// ordering heuristics.
    #[must_use]
    pub fn candidate_count(&self, cell: CellRef) -> usize {
        (1..=self.size)
            .filter(|&symbol| self.check(cell, symbol))
            .count()
    }

    /// The symbols still legal for `cell`, ascending. O(N).
    #[must_use]
    pub fn candidates(&self, cell: CellRef) -> Candidates {
        (1..=self.size)
            .filter(|&symbol| self.check(cell, symbol))
            .collect()
    }

    /// Returns `true` when every cell holds a symbol.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Takes an immutable copy of the current cell values. The snapshot
    /// is independent of the board: later placements and backtracking do
    /// not touch it.
    #[must_use]
    pub fn snapshot(&self) -> Solution {
        Solution {
            size: self.size,
            block_size: self.block_size,
            cells: self.cells.clone(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cells(f, self.size, &self.cells)
    }
}

/// A completed (or, for progress reports, partial) assignment frozen at a
/// point in time.
///
/// Solutions are created fresh from [`Board::snapshot`] each time the
/// search fills the last cell, so the backtracking that follows cannot
/// corrupt an already-emitted solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    size: usize,
    block_size: usize,
    cells: Vec<usize>,
}

impl Solution {
    /// The number of symbols per group.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The frozen cell values, row-major.
    #[must_use]
    pub fn values(&self) -> &[usize] {
        &self.cells
    }

    /// The frozen value at `(row, col)`.
    #[must_use]
    pub fn value_at(&self, row: usize, col: usize) -> usize {
        self.cells[row * self.size + col]
    }

    /// Checks the uniqueness invariant: every cell filled, and every row,
    /// column and block containing each symbol `1..=N` exactly once.
    #[must_use]
    pub fn verify(&self) -> bool {
        let n = self.size;
        let groups = [
            Self::row_of as fn(&Self, usize, usize) -> usize,
            Self::col_of,
            Self::block_of,
        ];
        groups.iter().all(|group_of| {
            (0..n).all(|group| {
                let mut seen = vec![false; n];
                (0..n).all(|member| {
                    let value = self.cells[group_of(self, group, member)];
                    value >= 1 && value <= n && !std::mem::replace(&mut seen[value - 1], true)
                })
            })
        })
    }

    fn row_of(&self, group: usize, member: usize) -> usize {
        group * self.size + member
    }

    fn col_of(&self, group: usize, member: usize) -> usize {
        member * self.size + group
    }

    fn block_of(&self, group: usize, member: usize) -> usize {
        let b = self.block_size;
        let row = (group / b) * b + member / b;
        let col = (group % b) * b + member % b;
        row * self.size + col
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cells(f, self.size, &self.cells)
    }
}

/// Renders `cells` as `size` rows of space-joined values, one row per
/// line, with a trailing newline after the final row.
fn fmt_cells(f: &mut fmt::Formatter<'_>, size: usize, cells: &[usize]) -> fmt::Result {
    for row in cells.chunks(size) {
        writeln!(f, "{}", row.iter().join(" "))?;
    }
    Ok(())
}
