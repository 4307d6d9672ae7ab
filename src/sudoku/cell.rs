#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Lightweight cell handles.
//!
//! A [`CellRef`] identifies one cell of a board: its linear index plus the
//! row, column and block groups it belongs to, all computed once at
//! construction. The handle carries no value; values live in the
//! [`Board`](crate::sudoku::board::Board), and many `CellRef`s may refer
//! into one board.

use std::fmt;

/// Immutable identity of a single cell.
///
/// The block index of cell `(r, c)` on an N x N board with block size
/// `b = sqrt(N)` is `b * (r / b) + c / b` (integer division).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    index: usize,
    row: usize,
    col: usize,
    block: usize,
}

impl CellRef {
    /// Computes the handle for `index` on a board of `size` symbols with
    /// blocks of `block_size` cells on a side.
    #[must_use]
    pub(crate) const fn new(index: usize, size: usize, block_size: usize) -> Self {
        let row = index / size;
        let col = index % size;
        Self {
            index,
            row,
            col,
            block: block_size * (row / block_size) + col / block_size,
        }
    }

    /// The cell's linear, row-major index in `0..N*N`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The cell's row in `0..N`.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The cell's column in `0..N`.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// The cell's block in `0..N`.
    #[must_use]
    pub const fn block(&self) -> usize {
        self.block
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell at index: {} row: {} col: {} block: {}",
            self.index, self.row, self.col, self.block
        )
    }
}
