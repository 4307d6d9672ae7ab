#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error taxonomy for board construction and loading.
//!
//! Only problems with the *givens* are errors. An exhausted search (a
//! puzzle with no completion) is a normal outcome reported through
//! [`SearchSummary`](crate::sudoku::solver::SearchSummary), never through
//! this type, and cancellation is a control signal.

use crate::sudoku::cell::CellRef;
use std::error::Error;
use std::fmt;

/// Everything that can go wrong before the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudokuError {
    /// A given value conflicts with an earlier given in the same row,
    /// column or block. Fatal to loading: parsing halts at the offending
    /// cell and no search is attempted.
    BoardInconsistent {
        /// The cell the conflicting value was destined for.
        cell: CellRef,
        /// The value that failed the constraint check.
        symbol: usize,
    },

    /// The requested grid size has no integer square root, so no block
    /// structure exists. Fails at construction, before any parsing.
    MalformedSize {
        /// The rejected size.
        size: usize,
    },

    /// The token stream ended before all `N * N` cells were filled.
    TruncatedInput {
        /// Cells the board needed.
        expected: usize,
        /// Cells the stream provided.
        found: usize,
    },
}

impl fmt::Display for SudokuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardInconsistent { cell, symbol } => {
                write!(f, "invalid board: symbol {symbol} conflicts at {cell}")
            }
            Self::MalformedSize { size } => {
                write!(f, "invalid size {size}: not a perfect square")
            }
            Self::TruncatedInput { expected, found } => {
                write!(
                    f,
                    "input ended early: expected {expected} cells, found {found}"
                )
            }
        }
    }
}

impl Error for SudokuError {}
