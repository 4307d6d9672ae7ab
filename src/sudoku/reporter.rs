#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Progress and result notifications.
//!
//! The engine reports through an injected [`Reporter`] rather than by
//! printing: the loader's outcome, periodic statistics during long
//! searches, each completed solution, and a final "done" with the closing
//! statistics. All methods are pure notifications with no return value;
//! the search never blocks on, or changes course because of, a reporter.

use crate::sudoku::board::{Board, Solution};
use crate::sudoku::error::SudokuError;
use crate::sudoku::solver::SearchStats;

/// Receiver for engine events. Every method defaults to a no-op, so
/// implementations override only what they care about.
pub trait Reporter {
    /// The loader finished and produced a consistent board.
    fn on_parsed(&mut self, board: &Board) {
        let _ = board;
    }

    /// Periodic tick during search: current counters and the (possibly
    /// partial) board contents at this moment.
    fn on_progress(&mut self, stats: &SearchStats, board: &Board) {
        let _ = (stats, board);
    }

    /// The search filled every cell; `solution` is a stable snapshot.
    fn on_solution(&mut self, solution: &Solution) {
        let _ = solution;
    }

    /// Loading failed; no search will run.
    fn on_error(&mut self, error: &SudokuError) {
        let _ = error;
    }

    /// The search halted (exhausted, limit reached, or cancelled).
    fn on_done(&mut self, stats: &SearchStats) {
        let _ = stats;
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}
