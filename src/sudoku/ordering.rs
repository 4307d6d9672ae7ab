#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Search-order heuristics for the unsolved cell list.

use crate::sudoku::board::Board;
use crate::sudoku::cell::CellRef;

/// Orders the unsolved list once, before the search starts.
///
/// The order encodes search priority: the solver always branches on the
/// front cell. Correctness does not depend on the order, only the shape
/// of the search tree (and the order solutions are enumerated in) does.
pub trait CellOrdering {
    /// Reorders `unsolved` in place against the freshly loaded `board`.
    fn order(&mut self, board: &Board, unsolved: &mut [CellRef]);
}

/// Leaves cells exactly as the loader produced them (row-major).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionOrder;

impl CellOrdering for InsertionOrder {
    fn order(&mut self, _board: &Board, _unsolved: &mut [CellRef]) {}
}

/// Fewest legal symbols first; ties keep row-major order (stable sort).
///
/// Counts are taken once against the loaded givens, not re-evaluated as
/// the search fills cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastCandidates;

impl CellOrdering for LeastCandidates {
    fn order(&mut self, board: &Board, unsolved: &mut [CellRef]) {
        unsolved.sort_by_key(|&cell| board.candidate_count(cell));
    }
}

/// Uniformly random order.
#[derive(Debug, Clone, Default)]
pub struct RandomOrder(fastrand::Rng);

impl RandomOrder {
    /// A seeded ordering, for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl CellOrdering for RandomOrder {
    fn order(&mut self, _board: &Board, unsolved: &mut [CellRef]) {
        self.0.shuffle(unsolved);
    }
}
