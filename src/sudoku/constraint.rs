#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-group occupancy masks for the Sudoku board.
//!
//! A Sudoku grid constrains three families of groups: rows, columns and
//! blocks. Within each group every symbol `1..=N` may appear at most once.
//! A `ConstraintSet` tracks one family as a set of bitmasks, one mask per
//! group, where bit `k` records that symbol `k + 1` is already placed
//! somewhere in that group.
//!
//! The masks are backed by [`bit_vec::BitVec`], so grids larger than the
//! native word size (N > 32 symbols) are supported without a special case.

use bit_vec::BitVec;

/// One bitmask per group of a single family (all rows, all columns, or all
/// blocks).
///
/// Membership tests and updates are O(1). The invariant maintained by the
/// [`Board`](crate::sudoku::board::Board) is that a bit is set if and only
/// if the corresponding symbol is currently placed in a cell of that group:
/// masks reflect placed cells, nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    masks: Vec<BitVec>,
    symbols: usize,
}

impl ConstraintSet {
    /// Creates masks for `groups` groups of `symbols` symbols each, all
    /// empty.
    #[must_use]
    pub fn new(groups: usize, symbols: usize) -> Self {
        Self {
            masks: vec![BitVec::from_elem(symbols, false); groups],
            symbols,
        }
    }

    /// Returns `true` iff `symbol` is already placed somewhere in `group`.
    ///
    /// # Panics
    ///
    /// If `group` is out of range or `symbol` is not in `1..=symbols`.
    #[must_use]
    pub fn contains(&self, group: usize, symbol: usize) -> bool {
        debug_assert!(symbol >= 1 && symbol <= self.symbols);
        self.masks[group][symbol - 1]
    }

    /// Marks `symbol` as placed in `group`.
    pub fn insert(&mut self, group: usize, symbol: usize) {
        debug_assert!(symbol >= 1 && symbol <= self.symbols);
        self.masks[group].set(symbol - 1, true);
    }

    /// Clears `symbol` from `group`.
    pub fn remove(&mut self, group: usize, symbol: usize) {
        debug_assert!(symbol >= 1 && symbol <= self.symbols);
        self.masks[group].set(symbol - 1, false);
    }

    /// Number of symbols currently placed in `group`. O(N); used for
    /// display and diagnostics, not on the search path.
    #[must_use]
    pub fn len(&self, group: usize) -> usize {
        self.masks[group].iter().filter(|taken| *taken).count()
    }

    /// Returns `true` if no symbol is placed in `group`.
    #[must_use]
    pub fn is_empty(&self, group: usize) -> bool {
        self.masks[group].none()
    }
}
