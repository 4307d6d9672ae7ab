#![deny(missing_docs)]
//! This crate provides a backtracking solver for N x N Sudoku puzzles,
//! where N is any perfect square.

/// The `sudoku` module implements the puzzle model, loader and search
/// engine.
pub mod sudoku;
