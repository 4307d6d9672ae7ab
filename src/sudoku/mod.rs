#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving N x N Sudoku puzzles.

/// The `board` module holds the constraint-tracking grid and solution snapshots.
pub mod board;

/// The `cell` module defines the immutable per-cell coordinate handle.
pub mod cell;

/// The `constraint` module implements the per-group symbol bitmasks.
pub mod constraint;

/// The `error` module defines the loading and construction error taxonomy.
pub mod error;

/// The `loader` module turns token streams into populated boards.
pub mod loader;

/// The `ordering` module provides heuristics for the cell search order.
pub mod ordering;

/// The `reporter` module defines the event interface for search observers.
pub mod reporter;

/// The `solver` module contains the backtracking search engine.
pub mod solver;
