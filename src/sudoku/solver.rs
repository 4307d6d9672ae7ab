#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! The solver owns one mutable [`Board`] shared by every recursion frame.
//! Each frame applies exactly one placement and undoes it on the way back
//! out, so the per-branch cost is O(1) instead of an O(N^2) board copy.
//! The unsolved cells live in an explicit deque acting as a stack: the
//! front cell is popped when a frame starts branching and pushed back when
//! the frame finishes, which restores the caller's view of the list.
//!
//! Termination is structural: every recursive call either shrinks the
//! unsolved list by one or exhausts the finite symbol range without
//! recursing.
//!
//! Solutions are emitted as independent snapshots the moment the list
//! empties, so the backtracking that follows cannot corrupt them. By
//! default the search enumerates every solution;
//! [`SolverOptions::max_solutions`] stops it early, and a [`CancelToken`]
//! aborts an unbounded search from outside. The solver itself raises no
//! errors: an unsatisfiable puzzle is a normal outcome, visible as a
//! [`Termination::Complete`] summary with no solutions.

use crate::sudoku::board::{Board, Solution};
use crate::sudoku::cell::CellRef;
use crate::sudoku::loader::LoadedBoard;
use crate::sudoku::ordering::CellOrdering;
use crate::sudoku::reporter::Reporter;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How many recursive calls pass between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000_000;

/// Counters for one search invocation. Reset when the search starts;
/// monotonically non-decreasing until it halts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Deepest recursion level reached.
    pub depth: usize,
    /// Candidate-symbol checks performed.
    pub checks: u64,
    /// Total recursive calls.
    pub calls: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth: {} checks: {} calls: {}",
            self.depth, self.checks, self.calls
        )
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every branch was explored. The puzzle is unsatisfiable exactly
    /// when this coincides with zero solutions.
    Complete,
    /// The configured solution limit was reached.
    SolutionLimit,
    /// The cancel token was triggered.
    Cancelled,
}

/// The outcome of one search invocation.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    /// Every solution found, in discovery order.
    pub solutions: Vec<Solution>,
    /// Final counters.
    pub stats: SearchStats,
    /// Why the search stopped.
    pub termination: Termination,
}

impl SearchSummary {
    /// `true` when the whole tree was explored and no assignment exists.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        self.termination == Termination::Complete && self.solutions.is_empty()
    }
}

/// Externally triggered abort flag, polled at each recursive entry.
///
/// Cloning shares the flag, so a caller can keep one half and hand the
/// other to whatever owns the solver. On abort the board is left at some
/// consistent partial assignment; no stronger guarantee is made.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, untriggered token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the search stop at the next recursive entry.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for one search invocation.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// Stop after this many solutions; `None` enumerates all of them.
    pub max_solutions: Option<usize>,
    /// Calls between progress notifications; 0 disables them.
    pub progress_interval: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_solutions: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Depth-first backtracking searcher over a loaded board.
///
/// A solver exclusively owns its board for the duration of a
/// [`Self::solve`] call; it is single-threaded and never suspends
/// mid-search.
#[derive(Debug)]
pub struct Solver {
    board: Board,
    givens: Vec<CellRef>,
    initial_unsolved: Vec<CellRef>,
    unsolved: VecDeque<CellRef>,
    solutions: Vec<Solution>,
    stats: SearchStats,
    options: SolverOptions,
    cancel: CancelToken,
}

/// Signal bubbled up through the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

impl Solver {
    /// Wraps a loaded board with default options.
    #[must_use]
    pub fn new(loaded: LoadedBoard) -> Self {
        Self::with_options(loaded, SolverOptions::default())
    }

    /// Wraps a loaded board with explicit options.
    #[must_use]
    pub fn with_options(loaded: LoadedBoard, options: SolverOptions) -> Self {
        Self {
            board: loaded.board,
            givens: loaded.solved,
            initial_unsolved: loaded.unsolved,
            unsolved: VecDeque::new(),
            solutions: Vec::new(),
            stats: SearchStats::default(),
            options,
            cancel: CancelToken::new(),
        }
    }

    /// The board in its current state: givens only before a search, and
    /// again after a completed one; some consistent partial assignment
    /// after a cancelled one.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The given cells, in row-major order.
    #[must_use]
    pub fn givens(&self) -> &[CellRef] {
        &self.givens
    }

    /// Counters of the current (or most recent) search.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// A handle that aborts this solver's search from outside.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs the search to completion, limit, or cancellation.
    ///
    /// `ordering` fixes the branching priority once, up front; `reporter`
    /// receives progress ticks, each solution, and the final statistics.
    /// Counters reset at entry, so each invocation's statistics stand
    /// alone, and repeated invocations re-explore the same tree.
    pub fn solve(
        &mut self,
        ordering: &mut dyn CellOrdering,
        reporter: &mut dyn Reporter,
    ) -> SearchSummary {
        self.stats = SearchStats::default();
        self.solutions.clear();

        // A zero limit means no search at all, not "emit one then stop".
        if self.options.max_solutions == Some(0) {
            reporter.on_done(&self.stats);
            return SearchSummary {
                solutions: Vec::new(),
                stats: self.stats,
                termination: Termination::SolutionLimit,
            };
        }

        let mut cells = self.initial_unsolved.clone();
        ordering.order(&self.board, &mut cells);
        self.unsolved = cells.into();

        let flow = self.search(0, reporter);
        reporter.on_done(&self.stats);

        let termination = if self.cancel.is_cancelled() {
            Termination::Cancelled
        } else if flow == Flow::Stop {
            Termination::SolutionLimit
        } else {
            Termination::Complete
        };

        SearchSummary {
            solutions: std::mem::take(&mut self.solutions),
            stats: self.stats,
            termination,
        }
    }

    fn search(&mut self, depth: usize, reporter: &mut dyn Reporter) -> Flow {
        if self.cancel.is_cancelled() {
            return Flow::Stop;
        }

        let depth = depth + 1;
        self.stats.depth = self.stats.depth.max(depth);
        self.stats.calls += 1;
        if self.options.progress_interval > 0
            && self.stats.calls % self.options.progress_interval == 0
        {
            reporter.on_progress(&self.stats, &self.board);
        }

        let Some(cell) = self.unsolved.pop_front() else {
            let solution = self.board.snapshot();
            reporter.on_solution(&solution);
            self.solutions.push(solution);
            return if self
                .options
                .max_solutions
                .is_some_and(|max| self.solutions.len() >= max)
            {
                Flow::Stop
            } else {
                Flow::Continue
            };
        };

        let mut flow = Flow::Continue;
        for symbol in 1..=self.board.size() {
            self.stats.checks += 1;
            if self.board.check(cell, symbol) {
                self.board.place(cell, symbol);
                flow = self.search(depth, reporter);
                self.board.unplace(cell);
                if flow == Flow::Stop {
                    break;
                }
            }
        }

        // Restore the caller's view of the list whichever way we exit.
        self.unsolved.push_front(cell);
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::error::SudokuError;
    use crate::sudoku::loader::load_str;
    use crate::sudoku::ordering::{InsertionOrder, LeastCandidates, RandomOrder};
    use crate::sudoku::reporter::NullReporter;

    /// 30 givens, 51 blanks, exactly one solution.
    const CLASSIC: &str = "\
        530070000\
        600195000\
        098000060\
        800060003\
        400803001\
        700020006\
        060000280\
        000419005\
        000080079";

    /// The known completion of `CLASSIC`.
    const CLASSIC_SOLVED: &str = "\
        534678912\
        672195348\
        198342567\
        859761423\
        426853791\
        713924856\
        961537284\
        287419635\
        345286179";

    /// Loads fine (no duplicated given) but admits no completion.
    const UNSATISFIABLE: &str = "\
        1----6---\
        -59-----8\
        2----8---\
        -45---3--\
        --3---7--\
        --6--3-54\
        ---325--6\
        --------1\
        7389-----";

    fn summary_of(input: &str, size: usize, options: SolverOptions) -> SearchSummary {
        let loaded = load_str(input, size).unwrap();
        let mut solver = Solver::with_options(loaded, options);
        solver.solve(&mut LeastCandidates, &mut NullReporter)
    }

    fn first_solution(input: &str, size: usize) -> Solution {
        let mut summary = summary_of(
            input,
            size,
            SolverOptions {
                max_solutions: Some(1),
                ..SolverOptions::default()
            },
        );
        assert_eq!(summary.solutions.len(), 1);
        summary.solutions.pop().unwrap()
    }

    #[test]
    fn test_classic_puzzle_has_the_known_solution() {
        let solution = first_solution(CLASSIC, 9);
        assert!(solution.verify());
        let expected: Vec<usize> = CLASSIC_SOLVED
            .chars()
            .map(|ch| ch as usize - '0' as usize)
            .collect();
        assert_eq!(solution.values(), expected.as_slice());
    }

    #[test]
    fn test_classic_puzzle_solution_is_unique_under_enumeration() {
        let summary = summary_of(CLASSIC, 9, SolverOptions::default());
        assert_eq!(summary.termination, Termination::Complete);
        assert_eq!(summary.solutions.len(), 1);
        assert!(summary.solutions[0].verify());
    }

    #[test]
    fn test_empty_nine_board_solves_to_a_valid_grid() {
        let empty = "-".repeat(81);
        let solution = first_solution(&empty, 9);
        assert!(solution.values().iter().all(|&value| value != 0));
        assert!(solution.verify());
    }

    #[test]
    fn test_empty_four_board_has_exactly_288_grids() {
        let empty = "-".repeat(16);
        let summary = summary_of(&empty, 4, SolverOptions::default());
        assert_eq!(summary.termination, Termination::Complete);
        assert_eq!(summary.solutions.len(), 288);
        assert!(summary.solutions.iter().all(Solution::verify));
    }

    #[test]
    fn test_unsatisfiable_puzzle_exhausts_without_error() {
        let summary = summary_of(UNSATISFIABLE, 9, SolverOptions::default());
        assert!(summary.is_unsatisfiable());
        assert_eq!(summary.termination, Termination::Complete);
        assert!(summary.solutions.is_empty());
    }

    #[test]
    fn test_conflicting_given_fails_at_load_not_search() {
        // Two 5s in the top row.
        let mut grid = CLASSIC.to_string();
        grid.replace_range(1..2, "5");
        assert!(matches!(
            load_str(&grid, 9),
            Err(SudokuError::BoardInconsistent { symbol: 5, .. })
        ));
    }

    #[test]
    fn test_emitted_solutions_survive_backtracking() {
        // Every emitted snapshot must stay valid (and distinct) after the
        // search has moved on past it.
        let empty = "-".repeat(16);
        let summary = summary_of(&empty, 4, SolverOptions::default());
        let mut seen = summary.solutions.clone();
        seen.dedup();
        assert_eq!(seen.len(), summary.solutions.len());
        assert!(seen.iter().all(Solution::verify));
    }

    #[test]
    fn test_stats_track_calls_and_depth() {
        let summary = summary_of(CLASSIC, 9, SolverOptions::default());
        // 51 blanks plus the frame that records the solution.
        assert_eq!(summary.stats.depth, 52);
        assert!(summary.stats.calls >= 52);
        assert!(summary.stats.checks >= summary.stats.calls - 1);
    }

    #[test]
    fn test_board_is_restored_after_a_full_enumeration() {
        let loaded = load_str(CLASSIC, 9).unwrap();
        let before = loaded.board.clone();
        let mut solver = Solver::new(loaded);
        solver.solve(&mut InsertionOrder, &mut NullReporter);
        assert_eq!(*solver.board(), before);
    }

    #[test]
    fn test_orderings_agree_on_the_solution_set() {
        let solve_with = |ordering: &mut dyn CellOrdering| {
            let loaded = load_str(CLASSIC, 9).unwrap();
            let mut solver = Solver::new(loaded);
            solver.solve(ordering, &mut NullReporter).solutions
        };
        let a = solve_with(&mut InsertionOrder);
        let b = solve_with(&mut LeastCandidates);
        let c = solve_with(&mut RandomOrder::with_seed(42));
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_pre_cancelled_search_stops_immediately() {
        let loaded = load_str(&"-".repeat(81), 9).unwrap();
        let mut solver = Solver::new(loaded);
        solver.cancel_token().cancel();
        let summary = solver.solve(&mut LeastCandidates, &mut NullReporter);
        assert_eq!(summary.termination, Termination::Cancelled);
        assert!(summary.solutions.is_empty());
        assert_eq!(summary.stats.calls, 0);
    }

    #[test]
    fn test_progress_reporter_ticks_at_the_interval() {
        #[derive(Default)]
        struct Ticks {
            progress: Vec<SearchStats>,
            solutions: usize,
            done: Option<SearchStats>,
        }
        impl Reporter for Ticks {
            fn on_progress(&mut self, stats: &SearchStats, _board: &Board) {
                self.progress.push(*stats);
            }
            fn on_solution(&mut self, _solution: &Solution) {
                self.solutions += 1;
            }
            fn on_done(&mut self, stats: &SearchStats) {
                self.done = Some(*stats);
            }
        }

        let loaded = load_str(CLASSIC, 9).unwrap();
        let mut solver = Solver::with_options(
            loaded,
            SolverOptions {
                max_solutions: None,
                progress_interval: 1000,
            },
        );
        let mut reporter = Ticks::default();
        let summary = solver.solve(&mut InsertionOrder, &mut reporter);

        assert_eq!(reporter.solutions, 1);
        assert_eq!(reporter.done, Some(summary.stats));
        assert!(!reporter.progress.is_empty());
        // Ticks land on multiples of the interval and the counters never
        // move backwards.
        assert!(
            reporter
                .progress
                .iter()
                .all(|stats| stats.calls % 1000 == 0)
        );
        assert!(
            reporter
                .progress
                .windows(2)
                .all(|pair| pair[0].calls < pair[1].calls && pair[0].checks <= pair[1].checks)
        );
    }

    #[test]
    fn test_zero_solution_limit_runs_no_search() {
        let summary = summary_of(
            CLASSIC,
            9,
            SolverOptions {
                max_solutions: Some(0),
                ..SolverOptions::default()
            },
        );
        assert_eq!(summary.termination, Termination::SolutionLimit);
        assert!(summary.solutions.is_empty());
        assert_eq!(summary.stats.calls, 0);
    }

    #[test]
    fn test_mid_search_cancel_leaves_a_consistent_board() {
        struct CancelOnFirstTick {
            token: CancelToken,
        }
        impl Reporter for CancelOnFirstTick {
            fn on_progress(&mut self, _stats: &SearchStats, _board: &Board) {
                self.token.cancel();
            }
        }

        let loaded = load_str(&"-".repeat(81), 9).unwrap();
        let mut solver = Solver::with_options(
            loaded,
            SolverOptions {
                max_solutions: None,
                progress_interval: 100,
            },
        );
        let mut reporter = CancelOnFirstTick {
            token: solver.cancel_token(),
        };
        let summary = solver.solve(&mut LeastCandidates, &mut reporter);
        assert_eq!(summary.termination, Termination::Cancelled);
        assert!(summary.stats.calls >= 100);

        // The abandoned partial assignment must replay onto a fresh board
        // without a conflict, landing on identical values and masks.
        let after = solver.board();
        let mut replay = Board::new(9).unwrap();
        for index in 0..after.cell_count() {
            let cell = after.cell(index);
            let value = after.value(cell);
            if value != 0 {
                assert!(replay.check(cell, value));
                replay.place(cell, value);
            }
        }
        assert_eq!(replay, *after);
    }

    #[test]
    fn test_solution_limit_reports_limit_termination() {
        let empty = "-".repeat(16);
        let summary = summary_of(
            &empty,
            4,
            SolverOptions {
                max_solutions: Some(5),
                ..SolverOptions::default()
            },
        );
        assert_eq!(summary.termination, Termination::SolutionLimit);
        assert_eq!(summary.solutions.len(), 5);
    }

    #[test]
    fn test_sixteen_board_with_holes_restores_the_original() {
        // Build a valid 16x16 grid, punch out a handful of cells, and
        // check the search puts the same values back.
        let size = 16;
        let value_at = |row: usize, col: usize| (row * 4 + row / 4 + col) % size + 1;
        let holes = [0_usize, 17, 35, 100, 255];
        let mut text = String::new();
        for row in 0..size {
            for col in 0..size {
                if holes.contains(&(row * size + col)) {
                    text.push_str("- ");
                } else {
                    text.push_str(&format!("{} ", value_at(row, col)));
                }
            }
            text.push('\n');
        }

        let solution = first_solution(&text, size);
        assert!(solution.verify());
        for &hole in &holes {
            assert_eq!(solution.values()[hole], value_at(hole / size, hole % size));
        }
    }

    #[test]
    fn test_stats_display_names_each_counter() {
        let stats = SearchStats {
            depth: 3,
            checks: 40,
            calls: 7,
        };
        assert_eq!(stats.to_string(), "depth: 3 checks: 40 calls: 7");
    }
}
