//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line backtracking solver for N x N Sudoku
//! puzzles, where N is any perfect square (4, 9, 16, 25, ...). It tracks
//! row, column and block constraints incrementally as bitmasks, so each
//! candidate test during the search is a constant-time mask lookup.
//!
//! ## Features
//!
//! -   **Multiple Input Forms**:
//!     -   Puzzle files (`.sudoku`)
//!     -   Puzzles provided as plain text on the command line
//!     -   Whole directories of puzzle files
//! -   **Configurable Search Order**: branch on cells in input order, by
//!     fewest remaining candidates, or at random (optionally seeded).
//! -   **Enumeration**: stop at the first solution (default), at a given
//!     count, or enumerate every solution with `--all`.
//! -   **Verification**: each reported solution is re-checked against the
//!     row/column/block uniqueness rules.
//! -   **Statistics**: parse time, solve time, recursion depth, candidate
//!     checks, call counts, and memory usage.
//! -   **Memory Management**: uses `tikv-jemallocator` for allocation and
//!     memory usage reporting.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: if provided without a subcommand, it's treated as a path to
//!     a puzzle file to solve.
//!
//! ### Subcommands
//!
//! 1.  **`solve`**: solve a puzzle file.
//!     ```sh
//!     sudoku-solver solve --path <puzzle_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: solve a puzzle given as plain text.
//!     ```sh
//!     sudoku-solver text --input "53--7----\n6--195---\n..." [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: solve every `.sudoku` file under a directory.
//!     ```sh
//!     sudoku-solver dir --path <directory> [OPTIONS]
//!     ```
//!
//! 4.  **`completions`**: generate shell completion scripts.
//!
//! ### Puzzle Format
//!
//! `#` starts a comment that runs to end of line. For grids of up to 9
//! symbols every character is a cell: `-` or `0` is an empty cell and the
//! digits `1..=9` are givens. Larger grids use whitespace-separated
//! tokens. Cells are read row by row.
//!
//! ## Example Invocations
//!
//! ```sh
//! # Solve a puzzle file, stopping at the first solution
//! sudoku-solver puzzle.sudoku
//!
//! # Enumerate every solution of an under-constrained grid
//! sudoku-solver solve --path open.sudoku --all
//!
//! # Solve a 16x16 puzzle branching on the most constrained cells
//! sudoku-solver solve --path big.sudoku --size 16 --ordering least-candidates
//!
//! # Solve a puzzle from text input
//! sudoku-solver text --input "12-4 -41- 2--1 41-3" --size 4
//! ```

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use sudoku_solver::sudoku::board::{Board, Solution};
use sudoku_solver::sudoku::loader::load_str;
use sudoku_solver::sudoku::ordering::{CellOrdering, InsertionOrder, LeastCandidates, RandomOrder};
use sudoku_solver::sudoku::reporter::Reporter;
use sudoku_solver::sudoku::solver::{
    DEFAULT_PROGRESS_INTERVAL, SearchStats, SearchSummary, Solver, SolverOptions, Termination,
};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A backtracking Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `text`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    Solve {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The puzzle as a string, cells in row-major order (e.g.
        /// "12-4 -41- 2--1 41-3" for a 4x4 grid).
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory containing puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(long, value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Selects the heuristic for the cell search order.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum OrderingChoice {
    /// Branch on cells in input (row-major) order.
    Insertion,
    /// Branch on the cells with the fewest legal symbols first.
    #[default]
    LeastCandidates,
    /// Branch on cells in a uniformly random order.
    Random,
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
struct CommonOptions {
    /// The grid size N (symbols per row); must be a perfect square.
    #[arg(short = 'n', long, default_value_t = 9)]
    size: usize,

    /// Enable debug output, providing more verbose logging during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of each found solution against the row, column
    /// and block uniqueness rules.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enumerate every solution instead of stopping at the first.
    #[arg(short, long, default_value_t = false)]
    all: bool,

    /// Stop after this many solutions. Overrides `--all`.
    #[arg(long)]
    max_solutions: Option<usize>,

    /// The heuristic deciding which cells the search branches on first.
    #[arg(short, long, value_enum, default_value_t = OrderingChoice::LeastCandidates)]
    ordering: OrderingChoice,

    /// Seed for the random ordering, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Recursive calls between progress reports; 0 disables them.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: u64,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            size: 9,
            debug: false,
            verify: true,
            stats: true,
            all: false,
            max_solutions: None,
            ordering: OrderingChoice::LeastCandidates,
            seed: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl CommonOptions {
    /// The solution cap implied by the flags: an explicit count wins,
    /// `--all` lifts the cap, and the default stops at the first.
    const fn solution_limit(&self) -> Option<usize> {
        match self.max_solutions {
            Some(limit) => Some(limit),
            None if self.all => None,
            None => Some(1),
        }
    }
}

/// Converts the ordering flags into the heuristic the solver branches with.
fn get_ordering(common: &CommonOptions) -> Box<dyn CellOrdering> {
    match common.ordering {
        OrderingChoice::Insertion => Box::new(InsertionOrder),
        OrderingChoice::LeastCandidates => Box::new(LeastCandidates),
        OrderingChoice::Random => match common.seed {
            Some(seed) => Box::new(RandomOrder::with_seed(seed)),
            None => Box::new(RandomOrder::default()),
        },
    }
}

/// Reporter that narrates the search on stdout: the parsed grid, periodic
/// progress lines on long searches, and each solution as it is found.
struct ConsoleReporter {
    debug: bool,
    solutions_seen: usize,
}

impl ConsoleReporter {
    const fn new(debug: bool) -> Self {
        Self {
            debug,
            solutions_seen: 0,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn on_parsed(&mut self, board: &Board) {
        println!("Parsed Sudoku:\n{board}");
    }

    fn on_progress(&mut self, stats: &SearchStats, board: &Board) {
        print!("{}", progress_report(stats, board));
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.solutions_seen += 1;
        println!("Solution {}:\n{solution}", self.solutions_seen);
    }

    fn on_done(&mut self, stats: &SearchStats) {
        if self.debug {
            println!("Done: {stats}");
        }
    }
}

/// Renders one progress tick: the counters followed by the partial board,
/// so long searches stay observable without waiting for completion.
fn progress_report(stats: &SearchStats, board: &Board) -> String {
    format!("Progress: {stats}\n{board}")
}

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            if let Err(e) = solve_path(&path, &cli.common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    let result = match cli.command {
        Some(Commands::Solve { path, common }) => solve_path(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, None, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            // Reached only when no subcommand and no global path were given.
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Solves a puzzle file.
///
/// # Errors
///
/// If the file doesn't exist, cannot be read, or fails to parse.
fn solve_path(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let input = std::fs::read_to_string(path)
        .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;

    solve_text(&input, Some(path), common)
}

/// Solves a directory of puzzle files.
///
/// Iterates over all `.sudoku` files under the directory, parses each one,
/// solves it, and reports the results. Other files are skipped.
///
/// # Errors
///
/// If any puzzle file cannot be read or parsed.
fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_path(&file_path, common)?;
    }

    Ok(())
}

/// Parses a puzzle from text, solves it, and reports results including
/// stats and verification.
///
/// # Errors
///
/// If the givens are inconsistent, the input is truncated, or the size has
/// no block structure.
fn solve_text(input: &str, label: Option<&PathBuf>, common: &CommonOptions) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let mut reporter = ConsoleReporter::new(common.debug);

    // Load failures surface once, through the command's error path.
    let time = std::time::Instant::now();
    let loaded =
        load_str(input, common.size).map_err(|e| format!("Error parsing puzzle: {e}"))?;
    let parse_time = time.elapsed();

    reporter.on_parsed(&loaded.board);

    if common.debug {
        println!("Size: {}", loaded.board.size());
        println!("Givens: {}", loaded.solved.len());
        println!("Blanks: {}", loaded.unsolved.len());
    }

    let options = SolverOptions {
        max_solutions: common.solution_limit(),
        progress_interval: common.progress_interval,
    };
    let mut solver = Solver::with_options(loaded, options);
    let mut ordering = get_ordering(common);

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let summary = solver.solve(ordering.as_mut(), &mut reporter);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solutions(&summary);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            solver.board().size(),
            solver.givens().len(),
            &summary,
            allocated_mib,
            resident_mib,
        );
    }

    Ok(())
}

/// Verifies every solution in `summary` against the uniqueness rules.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics. If no solution was found, it prints "NO SOLUTION".
fn verify_solutions(summary: &SearchSummary) {
    if summary.solutions.is_empty() {
        println!("NO SOLUTION");
    } else {
        let ok = summary.solutions.iter().all(Solution::verify);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    }
}

/// Helper function to print a single statistic line in a formatted table
/// row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
#[allow(clippy::cast_precision_loss)]
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the solver.
/// * `size` - The grid size N.
/// * `givens` - The number of cells given in the input.
/// * `summary` - The search outcome, counters included.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    size: usize,
    givens: usize,
    summary: &SearchSummary,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let s = &summary.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid size", format!("{size} x {size}"));
    stat_line("Givens", givens);
    stat_line("Blanks", size * size - givens);

    println!("========================[ Search Statistics ]========================");
    stat_line("Max depth", s.depth);
    stat_line_with_rate("Checks", s.checks, elapsed_secs);
    stat_line_with_rate("Calls", s.calls, elapsed_secs);
    stat_line("Solutions found", summary.solutions.len());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    match summary.termination {
        Termination::Cancelled => println!("\nCANCELLED"),
        _ if summary.solutions.is_empty() => println!("\nNO SOLUTION"),
        Termination::Complete if summary.solutions.len() > 1 => {
            println!("\nSOLVED ({} solutions)", summary.solutions.len());
        }
        _ => println!("\nSOLVED"),
    }
}
