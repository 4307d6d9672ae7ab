use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use sudoku_solver::sudoku::loader::{LoadedBoard, load_str};
use sudoku_solver::sudoku::ordering::{CellOrdering, InsertionOrder, LeastCandidates, RandomOrder};
use sudoku_solver::sudoku::reporter::NullReporter;
use sudoku_solver::sudoku::solver::{Solver, SolverOptions};

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

fn solve_first(loaded: &LoadedBoard, ordering: &mut dyn CellOrdering) {
    let options = SolverOptions {
        max_solutions: Some(1),
        progress_interval: 0,
    };
    let mut solver = Solver::with_options(loaded.clone(), options);
    black_box(solver.solve(ordering, &mut NullReporter));
}

fn bench_orderings(c: &mut Criterion) {
    let loaded = load_str(CLASSIC, 9).unwrap();

    let mut group = c.benchmark_group("classic 9x9 - ordering");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(20));

    group.bench_function("Insertion", |b| {
        b.iter(|| solve_first(&loaded, &mut InsertionOrder));
    });

    group.bench_function("Least candidates", |b| {
        b.iter(|| solve_first(&loaded, &mut LeastCandidates));
    });

    group.bench_function("Random", |b| {
        b.iter(|| solve_first(&loaded, &mut RandomOrder::with_seed(7)));
    });

    group.finish();
}

fn bench_enumeration(c: &mut Criterion) {
    let empty = "-".repeat(16);
    let loaded = load_str(&empty, 4).unwrap();

    c.bench_function("empty 4x4 - enumerate all 288", |b| {
        b.iter(|| {
            let mut solver = Solver::with_options(
                loaded.clone(),
                SolverOptions {
                    max_solutions: None,
                    progress_interval: 0,
                },
            );
            black_box(solver.solve(&mut LeastCandidates, &mut NullReporter));
        });
    });
}

fn bench_sixteen(c: &mut Criterion) {
    // A valid 16x16 grid with a band of cells removed.
    let size = 16;
    let value_at = |row: usize, col: usize| (row * 4 + row / 4 + col) % size + 1;
    let mut text = String::new();
    for row in 0..size {
        for col in 0..size {
            if row < 2 {
                text.push_str("- ");
            } else {
                text.push_str(&format!("{} ", value_at(row, col)));
            }
        }
        text.push('\n');
    }
    let loaded = load_str(&text, size).unwrap();

    c.bench_function("16x16 - first solution", |b| {
        b.iter(|| solve_first(&loaded, &mut LeastCandidates));
    });
}

criterion_group!(benches, bench_orderings, bench_enumeration, bench_sixteen);

criterion_main!(benches);
