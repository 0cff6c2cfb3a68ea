use criterion::{Criterion, criterion_group, criterion_main};
use fastrand::Rng;
use puzzle_aids::cipher::grid::{CipherGrid, Key};
use puzzle_aids::logic::choice::Choice;
use puzzle_aids::logic::generate::{DEFAULT_MAX_ATTEMPTS, generate_unique, random_choices};
use puzzle_aids::logic::operator::Operator;
use puzzle_aids::logic::puzzle::Puzzle;
use puzzle_aids::logic::solver::{Choices, solve};
use puzzle_aids::logic::truth_table::AssignmentRange;
use puzzle_aids::logic::variable::Variable::{A, B, C, D, E};
use std::hint::black_box;
use std::time::Duration;

const SAMPLE: Choices = [
    Choice::unary(Operator::Affirms, B),
    Choice::unary(Operator::Affirms, A),
    Choice::constant(false),
    Choice::unary(Operator::Negates, C),
    Choice::binary(Operator::Nor, A, D),
];

fn bench_truth_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("truth table");

    for range in [AssignmentRange::Full, AssignmentRange::Legacy] {
        group.bench_function(format!("{range:?}"), |b| {
            b.iter(|| {
                let count = black_box(range).table().filter(|a| a.value(E)).count();
                black_box(count);
            });
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    group.bench_function("sample question", |b| {
        b.iter(|| black_box(solve(black_box(&SAMPLE), AssignmentRange::Full)));
    });

    group.bench_function("empty question", |b| {
        b.iter(|| {
            black_box(solve(
                black_box(&[Choice::EMPTY; 5]),
                AssignmentRange::Full,
            ))
        });
    });

    let mut rng = Rng::with_seed(11);
    let questions = (0..12).map(|_| random_choices(&mut rng)).collect::<Vec<_>>();
    group.bench_function("twelve random questions", |b| {
        b.iter(|| {
            let puzzle = Puzzle::from_choices(questions.iter().copied(), AssignmentRange::Full);
            black_box(puzzle)
        });
    });

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("unique question", |b| {
        let mut rng = Rng::with_seed(5);
        b.iter(|| {
            black_box(generate_unique(
                &mut rng,
                AssignmentRange::Full,
                DEFAULT_MAX_ATTEMPTS,
            ))
        });
    });

    group.finish();
}

fn bench_cipher(c: &mut Criterion) {
    let rows = ["QEBNRFZHYOLT", "KCLUGRJMPLSB", "OQEBIXWVALD"];
    let grid = CipherGrid::from_rows(&rows).unwrap_or_default();
    let keys = std::iter::once(Key::Enter)
        .chain("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG".chars().map(Key::Letter))
        .collect::<Vec<_>>();

    c.bench_function("cipher - replay keys", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            grid.handle_keys(keys.iter().copied());
            black_box(grid.to_string())
        });
    });
}

criterion_group!(benches, bench_truth_table, bench_solve, bench_generate, bench_cipher);

criterion_main!(benches);
