#![allow(clippy::cast_precision_loss)]

use crate::result::{AppError, AppResult};
use clap::{Args, Parser, Subcommand};
use fastrand::Rng;
use itertools::Itertools;
use log::info;
use puzzle_aids::cipher::grid::{CipherGrid, Key};
use puzzle_aids::logic::choice::OperandSlot;
use puzzle_aids::logic::generate::{DEFAULT_MAX_ATTEMPTS, generate_unique};
use puzzle_aids::logic::menu::{operand_menu_options, operator_menu_options};
use puzzle_aids::logic::operator::Operator;
use puzzle_aids::logic::parse::{
    PUZZLE_EXTENSION, ParseError, parse_choices, parse_puzzle_file,
};
use puzzle_aids::logic::puzzle::Puzzle;
use puzzle_aids::logic::question::Question;
use puzzle_aids::logic::solver::{SolutionStats, Solutions};
use puzzle_aids::logic::truth_table::AssignmentRange;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface of the puzzle aids.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "puzzle-aids",
    version,
    about = "Solver for self-referential logic questions, plus a cipher grid"
)]
pub(crate) struct Cli {
    /// An optional path. Without a subcommand, a `.puzzle` file is solved, or
    /// every `.puzzle` file below a directory.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `text`, `generate`, `cipher`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output, logging every candidate assignment and its verdict.
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Solving options. Given before a subcommand they apply to it as well.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve every question of a puzzle file.
    Solve {
        /// Path to the `.puzzle` file.
        #[arg(long = "path", value_name = "FILE")]
        file: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a single question given inline.
    Text {
        /// Five choices separated by `|`, e.g. "is B | is A | false | not C | nor A D".
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Print the operator menu, or the operand menus for one operator.
    Menu {
        /// Operator keyword (`true`, `false`, `is`, `not`, `and`, `or`, `xor`,
        /// `nand`, `nor` or `none`).
        #[arg(short, long)]
        operator: Option<String>,
    },

    /// Generate random questions that have exactly one solution.
    Generate {
        /// Seed for reproducible output. A random seed is used when absent.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of questions to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Random questions drawn per generated question before giving up.
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,

        /// Which truth assignments are enumerated [default: full].
        #[arg(long, value_enum)]
        range: Option<AssignmentRange>,
    },

    /// Work on a substitution cipher laid out on a 12x12 grid.
    Cipher {
        /// Ciphertext file, one grid row per line. Starts empty when absent.
        #[arg(long = "path", value_name = "FILE")]
        file: Option<PathBuf>,

        /// Substitution as two letters, cipher then plain (e.g. `QE`). Repeatable.
        #[arg(short, long)]
        map: Vec<String>,

        /// Key presses to replay, separated by spaces (e.g. "enter t h e").
        #[arg(short, long)]
        keys: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Solve { .. } => "solve",
            Self::Text { .. } => "text",
            Self::Menu { .. } => "menu",
            Self::Generate { .. } => "generate",
            Self::Cipher { .. } => "cipher",
            Self::Completions { .. } => "completions",
        }
    }

    /// Folds the solving options given before the subcommand into it.
    ///
    /// # Errors
    ///
    /// If options were given that the subcommand has no use for.
    pub(crate) fn with_outer_options(self, outer: &CommonOptions) -> AppResult<Self> {
        match self {
            Self::Solve { file, common } => Ok(Self::Solve {
                file,
                common: common.merged(outer),
            }),
            Self::Text { input, common } => Ok(Self::Text {
                input,
                common: common.merged(outer),
            }),
            Self::Generate {
                seed,
                count,
                max_attempts,
                range,
            } if !outer.stats && !outer.show_all => Ok(Self::Generate {
                seed,
                count,
                max_attempts,
                range: range.or(outer.range),
            }),
            command if outer.is_empty() => Ok(command),
            command => Err(AppError::UnusedOptions(command.name().to_string())),
        }
    }
}

/// Defines the solving options shared by the top level, `solve` and `text`.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CommonOptions {
    /// Which truth assignments are enumerated [default: full].
    #[arg(long, value_enum)]
    pub(crate) range: Option<AssignmentRange>,

    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print every solution, even when there are too many to be useful.
    #[arg(long, default_value_t = false)]
    pub(crate) show_all: bool,
}

impl CommonOptions {
    /// The assignment range to solve over.
    pub(crate) fn range(&self) -> AssignmentRange {
        self.range.unwrap_or_default()
    }

    /// Whether no option was given.
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// These options with the outer ones filled in; options given here win.
    pub(crate) fn merged(self, outer: &Self) -> Self {
        Self {
            range: self.range.or(outer.range),
            stats: self.stats || outer.stats,
            show_all: self.show_all || outer.show_all,
        }
    }
}

/// Solves every `.puzzle` file below a directory, returning how many were solved.
///
/// # Errors
///
/// If the path is not a directory, or any puzzle file cannot be read or parsed.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> AppResult<usize> {
    if !path.is_dir() {
        return Err(AppError::invalid_path(path.display()));
    }

    let mut solved = 0;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path
            .extension()
            .is_none_or(|ext| ext != PUZZLE_EXTENSION)
        {
            info!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
        solved += 1;
    }

    Ok(solved)
}

/// Solves a file, or every puzzle below a directory.
///
/// # Errors
///
/// See [`solve_file`] and [`solve_dir`].
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> AppResult<()> {
    if path.is_dir() {
        solve_dir(path, common).map(|_| ())
    } else if path.is_file() {
        solve_file(path, common).map(|_| ())
    } else {
        Err(AppError::invalid_path(path.display()))
    }
}

/// Parses and solves a puzzle file, then reports the results.
///
/// # Errors
///
/// If the file cannot be read or parsed, or memory statistics are unavailable.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> AppResult<Puzzle> {
    info!("Solving: {}", path.display());
    let time = Instant::now();
    let puzzle = parse_puzzle_file(path, common.range())?;
    let parse_time = time.elapsed();

    println!("{}", path.display());
    solve_and_report(&puzzle, common, parse_time)
}

/// Parses and solves a single question given as text.
///
/// # Errors
///
/// If the text is not a valid question line.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> AppResult<Puzzle> {
    let time = Instant::now();
    let choices =
        parse_choices(input.trim()).map_err(|kind| ParseError::Line { line: 1, kind })?;
    let puzzle = Puzzle::from_choices([choices], common.range())?;
    let parse_time = time.elapsed();

    solve_and_report(&puzzle, common, parse_time)
}

/// Re-solves every question with statistics, prints the results and returns the
/// solved puzzle.
///
/// # Errors
///
/// If memory statistics are requested but unavailable.
pub(crate) fn solve_and_report(
    puzzle: &Puzzle,
    common: &CommonOptions,
    parse_time: Duration,
) -> AppResult<Puzzle> {
    let time = Instant::now();
    let (puzzle, solution_stats) = puzzle.resolve_all();
    let elapsed = time.elapsed();

    for (index, question) in puzzle.questions().iter().enumerate() {
        print_question(index, question, common.show_all);
    }

    if common.stats {
        let (allocated, resident) = memory_usage()?;
        print_stats(
            parse_time,
            elapsed,
            &puzzle,
            &solution_stats,
            allocated,
            resident,
        );
    }
    Ok(puzzle)
}

/// Prints one question and its solutions, subject to the display cutoff.
pub(crate) fn print_question(index: usize, question: &Question, show_all: bool) {
    println!("Question {}: {question}", index + 1);

    let solutions = question.solutions();
    let shown = if show_all {
        Some(solutions)
    } else {
        question.displayed_solutions()
    };

    match shown {
        Some(s) if s.is_empty() => println!("  no solution"),
        Some(s) => println!("  {} solution(s): {}", s.len(), format_solutions(s)),
        None => println!("  {} solutions (too many to list)", solutions.len()),
    }
}

/// Each solution as its `TFTFF` code followed by the choices it makes correct,
/// e.g. `TFTFF (A C)`.
pub(crate) fn format_solutions(solutions: &Solutions) -> String {
    solutions
        .iter()
        .map(|a| format!("{a} ({})", a.true_variables().join(" ")))
        .join(", ")
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
///
/// # Errors
///
/// If the allocator statistics cannot be read.
pub(crate) fn memory_usage() -> AppResult<(f64, f64)> {
    epoch::advance()?;

    let allocated_bytes = stats::allocated::mib()?.read()?;
    let resident_bytes = stats::resident::mib()?.read()?;

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);
    Ok((allocated_mib, resident_mib))
}

/// Prints the operator menu, or the two operand menus of one operator.
///
/// # Errors
///
/// If the keyword is not an operator.
pub(crate) fn print_menu(operator: Option<&str>) -> AppResult<()> {
    let Some(keyword) = operator else {
        println!("Operators:");
        for (index, option) in operator_menu_options().iter().enumerate() {
            let keyword = option.value.map_or("none", Operator::keyword);
            println!("  {index:>2}  {:<6} {}", keyword, option.label);
        }
        return Ok(());
    };

    let operator = match keyword.to_ascii_lowercase().as_str() {
        "none" | "-" => None,
        _ => Some(
            keyword
                .parse::<Operator>()
                .map_err(AppError::UnknownOperator)?,
        ),
    };

    for (name, slot) in [("First", OperandSlot::First), ("Second", OperandSlot::Second)] {
        let labels = operand_menu_options(operator, slot)
            .iter()
            .map(|option| option.label)
            .join(" ");
        println!("{name} operand: {labels}");
    }
    Ok(())
}

/// Prints `count` generated questions in the puzzle text format, each followed
/// by a comment naming its solution.
///
/// # Errors
///
/// If a question with a single solution is not found within `max_attempts`.
pub(crate) fn generate(
    seed: Option<u64>,
    count: usize,
    max_attempts: usize,
    range: AssignmentRange,
) -> AppResult<()> {
    let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);

    for _ in 0..count {
        let question = generate_unique(&mut rng, range, max_attempts)
            .ok_or(AppError::GenerationFailed(max_attempts))?;
        println!("{question}");
        println!("# solution: {}", question.solutions());
    }
    Ok(())
}

/// Loads a cipher grid, applies substitutions and key presses, and prints it.
///
/// # Errors
///
/// If the file cannot be read, or the grid, a substitution or a key is invalid.
pub(crate) fn cipher(
    file: Option<&Path>,
    map: &[String],
    keys: Option<&str>,
) -> AppResult<CipherGrid> {
    let mut grid = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            CipherGrid::from_rows(&text.lines().collect_vec())?
        }
        None => CipherGrid::new(),
    };

    for pair in map {
        grid.substitute_pair(pair)?;
    }

    if let Some(keys) = keys {
        let keys = keys
            .split_whitespace()
            .map(str::parse::<Key>)
            .collect::<Result<Vec<_>, _>>()?;
        grid.handle_keys(keys);
    }

    print!("{grid}");
    let substitutions = grid
        .substitutions()
        .iter()
        .map(|(cipher, plain)| format!("{cipher}->{plain}"))
        .join(" ");
    println!("Substitutions: {substitutions}");
    Ok(grid)
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
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
/// * `puzzle` - The solved puzzle.
/// * `s` - `SolutionStats` summed over every question.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    puzzle: &Puzzle,
    s: &SolutionStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let complete = puzzle.questions().iter().filter(|q| q.is_complete()).count();
    let unique = puzzle
        .questions()
        .iter()
        .filter(|q| q.solutions().len() == 1)
        .count();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Questions", puzzle.len());
    stat_line("Complete questions", complete);
    stat_line("Assignments", puzzle.range());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Candidates", s.candidates, elapsed_secs);
    stat_line_with_rate("Evaluations", s.evaluations, elapsed_secs);
    stat_line("Solutions", s.solutions);
    stat_line("Uniquely solved questions", unique);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
