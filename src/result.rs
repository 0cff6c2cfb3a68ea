use puzzle_aids::cipher::grid::GridError;
use puzzle_aids::logic::parse::ParseError;
use puzzle_aids::logic::puzzle::PuzzleError;
use thiserror::Error;

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub(crate) enum AppError {
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
    #[error("The puzzle could not be read, more details: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid puzzle, more details: {0}")]
    Puzzle(#[from] PuzzleError),
    #[error("Invalid cipher grid, more details: {0}")]
    Grid(#[from] GridError),
    #[error("Failed to read allocator statistics: {0}")]
    Allocator(#[from] tikv_jemalloc_ctl::Error),
    #[error("The path {0} is neither a puzzle file nor a directory.")]
    InvalidPath(String),
    #[error("Unknown operator '{0}'.")]
    UnknownOperator(String),
    #[error("No question with a single solution in {0} attempt(s).")]
    GenerationFailed(usize),
    #[error("The {0} command takes no --range, --stats or --show-all before it.")]
    UnusedOptions(String),
    #[error("No command provided. Use --help for more information.")]
    MissingCommand,
}

impl AppError {
    pub(crate) fn invalid_path(path: impl std::fmt::Display) -> Self {
        Self::InvalidPath(format!("{path}"))
    }
}
