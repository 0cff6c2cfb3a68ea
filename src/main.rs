//! # puzzle-aids
//!
//! `puzzle-aids` solves self-referential five-choice logic questions and helps
//! with substitution ciphers laid out on a grid.
//!
//! In a logic question, choice `c` (one of `A`..`E`) claims something about the
//! correctness of the choices, e.g. "A and C are both correct". A truth
//! assignment solves the question when every claim evaluates to whether its own
//! choice is correct. With five choices there are at most 31 candidate
//! assignments, so the solver simply tries them all.
//!
//! ## Usage
//!
//! ```sh
//! puzzle-aids [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! -   `PATH`: a `.puzzle` file, or a directory searched for `.puzzle` files.
//!
//! ### Subcommands
//!
//! 1.  **`solve`**: `puzzle-aids solve --path <file> [OPTIONS]`
//! 2.  **`text`**: `puzzle-aids text --input "is B | is A | false | not C | nor A D"`
//! 3.  **`menu`**: `puzzle-aids menu [--operator and]`
//! 4.  **`generate`**: `puzzle-aids generate [--seed 7] [-n 3]`
//! 5.  **`cipher`**: `puzzle-aids cipher [--path grid.txt] [-m QE]... [--keys "enter t"]`
//! 6.  **`completions`**: `puzzle-aids completions bash`
//!
//! ### Options
//!
//! -   `-d, --debug`: log every candidate assignment and its verdict. Accepted
//!     anywhere on the command line.
//! -   `--range <full|legacy>`: enumerate codes `1..=31` (default) or `1..=26`.
//!     Solving commands and `generate`.
//! -   `-s, --stats`: print search statistics and memory usage. Solving commands.
//! -   `--show-all`: list solutions even when there are five or more. Solving
//!     commands.
//!
//! Solving options given before a subcommand apply to it; the subcommand's own
//! `--range` wins.

use crate::command_line::cli::{
    Cli, Commands, cipher, generate, print_menu, solve_file, solve_path, solve_text,
};
use crate::result::{AppError, AppResult};
use clap::{CommandFactory, Parser};
use log::{LevelFilter, error, info};
use std::io::Write;

mod command_line;
mod result;

/// Global allocator using `tikv-jemallocator`, which also provides the memory
/// statistics printed with `--stats`.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn configure_logging(debug: bool) {
    let level_filter = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    configure_logging(cli.debug);

    let command = cli
        .command
        .map(|command| command.with_outer_options(&cli.common))
        .transpose()?;

    match command {
        Some(Commands::Solve { file, common }) => solve_file(&file, &common).map(|_| ()),
        Some(Commands::Text { input, common }) => solve_text(&input, &common).map(|_| ()),
        Some(Commands::Menu { operator }) => print_menu(operator.as_deref()),
        Some(Commands::Generate {
            seed,
            count,
            max_attempts,
            range,
        }) => generate(seed, count, max_attempts, range.unwrap_or_default()),
        Some(Commands::Cipher { file, map, keys }) => {
            cipher(file.as_deref(), &map, keys.as_deref()).map(|_| ())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => Err(AppError::MissingCommand),
        },
    }
}
