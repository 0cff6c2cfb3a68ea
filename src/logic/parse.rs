#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A small text format for writing puzzles down.
//!
//! Each non-empty line that does not start with `#` is one question. A question is
//! five choices separated by `|`. A choice is an operator keyword followed by its
//! operands:
//!
//! ```text
//! # A says B is right, B says A is right, ...
//! is B | is A | false | not C | nor A D
//! true | none | and A - | xor B E | -
//! ```
//!
//! Keywords are `none` (or `-`), `true`, `false`, `is`, `not`, `and`, `or`, `xor`,
//! `nand` and `nor`. Operands are the letters `A` to `E`, or `-` for "not chosen
//! yet". Operands may be left out, in which case they are unset too.

use crate::logic::choice::Choice;
use crate::logic::operator::Operator;
use crate::logic::puzzle::{Puzzle, PuzzleError};
use crate::logic::solver::Choices;
use crate::logic::truth_table::AssignmentRange;
use crate::logic::variable::{NUM_VARIABLES, Variable};
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// File extension of puzzle files.
pub const PUZZLE_EXTENSION: &str = "puzzle";

/// Separator between the choices of a question.
pub const CHOICE_SEPARATOR: char = '|';

/// What went wrong on a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The keyword is not an operator.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// The operand is not one of `A`..`E` or `-`.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    /// More operands than the operator reads.
    #[error("'{operator}' takes {arity} operand(s), got {given}")]
    TooManyOperands {
        /// Operator keyword.
        operator: String,
        /// Operands the operator reads.
        arity: usize,
        /// Operands written.
        given: usize,
    },
    /// A question did not have exactly five choices.
    #[error("expected {n} choices, found {0}", n = NUM_VARIABLES)]
    WrongChoiceCount(usize),
    /// A choice between separators was empty.
    #[error("choice {0} is empty")]
    EmptyChoice(usize),
}

/// Errors raised while reading puzzles.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line could not be parsed.
    #[error("line {line}: {kind}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// The problem found.
        kind: ParseErrorKind,
    },
    /// The questions do not form a valid puzzle.
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    /// Reading the input failed.
    #[error("failed to read puzzle: {0}")]
    Io(#[from] io::Error),
}

/// Parses a single operand token.
fn parse_operand(token: &str) -> Result<Option<Variable>, ParseErrorKind> {
    if token == "-" {
        return Ok(None);
    }
    token
        .parse::<Variable>()
        .map(Some)
        .map_err(ParseErrorKind::UnknownVariable)
}

/// Parses one choice, e.g. `and A B` or `none`.
///
/// # Errors
///
/// If the keyword or an operand is unknown, or too many operands are given.
pub fn parse_choice(text: &str) -> Result<Choice, ParseErrorKind> {
    let mut tokens = text.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Err(ParseErrorKind::EmptyChoice(0));
    };
    let operands: Vec<&str> = tokens.collect();

    let operator = match keyword.to_ascii_lowercase().as_str() {
        "none" | "-" => None,
        _ => Some(
            keyword
                .parse::<Operator>()
                .map_err(ParseErrorKind::UnknownOperator)?,
        ),
    };

    let arity = Operator::arity_of(operator);
    if operands.len() > arity {
        return Err(ParseErrorKind::TooManyOperands {
            operator: keyword.to_string(),
            arity,
            given: operands.len(),
        });
    }

    let operand1 = operands.first().map(|t| parse_operand(t)).transpose()?.flatten();
    let operand2 = operands.get(1).map(|t| parse_operand(t)).transpose()?.flatten();

    Ok(Choice::new(operator, operand1, operand2))
}

/// Parses the five choices of one question line.
///
/// # Errors
///
/// If the line does not hold exactly five valid choices.
pub fn parse_choices(line: &str) -> Result<Choices, ParseErrorKind> {
    let parts = line.split(CHOICE_SEPARATOR).collect_vec();
    if parts.len() != NUM_VARIABLES {
        return Err(ParseErrorKind::WrongChoiceCount(parts.len()));
    }

    let mut choices = [Choice::EMPTY; NUM_VARIABLES];
    for (index, (slot, part)) in choices.iter_mut().zip(parts).enumerate() {
        *slot = parse_choice(part).map_err(|e| match e {
            ParseErrorKind::EmptyChoice(_) => ParseErrorKind::EmptyChoice(index),
            other => other,
        })?;
    }
    Ok(choices)
}

/// Parses every question from a reader, solving each over `range`.
///
/// # Errors
///
/// On I/O failure, malformed lines, or more questions than a puzzle holds.
pub fn parse_puzzle<R: BufRead>(reader: R, range: AssignmentRange) -> Result<Puzzle, ParseError> {
    let mut questions = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let choices = parse_choices(trimmed).map_err(|kind| ParseError::Line {
            line: number + 1,
            kind,
        })?;
        questions.push(choices);
    }

    Ok(Puzzle::from_choices(questions, range)?)
}

/// Parses puzzle text held in memory.
///
/// # Errors
///
/// See [`parse_puzzle`].
pub fn parse_puzzle_str(text: &str, range: AssignmentRange) -> Result<Puzzle, ParseError> {
    parse_puzzle(text.as_bytes(), range)
}

/// Opens and parses a puzzle file.
///
/// # Errors
///
/// If the file cannot be opened, or see [`parse_puzzle`].
pub fn parse_puzzle_file<P: AsRef<Path>>(
    path: P,
    range: AssignmentRange,
) -> Result<Puzzle, ParseError> {
    let file = File::open(path)?;
    parse_puzzle(BufReader::new(file), range)
}
