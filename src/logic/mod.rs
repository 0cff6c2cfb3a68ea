#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Self-referential five-choice logic questions.
//!
//! Every question has five choices. Choice `c` makes a claim built from one
//! operator and up to two of the variables `A`..`E`, and variable `c` stands for
//! "choice `c` is correct". A truth assignment solves the question when every
//! choice's claim evaluates to that choice's own variable.

/// Operators, operands and the check of a single choice.
pub mod choice;
/// Random question generation.
pub mod generate;
/// Static selection menus.
pub mod menu;
/// The operator vocabulary.
pub mod operator;
/// The puzzle text format.
pub mod parse;
/// Puzzles and the edits applied to them.
pub mod puzzle;
/// Questions and their derived solutions.
pub mod question;
/// The brute-force solver.
pub mod solver;
/// Truth assignments and their enumeration.
pub mod truth_table;
/// The five named variables.
pub mod variable;
