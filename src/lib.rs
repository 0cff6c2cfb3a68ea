#![warn(missing_docs)]
//! Aids for two kinds of pencil puzzles: self-referential five-choice logic
//! questions, solved by brute force over truth assignments, and hand-solved
//! substitution ciphers laid out on a grid.

/// The `cipher` module holds the two-grid substitution cipher workspace.
pub mod cipher;

/// The `logic` module implements the choice evaluator, the question solver and
/// everything needed to edit, read and generate puzzles.
pub mod logic;
