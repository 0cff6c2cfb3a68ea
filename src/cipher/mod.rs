#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A workspace for solving substitution ciphers by hand.
//!
//! The ciphertext is typed into a 12x12 grid. A second grid of the same shape
//! shows each cell decrypted through the substitutions chosen so far, so typing a
//! plain letter over one cell updates every cell with the same cipher letter.

/// The two grids, their cursor and the key handling.
pub mod grid;
