#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Truth assignments over the five variables and the table that enumerates them.
//!
//! An assignment is stored as a 5-bit code whose most significant bit is variable
//! `A` and whose least significant bit is variable `E`. The table walks the codes
//! in ascending order and never yields the all-false code 0.
//!
//! How far the table walks is an `AssignmentRange`. `Full` covers every non-zero
//! code `1..=31`. `Legacy` stops at 26, so codes `27..=31` (`11011` to `11111`)
//! are never considered. Some published puzzles were checked that way.

use crate::logic::variable::{NUM_VARIABLES, Variable};
use clap::ValueEnum;
use core::ops::{Index, Range};
use std::fmt::Display;
use std::iter::FusedIterator;

/// Largest code a five-variable assignment can have.
pub const MAX_CODE: u8 = (1 << NUM_VARIABLES) - 1;

/// Last code visited by `AssignmentRange::Legacy`.
pub const LEGACY_MAX_CODE: u8 = 26;

/// One boolean per variable, indexed by variable ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TruthAssignment(u8);

impl TruthAssignment {
    /// Builds an assignment from a 5-bit code. Bits above the fifth are dropped.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self(code & MAX_CODE)
    }

    /// Builds an assignment from values listed in variable order `A..=E`.
    #[must_use]
    pub fn from_values(values: [bool; NUM_VARIABLES]) -> Self {
        let code = values
            .iter()
            .fold(0u8, |acc, &value| (acc << 1) | u8::from(value));
        Self(code)
    }

    /// The 5-bit code of the assignment.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Value at a variable ordinal, `None` when the ordinal is out of range.
    #[must_use]
    pub const fn get(self, index: usize) -> Option<bool> {
        if index < NUM_VARIABLES {
            Some((self.0 >> (NUM_VARIABLES - 1 - index)) & 1 == 1)
        } else {
            None
        }
    }

    /// Value of a variable.
    #[must_use]
    pub const fn value(self, variable: Variable) -> bool {
        (self.0 >> (NUM_VARIABLES - 1 - variable.index())) & 1 == 1
    }

    /// Value of a possibly unset operand.
    #[must_use]
    pub fn operand(self, variable: Option<Variable>) -> Option<bool> {
        variable.map(|v| self.value(v))
    }

    /// All values in variable order.
    #[must_use]
    pub fn values(self) -> [bool; NUM_VARIABLES] {
        Variable::ALL.map(|v| self.value(v))
    }

    /// The variables that are true, in order.
    pub fn true_variables(self) -> impl Iterator<Item = Variable> {
        Variable::ALL.into_iter().filter(move |&v| self.value(v))
    }
}

impl Index<Variable> for TruthAssignment {
    type Output = bool;

    fn index(&self, index: Variable) -> &Self::Output {
        if self.value(index) { &true } else { &false }
    }
}

impl Display for TruthAssignment {
    /// `TFTFF` style, one letter per variable.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in self.values() {
            write!(f, "{}", if value { 'T' } else { 'F' })?;
        }
        Ok(())
    }
}

/// Which codes the truth table enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum AssignmentRange {
    /// Every non-zero assignment, codes `1..=31`.
    #[default]
    Full,
    /// Codes `1..=26`, leaving out the five assignments from `11011` upward.
    Legacy,
}

impl AssignmentRange {
    /// The last code visited.
    #[must_use]
    pub const fn max_code(self) -> u8 {
        match self {
            Self::Full => MAX_CODE,
            Self::Legacy => LEGACY_MAX_CODE,
        }
    }

    /// Number of assignments enumerated.
    #[must_use]
    pub const fn len(self) -> usize {
        self.max_code() as usize
    }

    /// Always `false`; every range contains at least one assignment.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// A fresh table over this range.
    #[must_use]
    pub const fn table(self) -> TruthTable {
        TruthTable::new(self)
    }
}

impl Display for AssignmentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full (1..=31)"),
            Self::Legacy => write!(f, "legacy (1..=26)"),
        }
    }
}

/// Lazy, restartable enumeration of truth assignments in ascending code order.
///
/// Cloning the table restarts nothing; it copies the current position. Use
/// `AssignmentRange::table` for a fresh pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    codes: Range<u8>,
}

impl TruthTable {
    /// Table over the given range, positioned before the first assignment.
    #[must_use]
    pub const fn new(range: AssignmentRange) -> Self {
        Self {
            codes: 1..range.max_code() + 1,
        }
    }
}

impl Default for TruthTable {
    fn default() -> Self {
        Self::new(AssignmentRange::default())
    }
}

impl Iterator for TruthTable {
    type Item = TruthAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        self.codes.next().map(TruthAssignment::from_code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.codes.size_hint()
    }
}

impl DoubleEndedIterator for TruthTable {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.codes.next_back().map(TruthAssignment::from_code)
    }
}

impl ExactSizeIterator for TruthTable {}

impl FusedIterator for TruthTable {}
