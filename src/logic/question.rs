#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A question: five choices plus the solutions derived from them.

use crate::logic::choice::{Choice, OperandSlot};
use crate::logic::operator::Operator;
use crate::logic::solver::{Choices, SolutionStats, Solutions, solve_with_stats};
use crate::logic::truth_table::AssignmentRange;
use crate::logic::variable::{NUM_VARIABLES, Variable};
use itertools::Itertools;
use std::fmt::Display;

/// Solutions are only worth showing when there are fewer than this many.
pub const MAX_DISPLAYED_SOLUTIONS: usize = 5;

/// Five choices and the assignments that satisfy all of them.
///
/// Every edit returns a new question whose solutions have been recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Question {
    choices: Choices,
    solutions: Solutions,
}

impl Question {
    /// An empty question. Nothing has been solved yet, so it has no solutions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A question built from the given choices and solved over `range`.
    #[must_use]
    pub fn from_choices(choices: Choices, range: AssignmentRange) -> Self {
        Self {
            choices,
            solutions: Solutions::default(),
        }
        .solved(range)
        .0
    }

    /// The five choices.
    #[must_use]
    pub const fn choices(&self) -> &Choices {
        &self.choices
    }

    /// Choice at `index`, if in range.
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// The solutions found by the last recomputation.
    #[must_use]
    pub const fn solutions(&self) -> &Solutions {
        &self.solutions
    }

    /// The solutions, when there are few enough to be worth showing.
    #[must_use]
    pub fn displayed_solutions(&self) -> Option<&Solutions> {
        (self.solutions.len() < MAX_DISPLAYED_SOLUTIONS).then_some(&self.solutions)
    }

    /// Whether every choice has an operator and all the operands it needs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.choices.iter().all(|c| c.is_complete())
    }

    /// The question with solutions recomputed from its current choices.
    #[must_use]
    pub fn solved(self, range: AssignmentRange) -> (Self, SolutionStats) {
        let (solutions, stats) = solve_with_stats(&self.choices, range);
        (
            Self {
                choices: self.choices,
                solutions,
            },
            stats,
        )
    }

    /// The question with one choice replaced, re-solved over `range`.
    ///
    /// Returns `None` when `index` is not a choice index.
    #[must_use]
    pub fn with_choice(&self, index: usize, choice: Choice, range: AssignmentRange) -> Option<Self> {
        if index >= NUM_VARIABLES {
            return None;
        }
        let mut choices = self.choices;
        choices[index] = choice;
        Some(Self::from_choices(choices, range))
    }

    /// Replaces the operator of a choice, clearing both of its operands.
    #[must_use]
    pub fn select_operation(
        &self,
        index: usize,
        operator: Option<Operator>,
        range: AssignmentRange,
    ) -> Option<Self> {
        let choice = self.choice(index)?.with_operator(operator);
        self.with_choice(index, choice, range)
    }

    /// Replaces one operand of a choice, keeping the operator and the other operand.
    #[must_use]
    pub fn select_operand(
        &self,
        index: usize,
        slot: OperandSlot,
        operand: Option<Variable>,
        range: AssignmentRange,
    ) -> Option<Self> {
        let choice = self.choice(index)?.with_operand(slot, operand);
        self.with_choice(index, choice, range)
    }
}

impl Display for Question {
    /// The question in the puzzle text syntax: choices separated by ` | `.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.choices.iter().join(" | "))
    }
}
