#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Brute-force search for the assignments that satisfy all five choices of a question.
//!
//! The search space is at most 31 assignments, so every candidate is simply
//! checked in ascending code order. Choices are tried in index order and the
//! first one that fails rejects the candidate.

use crate::logic::choice::Choice;
use crate::logic::truth_table::{AssignmentRange, TruthAssignment};
use crate::logic::variable::NUM_VARIABLES;
use itertools::Itertools;
use log::{debug, trace};
use smallvec::SmallVec;
use std::fmt::Display;
use std::ops::Deref;

/// The five choices of a question, indexed by the variable each one stands for.
pub type Choices = [Choice; NUM_VARIABLES];

/// Satisfying assignments of a question in generation order.
///
/// Never more than 31 entries, so they are kept inline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Solutions(SmallVec<[TruthAssignment; 32]>);

impl Solutions {
    /// Wraps a list of assignments.
    #[must_use]
    pub fn new(assignments: impl IntoIterator<Item = TruthAssignment>) -> Self {
        Self(assignments.into_iter().collect())
    }

    /// Whether the assignment is among the solutions.
    #[must_use]
    pub fn check(&self, assignment: TruthAssignment) -> bool {
        self.0.contains(&assignment)
    }

    /// The solutions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TruthAssignment] {
        &self.0
    }
}

impl Deref for Solutions {
    type Target = [TruthAssignment];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Solutions {
    type Item = &'a TruthAssignment;
    type IntoIter = std::slice::Iter<'a, TruthAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<TruthAssignment> for Solutions {
    fn from_iter<T: IntoIterator<Item = TruthAssignment>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Display for Solutions {
    /// Space separated `TFTFF` strings, or `none`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.0.iter().join(" "))
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SolutionStats {
    /// Assignments examined.
    pub candidates: usize,
    /// Individual choice checks performed (fewer than `5 * candidates` because of
    /// short-circuiting).
    pub evaluations: usize,
    /// Assignments accepted.
    pub solutions: usize,
}

impl SolutionStats {
    /// Adds the counters of another search.
    pub fn merge(&mut self, other: Self) {
        self.candidates += other.candidates;
        self.evaluations += other.evaluations;
        self.solutions += other.solutions;
    }
}

/// Whether every choice is consistent with the assignment, counting the checks made.
fn satisfies_all(
    choices: &Choices,
    assignment: TruthAssignment,
    evaluations: &mut usize,
) -> bool {
    for (index, choice) in choices.iter().enumerate() {
        *evaluations += 1;
        let valid = choice.is_valid(index, assignment);
        trace!("  choice {index} ({choice}) under {assignment}: {valid}");
        if !valid {
            return false;
        }
    }
    true
}

/// Finds every assignment in `range` under which all five choices hold.
#[must_use]
pub fn solve(choices: &Choices, range: AssignmentRange) -> Solutions {
    solve_with_stats(choices, range).0
}

/// Like [`solve`], also returning search counters.
#[must_use]
pub fn solve_with_stats(choices: &Choices, range: AssignmentRange) -> (Solutions, SolutionStats) {
    let mut stats = SolutionStats::default();
    let mut solutions = Solutions::default();

    for assignment in range.table() {
        stats.candidates += 1;
        let accepted = satisfies_all(choices, assignment, &mut stats.evaluations);
        debug!("candidate {assignment} ({:02}): {accepted}", assignment.code());
        if accepted {
            solutions.0.push(assignment);
        }
    }

    stats.solutions = solutions.len();
    (solutions, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::choice::Choice;
    use crate::logic::operator::Operator;
    use crate::logic::variable::Variable::{A, B, C, D, E};

    fn with_choice(index: usize, choice: Choice) -> Choices {
        let mut choices = [Choice::EMPTY; NUM_VARIABLES];
        choices[index] = choice;
        choices
    }

    #[test]
    fn test_empty_question_accepts_everything() {
        let choices = [Choice::EMPTY; NUM_VARIABLES];
        assert_eq!(solve(&choices, AssignmentRange::Full).len(), 31);
        assert_eq!(solve(&choices, AssignmentRange::Legacy).len(), 26);
        assert_eq!(
            solve(&choices, AssignmentRange::Full).as_slice(),
            AssignmentRange::Full.table().collect::<Vec<_>>().as_slice()
        );
    }

    #[test]
    fn test_solve_is_idempotent() {
        let choices = [
            Choice::binary(Operator::Xor, B, C),
            Choice::unary(Operator::Negates, A),
            Choice::constant(true),
            Choice::binary(Operator::Or, D, E),
            Choice::EMPTY,
        ];
        let first = solve(&choices, AssignmentRange::Full);
        let second = solve(&choices, AssignmentRange::Full);
        assert_eq!(first, second);
    }

    #[test]
    fn test_constant_true_at_first_choice() {
        let choices = with_choice(0, Choice::constant(true));

        let full = solve(&choices, AssignmentRange::Full);
        assert_eq!(full.len(), 16);
        assert!(full.iter().all(|a| a[A]));
        assert_eq!(full.first().map(|a| a.code()), Some(16));
        assert_eq!(full.last().map(|a| a.code()), Some(31));

        let legacy = solve(&choices, AssignmentRange::Legacy);
        assert_eq!(legacy.len(), 11);
        assert_eq!(legacy.last().map(|a| a.code()), Some(26));
    }

    #[test]
    fn test_affirms_d_at_choice_two() {
        let choices = with_choice(2, Choice::unary(Operator::Affirms, D));
        let solutions = solve(&choices, AssignmentRange::Full);
        let expected = AssignmentRange::Full
            .table()
            .filter(|a| a[C] == a[D])
            .collect::<Vec<_>>();
        assert_eq!(solutions.as_slice(), expected.as_slice());
        assert_eq!(solutions.len(), 15);
    }

    #[test]
    fn test_and_at_choice_zero() {
        let choices = with_choice(0, Choice::binary(Operator::And, A, B));
        let solutions = solve(&choices, AssignmentRange::Full);
        assert!(solutions.iter().all(|a| a[A] == (a[A] && a[B])));
        assert!(solutions.check(TruthAssignment::from_values([true, true, false, false, false])));
        assert!(!solutions.check(TruthAssignment::from_values([true, false, false, false, false])));
    }

    #[test]
    fn test_binary_without_second_operand_does_not_filter() {
        let choices = with_choice(3, Choice::new(Some(Operator::Xor), Some(A), None));
        assert_eq!(solve(&choices, AssignmentRange::Full).len(), 31);
    }

    #[test]
    fn test_self_referential_pair() {
        // A: "B is correct", B: "A is correct", C: sky is green, D: not C, E: neither A nor D.
        let choices = [
            Choice::unary(Operator::Affirms, B),
            Choice::unary(Operator::Affirms, A),
            Choice::constant(false),
            Choice::unary(Operator::Negates, C),
            Choice::binary(Operator::Nor, A, D),
        ];
        let solutions = solve(&choices, AssignmentRange::Full);
        // C false, D true, E false, A and B agree.
        assert_eq!(
            solutions.as_slice(),
            &[
                TruthAssignment::from_values([false, false, false, true, false]),
                TruthAssignment::from_values([true, true, false, true, false]),
            ]
        );
    }

    #[test]
    fn test_stats_count_short_circuit() {
        let choices = with_choice(0, Choice::constant(false));
        let (solutions, stats) = solve_with_stats(&choices, AssignmentRange::Full);
        assert_eq!(stats.candidates, 31);
        assert_eq!(stats.solutions, solutions.len());
        assert_eq!(solutions.len(), 15);
        // Rejected candidates stop after the first choice.
        assert_eq!(stats.evaluations, 16 + 15 * 5);
    }

    #[test]
    fn test_display() {
        let choices = [
            Choice::constant(true),
            Choice::constant(false),
            Choice::constant(false),
            Choice::constant(false),
            Choice::constant(true),
        ];
        let solutions = solve(&choices, AssignmentRange::Full);
        assert_eq!(solutions.to_string(), "TFFFT");
        assert_eq!(Solutions::default().to_string(), "none");
    }
}
