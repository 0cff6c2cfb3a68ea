#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The full puzzle: up to twelve independent questions and the edits applied to them.
//!
//! Edits never mutate a puzzle in place. `Puzzle::apply` builds a new puzzle in
//! which only the edited question differs, and only that question is re-solved.

use crate::logic::choice::OperandSlot;
use crate::logic::operator::Operator;
use crate::logic::question::Question;
use crate::logic::solver::{Choices, SolutionStats};
use crate::logic::truth_table::AssignmentRange;
use crate::logic::variable::{NUM_VARIABLES, Variable};
use itertools::Itertools;
use log::debug;
use std::fmt::Display;
use thiserror::Error;

/// Most questions a puzzle can hold.
pub const MAX_QUESTIONS: usize = 12;

/// Errors raised by puzzle edits. Evaluation itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The question index does not exist.
    #[error("question {index} is out of range, the puzzle has {len} questions")]
    QuestionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of questions.
        len: usize,
    },
    /// The choice index is not in `0..5`.
    #[error("choice {0} is out of range, questions have {n} choices", n = NUM_VARIABLES)]
    ChoiceOutOfRange(usize),
    /// More questions were requested than a puzzle can hold.
    #[error("a puzzle holds at most {max} questions, got {0}", max = MAX_QUESTIONS)]
    TooManyQuestions(usize),
}

/// A single user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit {
    /// Pick a new operator for a choice. Both operands are cleared.
    SelectOperation {
        /// Question index.
        question: usize,
        /// Choice index within the question.
        choice: usize,
        /// The new operator, `None` to unset it.
        operator: Option<Operator>,
    },
    /// Pick one operand of a choice.
    SelectOperand {
        /// Question index.
        question: usize,
        /// Choice index within the question.
        choice: usize,
        /// Which operand.
        slot: OperandSlot,
        /// The new operand, `None` to unset it.
        operand: Option<Variable>,
    },
}

impl Edit {
    /// Index of the question the edit touches.
    #[must_use]
    pub const fn question(&self) -> usize {
        match self {
            Self::SelectOperation { question, .. } | Self::SelectOperand { question, .. } => {
                *question
            }
        }
    }

    /// Index of the choice the edit touches.
    #[must_use]
    pub const fn choice(&self) -> usize {
        match self {
            Self::SelectOperation { choice, .. } | Self::SelectOperand { choice, .. } => *choice,
        }
    }
}

/// An ordered list of questions sharing one assignment range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    questions: Vec<Question>,
    range: AssignmentRange,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self {
            questions: vec![Question::new(); MAX_QUESTIONS],
            range: AssignmentRange::default(),
        }
    }
}

impl Puzzle {
    /// A puzzle of `count` empty questions.
    ///
    /// # Errors
    ///
    /// If `count` exceeds `MAX_QUESTIONS`.
    pub fn new(count: usize, range: AssignmentRange) -> Result<Self, PuzzleError> {
        if count > MAX_QUESTIONS {
            return Err(PuzzleError::TooManyQuestions(count));
        }
        Ok(Self {
            questions: vec![Question::new(); count],
            range,
        })
    }

    /// A puzzle with one solved question per set of choices.
    ///
    /// # Errors
    ///
    /// If there are more than `MAX_QUESTIONS` questions.
    pub fn from_choices(
        choices: impl IntoIterator<Item = Choices>,
        range: AssignmentRange,
    ) -> Result<Self, PuzzleError> {
        let questions = choices
            .into_iter()
            .map(|c| Question::from_choices(c, range))
            .collect_vec();
        if questions.len() > MAX_QUESTIONS {
            return Err(PuzzleError::TooManyQuestions(questions.len()));
        }
        Ok(Self { questions, range })
    }

    /// A puzzle made of the given questions, each re-solved over `range`.
    ///
    /// # Errors
    ///
    /// If there are more than `MAX_QUESTIONS` questions.
    pub fn from_questions(
        questions: Vec<Question>,
        range: AssignmentRange,
    ) -> Result<Self, PuzzleError> {
        Self::from_choices(questions.iter().map(|q| *q.choices()), range)
    }

    /// The questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question at `index`, if any.
    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the puzzle has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The assignment range every question is solved over.
    #[must_use]
    pub const fn range(&self) -> AssignmentRange {
        self.range
    }

    /// The same choices re-solved over another range.
    #[must_use]
    pub fn with_range(&self, range: AssignmentRange) -> Self {
        let questions = self
            .questions
            .iter()
            .map(|q| Question::from_choices(*q.choices(), range))
            .collect();
        Self { questions, range }
    }

    /// Solves every question again and sums the search counters.
    #[must_use]
    pub fn resolve_all(&self) -> (Self, SolutionStats) {
        let mut total = SolutionStats::default();
        let questions = self
            .questions
            .iter()
            .map(|q| {
                let (question, stats) = q.clone().solved(self.range);
                total.merge(stats);
                question
            })
            .collect();
        (
            Self {
                questions,
                range: self.range,
            },
            total,
        )
    }

    /// Applies an edit, returning a new puzzle where only the edited question changed.
    ///
    /// # Errors
    ///
    /// If the question or choice index is out of range.
    pub fn apply(&self, edit: Edit) -> Result<Self, PuzzleError> {
        let index = edit.question();
        let current = self.question(index).ok_or(PuzzleError::QuestionOutOfRange {
            index,
            len: self.len(),
        })?;

        let edited = match edit {
            Edit::SelectOperation {
                choice, operator, ..
            } => current.select_operation(choice, operator, self.range),
            Edit::SelectOperand {
                choice,
                slot,
                operand,
                ..
            } => current.select_operand(choice, slot, operand, self.range),
        }
        .ok_or(PuzzleError::ChoiceOutOfRange(edit.choice()))?;

        debug!(
            "question {index} now `{edited}` with {} solution(s)",
            edited.solutions().len()
        );

        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| if i == index { edited.clone() } else { q.clone() })
            .collect();

        Ok(Self {
            questions,
            range: self.range,
        })
    }

    /// Replaces a choice's operator and clears its operands.
    ///
    /// # Errors
    ///
    /// If the question or choice index is out of range.
    pub fn select_operation(
        &self,
        question: usize,
        choice: usize,
        operator: Option<Operator>,
    ) -> Result<Self, PuzzleError> {
        self.apply(Edit::SelectOperation {
            question,
            choice,
            operator,
        })
    }

    /// Replaces one operand slot of a choice.
    ///
    /// # Errors
    ///
    /// If the question or choice index is out of range.
    pub fn select_operand(
        &self,
        question: usize,
        choice: usize,
        slot: OperandSlot,
        operand: Option<Variable>,
    ) -> Result<Self, PuzzleError> {
        self.apply(Edit::SelectOperand {
            question,
            choice,
            slot,
            operand,
        })
    }
}

impl Display for Puzzle {
    /// One question per line in the puzzle text syntax.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for question in &self.questions {
            writeln!(f, "{question}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::choice::Choice;
    use crate::logic::variable::Variable::{A, B};

    #[test]
    fn test_default_has_twelve_empty_questions() {
        let puzzle = Puzzle::default();
        assert_eq!(puzzle.len(), MAX_QUESTIONS);
        assert!(puzzle.questions().iter().all(|q| q.solutions().is_empty()));
        assert_eq!(puzzle.range(), AssignmentRange::Full);
    }

    #[test]
    fn test_new_rejects_too_many() {
        assert_eq!(
            Puzzle::new(13, AssignmentRange::Full),
            Err(PuzzleError::TooManyQuestions(13))
        );
        assert!(Puzzle::new(0, AssignmentRange::Full).unwrap().is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PuzzleError::TooManyQuestions(13).to_string(),
            "a puzzle holds at most 12 questions, got 13"
        );
        assert_eq!(
            PuzzleError::ChoiceOutOfRange(5).to_string(),
            "choice 5 is out of range, questions have 5 choices"
        );
    }

    #[test]
    fn test_edit_only_touches_target_question() {
        let puzzle = Puzzle::default();
        let edited = puzzle
            .select_operation(3, 0, Some(Operator::ConstantTrue))
            .unwrap();

        assert_eq!(edited.question(3).unwrap().solutions().len(), 16);
        for (i, question) in edited.questions().iter().enumerate() {
            if i != 3 {
                assert_eq!(question, &puzzle.questions()[i]);
                assert!(question.solutions().is_empty());
            }
        }
        // The original puzzle is untouched.
        assert!(puzzle.question(3).unwrap().solutions().is_empty());
    }

    #[test]
    fn test_select_operand_edit() {
        let puzzle = Puzzle::new(2, AssignmentRange::Legacy)
            .unwrap()
            .select_operation(1, 4, Some(Operator::Nand))
            .unwrap()
            .select_operand(1, 4, OperandSlot::First, Some(A))
            .unwrap();
        // Second operand still unset: vacuous.
        assert_eq!(puzzle.question(1).unwrap().solutions().len(), 26);

        let puzzle = puzzle
            .select_operand(1, 4, OperandSlot::Second, Some(B))
            .unwrap();
        let question = puzzle.question(1).unwrap();
        assert_eq!(question.choices()[4], Choice::binary(Operator::Nand, A, B));
        assert!(
            question
                .solutions()
                .iter()
                .all(|a| a.get(4) == Some(!(a[A] && a[B])))
        );
    }

    #[test]
    fn test_edit_out_of_range() {
        let puzzle = Puzzle::new(2, AssignmentRange::Full).unwrap();
        assert_eq!(
            puzzle.select_operation(2, 0, None),
            Err(PuzzleError::QuestionOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            puzzle.select_operand(0, 5, OperandSlot::First, Some(A)),
            Err(PuzzleError::ChoiceOutOfRange(5))
        );
    }

    #[test]
    fn test_with_range_resolves() {
        let puzzle = Puzzle::new(1, AssignmentRange::Full)
            .unwrap()
            .select_operation(0, 0, Some(Operator::ConstantTrue))
            .unwrap();
        let legacy = puzzle.with_range(AssignmentRange::Legacy);
        assert_eq!(legacy.question(0).unwrap().solutions().len(), 11);
    }

    #[test]
    fn test_resolve_all_sums_stats() {
        let (puzzle, stats) = Puzzle::new(3, AssignmentRange::Full).unwrap().resolve_all();
        assert_eq!(stats.candidates, 3 * 31);
        assert_eq!(stats.evaluations, 3 * 31 * 5);
        assert!(puzzle.questions().iter().all(|q| q.solutions().len() == 31));
    }
}
