#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A single choice of a question and the check of a choice against an assignment.
//!
//! A choice at index `c` claims something about the other choices, and variable `c`
//! of a truth assignment says whether choice `c` itself is correct. The choice is
//! consistent with an assignment when the value its operator computes equals the
//! assignment's value at `c`.
//!
//! A choice that cannot be evaluated yet (no operator, or an operand the operator
//! needs is still unset) never rules an assignment out.

use crate::logic::operator::Operator;
use crate::logic::truth_table::TruthAssignment;
use crate::logic::variable::Variable;
use std::fmt::Display;

/// Which operand slot of a choice an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSlot {
    /// The first operand, read by operators of arity 1 and 2.
    First,
    /// The second operand, read by operators of arity 2.
    Second,
}

impl OperandSlot {
    /// Smallest operator arity that reads this slot.
    #[must_use]
    pub const fn min_arity(self) -> usize {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// An operator together with up to two operand variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Choice {
    /// The selected operator, `None` while unset.
    pub operator: Option<Operator>,
    /// First operand, `None` while unset.
    pub operand1: Option<Variable>,
    /// Second operand, `None` while unset.
    pub operand2: Option<Variable>,
}

impl Choice {
    /// A choice with nothing selected.
    pub const EMPTY: Self = Self {
        operator: None,
        operand1: None,
        operand2: None,
    };

    /// Builds a choice from its parts.
    #[must_use]
    pub const fn new(
        operator: Option<Operator>,
        operand1: Option<Variable>,
        operand2: Option<Variable>,
    ) -> Self {
        Self {
            operator,
            operand1,
            operand2,
        }
    }

    /// A constant choice (`true` or `false`).
    #[must_use]
    pub const fn constant(value: bool) -> Self {
        let operator = if value {
            Operator::ConstantTrue
        } else {
            Operator::ConstantFalse
        };
        Self::new(Some(operator), None, None)
    }

    /// A one-operand choice.
    #[must_use]
    pub const fn unary(operator: Operator, operand: Variable) -> Self {
        Self::new(Some(operator), Some(operand), None)
    }

    /// A two-operand choice.
    #[must_use]
    pub const fn binary(operator: Operator, first: Variable, second: Variable) -> Self {
        Self::new(Some(operator), Some(first), Some(second))
    }

    /// The choice with a new operator and both operands cleared.
    #[must_use]
    pub const fn with_operator(self, operator: Option<Operator>) -> Self {
        Self::new(operator, None, None)
    }

    /// The choice with one operand slot replaced and everything else kept.
    #[must_use]
    pub const fn with_operand(self, slot: OperandSlot, operand: Option<Variable>) -> Self {
        match slot {
            OperandSlot::First => Self::new(self.operator, operand, self.operand2),
            OperandSlot::Second => Self::new(self.operator, self.operand1, operand),
        }
    }

    /// Operand stored in a slot.
    #[must_use]
    pub const fn operand(self, slot: OperandSlot) -> Option<Variable> {
        match slot {
            OperandSlot::First => self.operand1,
            OperandSlot::Second => self.operand2,
        }
    }

    /// Whether the choice has nothing selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.operator.is_none() && self.operand1.is_none() && self.operand2.is_none()
    }

    /// Whether every operand the operator reads is set.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        match self.operator {
            None => false,
            Some(op) => match op.arity() {
                0 => true,
                1 => self.operand1.is_some(),
                _ => self.operand1.is_some() && self.operand2.is_some(),
            },
        }
    }

    /// Whether operands the operator does not read are unset.
    #[must_use]
    pub const fn is_well_formed(self) -> bool {
        let arity = Operator::arity_of(self.operator);
        (arity >= OperandSlot::First.min_arity() || self.operand1.is_none())
            && (arity >= OperandSlot::Second.min_arity() || self.operand2.is_none())
    }

    /// The value the choice's operator computes under an assignment.
    ///
    /// `None` while the operator or an operand it needs is unset.
    #[must_use]
    pub fn target_truth(self, assignment: TruthAssignment) -> Option<bool> {
        self.operator?.apply(
            assignment.operand(self.operand1),
            assignment.operand(self.operand2),
        )
    }

    /// Whether the choice, sitting at `index` in its question, is consistent with
    /// the assignment.
    ///
    /// Total: unset parts and out-of-range indices are vacuously valid.
    #[must_use]
    pub fn is_valid(self, index: usize, assignment: TruthAssignment) -> bool {
        match (self.target_truth(assignment), assignment.get(index)) {
            (Some(target), Some(claimed)) => claimed == target,
            _ => true,
        }
    }
}

/// Free-standing form of [`Choice::is_valid`].
#[must_use]
pub fn is_choice_valid(choice: &Choice, choice_index: usize, assignment: &TruthAssignment) -> bool {
    choice.is_valid(choice_index, *assignment)
}

fn fmt_operand(operand: Option<Variable>, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match operand {
        Some(v) => write!(f, " {v}"),
        None => write!(f, " -"),
    }
}

impl Display for Choice {
    /// Writes the choice in the puzzle text syntax, e.g. `and A B`, `is D`, `none`.
    ///
    /// Operand slots the operator reads are always written (unset ones as `-`), so
    /// the output parses back to the same choice.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(op) = self.operator else {
            return write!(f, "none");
        };
        write!(f, "{op}")?;
        let arity = op.arity();
        if arity >= 1 {
            fmt_operand(self.operand1, f)?;
        }
        if arity >= 2 {
            fmt_operand(self.operand2, f)?;
        }
        Ok(())
    }
}
