#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The closed vocabulary of operators a choice can be built from.
//!
//! An operator takes zero, one or two variables and yields a boolean. The
//! "no operator selected yet" state is `Option<Operator>::None`.

use std::fmt::Display;
use std::str::FromStr;

/// A boolean operator over at most two variables.
///
/// The discriminants are the numeric codes used by the menus; every operator with
/// a code of 4 or more takes two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// Always true.
    ConstantTrue = 0,
    /// Always false.
    ConstantFalse = 1,
    /// The value of the first operand.
    Affirms = 2,
    /// The negation of the first operand.
    Negates = 3,
    /// Both operands are true.
    And = 4,
    /// At least one operand is true.
    Or = 5,
    /// Exactly one operand is true.
    Xor = 6,
    /// Not both operands are true.
    Nand = 7,
    /// Neither operand is true.
    Nor = 8,
}

impl Operator {
    /// All operators in code order.
    pub const ALL: [Self; 9] = [
        Self::ConstantTrue,
        Self::ConstantFalse,
        Self::Affirms,
        Self::Negates,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Nand,
        Self::Nor,
    ];

    /// Number of variable operands the operator reads.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::ConstantTrue | Self::ConstantFalse => 0,
            Self::Affirms | Self::Negates => 1,
            Self::And | Self::Or | Self::Xor | Self::Nand | Self::Nor => 2,
        }
    }

    /// Arity of a possibly unset operator; an unset operator reads nothing.
    #[must_use]
    pub const fn arity_of(operator: Option<Self>) -> usize {
        match operator {
            Some(op) => op.arity(),
            None => 0,
        }
    }

    /// Numeric code of the operator.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Decodes a numeric code; `-1` and unknown codes mean "no operator".
    #[must_use]
    pub fn from_code(code: i8) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Applies the operator. Returns `None` when an operand the arity needs is missing.
    #[must_use]
    pub const fn apply(self, first: Option<bool>, second: Option<bool>) -> Option<bool> {
        match (self, first, second) {
            (Self::ConstantTrue, _, _) => Some(true),
            (Self::ConstantFalse, _, _) => Some(false),
            (Self::Affirms, Some(a), _) => Some(a),
            (Self::Negates, Some(a), _) => Some(!a),
            (Self::And, Some(a), Some(b)) => Some(a && b),
            (Self::Or, Some(a), Some(b)) => Some(a || b),
            (Self::Xor, Some(a), Some(b)) => Some(a != b),
            (Self::Nand, Some(a), Some(b)) => Some(!(a && b)),
            (Self::Nor, Some(a), Some(b)) => Some(!(a || b)),
            _ => None,
        }
    }

    /// Human readable menu label.
    ///
    /// These strings are what a puzzle reader sees, so they are part of the
    /// operator's meaning and must stay stable.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConstantTrue => "Sky is blue",
            Self::ConstantFalse => "Sky is green",
            Self::Affirms => "is correct",
            Self::Negates => "is incorrect",
            Self::And => "both are correct",
            Self::Or => "either is correct (or both)",
            Self::Xor => "exactly one is correct",
            Self::Nand => "not both are correct",
            Self::Nor => "neither is correct",
        }
    }

    /// Keyword used by the puzzle text format.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::ConstantTrue => "true",
            Self::ConstantFalse => "false",
            Self::Affirms => "is",
            Self::Negates => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.keyword() == lower)
            .ok_or_else(|| s.to_string())
    }
}
