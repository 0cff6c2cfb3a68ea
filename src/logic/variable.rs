#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The five named boolean variables a question talks about.
//!
//! Each variable doubles as a position in a truth assignment and as the index of the
//! choice whose correctness it represents: variable `C` is "choice 2 is correct".

use std::fmt::Display;
use std::str::FromStr;

/// Number of variables, and therefore of choices per question.
pub const NUM_VARIABLES: usize = 5;

/// One of the five named boolean variables.
///
/// An unset operand is modelled as `Option<Variable>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Variable `A`, ordinal 0.
    A = 0,
    /// Variable `B`, ordinal 1.
    B = 1,
    /// Variable `C`, ordinal 2.
    C = 2,
    /// Variable `D`, ordinal 3.
    D = 3,
    /// Variable `E`, ordinal 4.
    E = 4,
}

impl Variable {
    /// All variables in ordinal order.
    pub const ALL: [Self; NUM_VARIABLES] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Zero-based ordinal of the variable.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Variable for a zero-based ordinal, if in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            4 => Some(Self::E),
            _ => None,
        }
    }

    /// Decodes a raw operand code where `-1` (or any other out-of-range value)
    /// means "unset".
    #[must_use]
    pub fn from_code(code: i8) -> Option<Self> {
        usize::try_from(code).ok().and_then(Self::from_index)
    }

    /// Raw operand code, `-1` for an unset operand.
    #[must_use]
    pub fn code(variable: Option<Self>) -> i8 {
        variable.map_or(-1, |v| v as i8)
    }

    /// Single letter name of the variable.
    #[must_use]
    pub const fn name(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<char> for Variable {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            _ => Err(value),
        }
    }
}

impl FromStr for Variable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c).map_err(|_| s.to_string()),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, v) in Variable::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
            assert_eq!(Variable::from_index(i), Some(*v));
        }
        assert_eq!(Variable::from_index(5), None);
    }

    #[test]
    fn test_unset_code() {
        assert_eq!(Variable::from_code(-1), None);
        assert_eq!(Variable::from_code(3), Some(Variable::D));
        assert_eq!(Variable::from_code(7), None);
        assert_eq!(Variable::code(None), -1);
        assert_eq!(Variable::code(Some(Variable::E)), 4);
    }

    #[test]
    fn test_parse() {
        assert_eq!("b".parse::<Variable>(), Ok(Variable::B));
        assert_eq!("E".parse::<Variable>(), Ok(Variable::E));
        assert!("F".parse::<Variable>().is_err());
        assert!("AB".parse::<Variable>().is_err());
        assert!("".parse::<Variable>().is_err());
    }
}
