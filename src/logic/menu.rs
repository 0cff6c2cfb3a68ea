#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Selection menus for operators and operands as fixed, ordered tables.

use crate::logic::choice::OperandSlot;
use crate::logic::operator::Operator;
use crate::logic::variable::Variable;

/// Label shown for the "nothing selected" entry of every menu.
pub const UNSET_LABEL: &str = "-";

/// One entry of a selection menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuOption<T> {
    /// Text shown to the user.
    pub label: &'static str,
    /// Value selected by the entry.
    pub value: T,
}

impl<T> MenuOption<T> {
    const fn new(label: &'static str, value: T) -> Self {
        Self { label, value }
    }
}

const fn operator_option(operator: Operator) -> MenuOption<Option<Operator>> {
    MenuOption::new(operator.label(), Some(operator))
}

static OPERATOR_OPTIONS: [MenuOption<Option<Operator>>; 10] = [
    MenuOption::new(UNSET_LABEL, None),
    operator_option(Operator::ConstantTrue),
    operator_option(Operator::ConstantFalse),
    operator_option(Operator::Affirms),
    operator_option(Operator::Negates),
    operator_option(Operator::And),
    operator_option(Operator::Or),
    operator_option(Operator::Xor),
    operator_option(Operator::Nand),
    operator_option(Operator::Nor),
];

static OPERAND_OPTIONS: [MenuOption<Option<Variable>>; 6] = [
    MenuOption::new(UNSET_LABEL, None),
    MenuOption::new("A", Some(Variable::A)),
    MenuOption::new("B", Some(Variable::B)),
    MenuOption::new("C", Some(Variable::C)),
    MenuOption::new("D", Some(Variable::D)),
    MenuOption::new("E", Some(Variable::E)),
];

/// The operator menu: the unset entry, then every operator in code order.
#[must_use]
pub fn operator_menu_options() -> &'static [MenuOption<Option<Operator>>] {
    &OPERATOR_OPTIONS
}

/// The operand menu for one slot of a choice using `operator`.
///
/// The unset entry is always offered. The variables are offered only when the
/// operator reads the slot: the first slot from arity 1, the second from arity 2.
#[must_use]
pub fn operand_menu_options(
    operator: Option<Operator>,
    slot: OperandSlot,
) -> &'static [MenuOption<Option<Variable>>] {
    if Operator::arity_of(operator) >= slot.min_arity() {
        &OPERAND_OPTIONS
    } else {
        &OPERAND_OPTIONS[..1]
    }
}
