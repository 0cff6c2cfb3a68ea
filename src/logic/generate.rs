#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Random question generation.
//!
//! Questions are drawn by picking each choice's operator uniformly and filling in
//! exactly the operands it reads. `generate_unique` keeps drawing until a question
//! has a single solution, which is what a published puzzle needs.

use crate::logic::choice::Choice;
use crate::logic::operator::Operator;
use crate::logic::question::Question;
use crate::logic::solver::Choices;
use crate::logic::truth_table::AssignmentRange;
use crate::logic::variable::{NUM_VARIABLES, Variable};
use fastrand::Rng;
use log::debug;

/// Default number of draws `generate_unique` makes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// A random, complete and well-formed choice.
pub fn random_choice(rng: &mut Rng) -> Choice {
    let operator = Operator::ALL[rng.usize(..Operator::ALL.len())];
    let mut pick = || Some(Variable::ALL[rng.usize(..NUM_VARIABLES)]);
    match operator.arity() {
        0 => Choice::new(Some(operator), None, None),
        1 => Choice::new(Some(operator), pick(), None),
        _ => {
            let first = pick();
            let second = pick();
            Choice::new(Some(operator), first, second)
        }
    }
}

/// Five random choices.
pub fn random_choices(rng: &mut Rng) -> Choices {
    std::array::from_fn(|_| random_choice(rng))
}

/// Draws random questions until one has exactly one solution over `range`.
///
/// Returns `None` if `max_attempts` draws all failed.
pub fn generate_unique(
    rng: &mut Rng,
    range: AssignmentRange,
    max_attempts: usize,
) -> Option<Question> {
    for attempt in 1..=max_attempts {
        let question = Question::from_choices(random_choices(rng), range);
        if question.solutions().len() == 1 {
            debug!("unique question found after {attempt} attempt(s): {question}");
            return Some(question);
        }
    }
    debug!("no unique question in {max_attempts} attempt(s)");
    None
}
