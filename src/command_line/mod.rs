/// Argument definitions and the command handlers.
pub(crate) mod cli;
