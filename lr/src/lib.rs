use thiserror::Error;
use grammar::Rule;

mod item;
mod state;
mod config;
mod builder;
mod automaton;
mod parser;

pub use item::Item;
pub use state::{State, StateId};
pub use config::{Config, ConflictPolicy};
pub use builder::Builder;
pub use automaton::{Automaton, Action};
pub use parser::{ParseError, SyntaxError, MissingGotoError, UnfinishedError};

/// Builds the automaton for `rules` with the default [`Config`].
pub fn build<T>(rules: Vec<Rule<T>>) -> Result<Automaton<T>, Error> {
  Builder::new(rules, Config::default()).build()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("no rule has `{0}` as its left-hand side")]
  MissingStart(String),
  #[error("{0}")]
  ReduceReduceConflict(ReduceReduceConflictError),
  #[error("{0}")]
  ShiftShiftConflict(ShiftShiftConflictError),
  #[error("{0}")]
  ShiftReduceConflict(ShiftReduceConflictError),
}

/// A state where two rules are complete at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reduce-reduce conflict between `{reduce1}` and `{reduce2}` at state {}", .state_items.join(" + "))]
pub struct ReduceReduceConflictError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub reduce1: String,
  pub reduce2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("multiple shifts over {terminal} at state {}", .state_items.join(" + "))]
pub struct ShiftShiftConflictError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub terminal: String,
}

/// A state that can both shift `shift` and reduce by `reduce`. The shift
/// wins unless the conflict policy rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shift-reduce conflict over {shift} and `{reduce}` at state {}", .state_items.join(" + "))]
pub struct ShiftReduceConflictError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub shift: String,
  pub reduce: String,
}
