use std::fmt::{self, Write};
use grammar::{Rule, RuleId, Terminal, NonTerminal, Map, Set};
use crate::ShiftReduceConflictError;
use crate::state::{State, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  Shift(StateId),
  Reduce(RuleId),
  /// Reduce by a top-level rule and finish.
  Accept(RuleId),
}

/// An immutable shift/reduce automaton together with the rules it was built
/// from. Parsing only reads it, so one automaton can serve any number of
/// parses at once.
pub struct Automaton<T> {
  pub(crate) rules: Vec<Rule<T>>,
  pub(crate) terminals: Set<Terminal>,
  pub(crate) nonterminals: Set<NonTerminal>,
  pub(crate) states: Set<State>,
  /// state -> terminal -> action
  pub(crate) action: Vec<Map<Terminal, Action>>,
  /// state -> non-terminal -> next state
  pub(crate) goto: Vec<Map<NonTerminal, StateId>>,
  pub(crate) initial: StateId,
  pub(crate) conflicts: Vec<ShiftReduceConflictError>,
}

impl<T> Automaton<T> {
  pub fn rules(&self) -> &[Rule<T>] {
    &self.rules
  }

  pub fn terminals(&self) -> &Set<Terminal> {
    &self.terminals
  }

  pub fn nonterminals(&self) -> &Set<NonTerminal> {
    &self.nonterminals
  }

  pub fn initial_state(&self) -> StateId {
    self.initial
  }

  pub fn state_count(&self) -> usize {
    self.states.len()
  }

  pub fn state(&self, state: StateId) -> Option<&State> {
    self.states.get_index(state)
  }

  /// Looks up the id of a structurally equal state.
  pub fn state_id(&self, state: &State) -> Option<StateId> {
    self.states.get_index_of(state)
  }

  pub fn state_items(&self, state: StateId) -> Vec<String> {
    self.states.get_index(state)
      .map(|state| state.fmt_items(&self.rules))
      .unwrap_or_default()
  }

  pub fn action(&self, state: StateId, t: &Terminal) -> Option<Action> {
    self.action.get(state)?.get(t).copied()
  }

  pub fn actions(&self, state: StateId) -> Option<&Map<Terminal, Action>> {
    self.action.get(state)
  }

  pub fn goto(&self, state: StateId, nt: &NonTerminal) -> Option<StateId> {
    self.goto.get(state)?.get(nt).copied()
  }

  pub fn gotos(&self, state: StateId) -> Option<&Map<NonTerminal, StateId>> {
    self.goto.get(state)
  }

  /// Shift-reduce conflicts resolved in favour of the shift while building
  /// with [`ConflictPolicy::Warn`](crate::ConflictPolicy::Warn).
  pub fn conflicts(&self) -> &[ShiftReduceConflictError] {
    &self.conflicts
  }

  pub fn fmt_states(&self, f: &mut impl Write) -> fmt::Result {
    for (ix, state) in self.states.iter().enumerate() {
      if ix > 0 {
        writeln!(f)?;
        writeln!(f)?;
      }

      write!(f, "State {}", ix)?;
      if ix == self.initial {
        write!(f, " (start)")?;
      }

      for item in state.items() {
        writeln!(f)?;
        write!(f, "  ")?;
        item.fmt(&self.rules, f)?;
      }

      if !self.action[ix].is_empty() || !self.goto[ix].is_empty() {
        writeln!(f)?;
      }

      for (t, action) in &self.action[ix] {
        writeln!(f)?;
        write!(f, "  {} => ", t)?;
        match action {
          Action::Shift(to_state) => write!(f, "shift {}", to_state)?,
          Action::Reduce(rule) => write!(f, "reduce {}", self.rules[*rule])?,
          Action::Accept(rule) => write!(f, "accept {}", self.rules[*rule])?,
        }
      }

      for (nt, to_state) in &self.goto[ix] {
        writeln!(f)?;
        write!(f, "  {} => goto {}", nt, to_state)?;
      }
    }

    Ok(())
  }

  /// All states with their items, actions and gotos.
  pub fn states_report(&self) -> String {
    let mut buf = String::new();
    self.fmt_states(&mut buf).unwrap();
    buf
  }
}

impl<T> fmt::Debug for Automaton<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Automaton")
      .field("rules", &self.rules)
      .field("states", &self.states.len())
      .field("initial", &self.initial)
      .finish()
  }
}
