use std::collections::VecDeque;
use itertools::Itertools;
use grammar::{Rule, RuleId, Symbol, Terminal, NonTerminal, Map, Set};
use crate::{
  Error,
  ReduceReduceConflictError,
  ShiftShiftConflictError,
  ShiftReduceConflictError,
};
use crate::automaton::{Automaton, Action};
use crate::config::{Config, ConflictPolicy};
use crate::item::Item;
use crate::state::{State, StateId};

/// Builds the LR(0) automaton of a rule list.
///
/// States are discovered breadth-first from the initial state and interned
/// by their item set, so state numbering only depends on the rule list.
pub struct Builder<T> {
  rules: Vec<Rule<T>>,
  config: Config,
  /// lhs -> rules with that lhs
  by_lhs: Map<String, Vec<RuleId>>,
  terminals: Set<Terminal>,
  nonterminals: Set<NonTerminal>,
  states: Set<State>,
  action: Vec<Map<Terminal, Action>>,
  goto: Vec<Map<NonTerminal, StateId>>,
  conflicts: Vec<ShiftReduceConflictError>,
}

impl<T> Builder<T> {
  pub fn new(rules: Vec<Rule<T>>, config: Config) -> Self {
    let mut by_lhs = Map::<String, Vec<RuleId>>::default();
    for (ix, rule) in rules.iter().enumerate() {
      by_lhs.entry(rule.lhs.clone()).or_default().push(ix);
    }

    Builder {
      rules,
      config,
      by_lhs,
      terminals: Set::default(),
      nonterminals: Set::default(),
      states: Set::default(),
      action: vec![],
      goto: vec![],
      conflicts: vec![],
    }
  }

  pub fn rules(&self) -> &[Rule<T>] {
    &self.rules
  }

  pub fn build(mut self) -> Result<Automaton<T>, Error> {
    for rule in &self.rules {
      for sym in &rule.rhs {
        match sym {
          Symbol::Nonterminal(nt) => {
            self.nonterminals.insert(nt.clone());
          }
          Symbol::Terminal(t) => {
            self.terminals.insert(t.clone());
          }
        }
      }
    }
    self.terminals.insert(Terminal::EndOfInput);

    let initial = self.initial_state()?;
    let (initial, _) = self.intern(initial);

    let mut queue = VecDeque::new();
    queue.push_back(initial);

    while let Some(state) = queue.pop_front() {
      self.expand(state, &mut queue)?;
    }

    log::debug!(
      "built automaton: {} rules, {} terminals, {} non-terminals, {} states",
      self.rules.len(),
      self.terminals.len(),
      self.nonterminals.len(),
      self.states.len());

    Ok(Automaton {
      rules: self.rules,
      terminals: self.terminals,
      nonterminals: self.nonterminals,
      states: self.states,
      action: self.action,
      goto: self.goto,
      initial,
      conflicts: self.conflicts,
    })
  }

  /// The closed state holding the start of every top-level rule.
  pub fn initial_state(&self) -> Result<State, Error> {
    let start_rules = self.by_lhs.get(&self.config.start)
      .ok_or_else(|| Error::MissingStart(self.config.start.clone()))?;

    let mut state = start_rules.iter()
      .map(|&rule| Item::new(rule, 0))
      .collect::<State>();
    self.close(&mut state);

    Ok(state)
  }

  /// Adds `(r, 0)` for every rule `r` of every non-terminal that follows a
  /// dot, until nothing more is added.
  pub fn close(&self, state: &mut State) {
    let mut new = state.items().to_vec();

    while let Some(item) = new.pop() {
      if let Some(Symbol::Nonterminal(nt)) = item.next_symbol(&self.rules) {
        if let Some(rules) = self.by_lhs.get(nt.name()) {
          for &rule in rules {
            let item = Item::new(rule, 0);
            if state.add_item(item) {
              new.push(item);
            }
          }
        }
      }
    }
  }

  /// Complete items of a state.
  pub fn reductions(&self, state: &State) -> Vec<Item> {
    state.items()
      .iter()
      .filter(|item| item.is_complete(&self.rules))
      .cloned()
      .collect()
  }

  /// Closed target states of a state, grouped by the symbol the dot moves
  /// over. Groups are in order of first appearance among the items.
  pub fn transitions(
    &self,
    state: &State,
  ) -> (Map<Terminal, State>, Map<NonTerminal, State>) {
    let mut shifts = Map::<Terminal, State>::default();
    let mut gotos = Map::<NonTerminal, State>::default();

    for item in state.items() {
      match item.next_symbol(&self.rules) {
        Some(Symbol::Terminal(t)) => {
          shifts.entry(t.clone()).or_default().add_item(item.advance());
        }
        Some(Symbol::Nonterminal(nt)) => {
          gotos.entry(nt.clone()).or_default().add_item(item.advance());
        }
        None => {}
      }
    }

    for state in shifts.values_mut().chain(gotos.values_mut()) {
      self.close(state);
    }

    (shifts, gotos)
  }

  /// Returns the index of `state` and whether it was newly registered.
  fn intern(&mut self, state: State) -> (StateId, bool) {
    let (ix, new) = self.states.insert_full(state);
    if new {
      self.action.push(Map::default());
      self.goto.push(Map::default());
    }
    (ix, new)
  }

  fn expand(
    &mut self,
    from_state: StateId,
    queue: &mut VecDeque<StateId>,
  ) -> Result<(), Error> {
    let state = self.states[from_state].clone();
    log::trace!("state {}: {}", from_state, state.items()
      .iter()
      .map(|item| item.to_string(&self.rules))
      .join(" + "));

    let reductions = self.reductions(&state);
    if reductions.len() > 1 {
      return Err(Error::ReduceReduceConflict(ReduceReduceConflictError {
        state: from_state,
        state_items: state.fmt_items(&self.rules),
        reduce1: self.rules[reductions[0].rule].to_string(),
        reduce2: self.rules[reductions[1].rule].to_string(),
      }));
    }

    let mut actions = Map::<Terminal, Action>::default();

    if let Some(item) = reductions.first() {
      let action = if self.rules[item.rule].lhs == self.config.start {
        Action::Accept(item.rule)
      } else {
        Action::Reduce(item.rule)
      };
      for t in &self.terminals {
        actions.insert(t.clone(), action);
      }
    }

    let (shifts, gotos) = self.transitions(&state);

    for (t, to_state) in shifts {
      match actions.get(&t) {
        Some(Action::Shift(_)) => {
          return Err(Error::ShiftShiftConflict(ShiftShiftConflictError {
            state: from_state,
            state_items: state.fmt_items(&self.rules),
            terminal: t.to_string(),
          }));
        }
        Some(&Action::Reduce(rule)) | Some(&Action::Accept(rule)) => {
          self.shift_over_reduce(from_state, &state, &t, rule)?;
        }
        None => {}
      }

      let (to_state, is_new) = self.intern(to_state);
      if is_new {
        queue.push_back(to_state);
      }
      actions.insert(t, Action::Shift(to_state));
    }

    self.action[from_state] = actions;

    for (nt, to_state) in gotos {
      let (to_state, is_new) = self.intern(to_state);
      if is_new {
        queue.push_back(to_state);
      }
      self.goto[from_state].insert(nt, to_state);
    }

    Ok(())
  }

  fn shift_over_reduce(
    &mut self,
    from_state: StateId,
    state: &State,
    t: &Terminal,
    rule: RuleId,
  ) -> Result<(), Error> {
    if self.config.conflicts == ConflictPolicy::PreferShift {
      return Ok(());
    }

    let conflict = ShiftReduceConflictError {
      state: from_state,
      state_items: state.fmt_items(&self.rules),
      shift: t.to_string(),
      reduce: self.rules[rule].to_string(),
    };

    if self.config.conflicts == ConflictPolicy::Reject {
      return Err(Error::ShiftReduceConflict(conflict));
    }

    log::warn!("{}; shifting", conflict);
    self.conflicts.push(conflict);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::Attr;
  use pretty_assertions::assert_eq;

  fn rule(lhs: &str, rhs: Vec<Symbol>) -> Rule<()> {
    Rule::new(lhs, rhs, |_| Attr::Value(()))
  }

  /// 0 -> E
  /// E -> E "+" T | T
  /// T -> _ident_ | "(" E ")"
  fn expr() -> Vec<Rule<()>> {
    vec![
      rule("0", vec![Symbol::nt("E")]),
      rule("E", vec![Symbol::nt("E"), Symbol::lit("+"), Symbol::nt("T")]),
      rule("E", vec![Symbol::nt("T")]),
      rule("T", vec![Symbol::ident()]),
      rule("T", vec![Symbol::lit("("), Symbol::nt("E"), Symbol::lit(")")]),
    ]
  }

  #[test]
  fn closure() {
    let builder = Builder::new(expr(), Config::default());
    let state = builder.initial_state().unwrap();

    assert_eq!(state.fmt_items(builder.rules()), vec![
      "0 -> . E",
      "E -> . E \"+\" T",
      "E -> . T",
      "T -> . _ident_",
      "T -> . \"(\" E \")\"",
    ]);
  }

  #[test]
  fn closure_is_idempotent() {
    let builder = Builder::new(expr(), Config::default());
    let state = builder.initial_state().unwrap();

    let mut closed = state.clone();
    builder.close(&mut closed);

    assert_eq!(closed, state);
  }

  #[test]
  fn transitions() {
    let builder = Builder::new(expr(), Config::default());
    let state = builder.initial_state().unwrap();
    let (shifts, gotos) = builder.transitions(&state);

    assert_eq!(
      shifts.keys().cloned().collect::<Vec<_>>(),
      vec![Terminal::Identifier, Terminal::Literal("(".to_owned())]);
    assert_eq!(
      gotos.keys().cloned().collect::<Vec<_>>(),
      vec![NonTerminal::new("E"), NonTerminal::new("T")]);

    assert_eq!(gotos[&NonTerminal::new("E")].fmt_items(builder.rules()), vec![
      "0 -> E .",
      "E -> E . \"+\" T",
    ]);
    assert_eq!(shifts[&Terminal::Literal("(".to_owned())].fmt_items(builder.rules()), vec![
      "E -> . E \"+\" T",
      "E -> . T",
      "T -> . _ident_",
      "T -> . \"(\" E \")\"",
      "T -> \"(\" . E \")\"",
    ]);
  }

  #[test]
  fn reductions() {
    let builder = Builder::new(expr(), Config::default());
    let state = vec![Item::new(0, 1), Item::new(1, 1)].into_iter().collect::<State>();

    assert_eq!(builder.reductions(&state), vec![Item::new(0, 1)]);
  }

  #[test]
  fn missing_start() {
    let rules = vec![rule("S", vec![Symbol::lit("a")])];

    let result = Builder::new(rules, Config::default()).build();

    assert_eq!(result.err(), Some(Error::MissingStart("0".to_owned())));
  }

  #[test]
  fn custom_start() {
    let rules = vec![
      rule("top", vec![Symbol::nt("S")]),
      rule("S", vec![Symbol::lit("a")]),
    ];

    let automaton = Builder::new(rules, Config::default().with_start("top"))
      .build()
      .unwrap();

    assert_eq!(automaton.state_count(), 3);
  }

  #[test]
  fn reduce_reduce() {
    let rules = vec![
      rule("0", vec![Symbol::nt("S")]),
      rule("S", vec![Symbol::lit("a")]),
      rule("S", vec![Symbol::lit("a")]),
    ];

    let result = crate::build(rules);

    match result {
      Err(Error::ReduceReduceConflict(err)) => {
        assert_eq!(err.state_items, vec!["S -> \"a\" .", "S -> \"a\" ."]);
        assert_eq!(err.reduce1, "S -> \"a\"");
        assert_eq!(err.reduce2, "S -> \"a\"");
      }
      _ => panic!("expected a reduce-reduce conflict"),
    }
  }

  #[test]
  fn reduce_reduce_distinct_rules() {
    // A -> x . and B -> x . end up in the same state even though a lookahead
    // of one token would tell them apart.
    let rules = vec![
      rule("0", vec![Symbol::nt("S")]),
      rule("S", vec![Symbol::nt("A"), Symbol::lit("a")]),
      rule("S", vec![Symbol::nt("B"), Symbol::lit("b")]),
      rule("A", vec![Symbol::lit("x")]),
      rule("B", vec![Symbol::lit("x")]),
    ];

    let result = crate::build(rules);

    assert!(matches!(result, Err(Error::ReduceReduceConflict(_))));
  }

  #[test]
  fn shift_reduce_reject() {
    let rules = vec![
      rule("0", vec![Symbol::nt("E")]),
      rule("E", vec![Symbol::nt("E"), Symbol::lit("+"), Symbol::nt("E")]),
      rule("E", vec![Symbol::ident()]),
    ];
    let config = Config::default().with_conflicts(ConflictPolicy::Reject);

    let result = Builder::new(rules, config).build();

    match result {
      Err(Error::ShiftReduceConflict(err)) => {
        assert_eq!(err.shift, "\"+\"");
        assert_eq!(err.reduce, "0 -> E");
      }
      _ => panic!("expected a shift-reduce conflict"),
    }
  }

  #[test]
  fn shift_reduce_warn() {
    let rules = vec![
      rule("0", vec![Symbol::nt("E")]),
      rule("E", vec![Symbol::nt("E"), Symbol::lit("+"), Symbol::nt("E")]),
      rule("E", vec![Symbol::ident()]),
    ];
    let config = Config::default().with_conflicts(ConflictPolicy::Warn);

    let automaton = Builder::new(rules, config).build().unwrap();
    let conflicts = automaton.conflicts()
      .iter()
      .map(|c| (c.shift.as_str(), c.reduce.as_str()))
      .collect::<Vec<_>>();

    assert_eq!(conflicts, vec![
      ("\"+\"", "0 -> E"),
      ("\"+\"", "E -> E \"+\" E"),
    ]);
  }
}
