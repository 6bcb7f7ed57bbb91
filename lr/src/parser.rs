use thiserror::Error;
use grammar::{Attr, Rule, Terminal, Token};
use crate::automaton::{Automaton, Action};
use crate::state::StateId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  /// The input does not match the grammar.
  #[error("{0}")]
  Syntax(SyntaxError),
  /// The automaton has no goto for a reduced rule. Only a corrupt automaton
  /// can cause this, never the input.
  #[error("{0}")]
  MissingGoto(MissingGotoError),
  /// The tokens ran out before an end-of-input token was read.
  #[error("token sequence ended without an end-of-input token")]
  InputExhausted,
  /// A top-level rule completed while other attributes were still on the
  /// stack, e.g. where the start non-terminal is nested in another rule.
  #[error("{0}")]
  Unfinished(UnfinishedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no action over {terminal} for {token} at state {}", .state_items.join(" + "))]
pub struct SyntaxError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub terminal: String,
  pub token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no goto over {nonterminal} at state {}", .state_items.join(" + "))]
pub struct MissingGotoError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub nonterminal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("accepted with {residual} attributes left on the stack at state {}", .state_items.join(" + "))]
pub struct UnfinishedError {
  pub state: StateId,
  pub state_items: Vec<String>,
  pub residual: usize,
  pub token: Token,
}

impl ParseError {
  pub fn is_syntax_error(&self) -> bool {
    matches!(self, ParseError::Syntax(_))
  }
}

impl<T> Automaton<T> {
  /// Parses `tokens`, which should end with an end-of-input token, into the
  /// attribute built by the accepting top-level rule.
  pub fn parse(&self, tokens: &[Token]) -> Result<Attr<T>, ParseError> {
    let mut stack: Vec<Attr<T>> = vec![];
    let mut states: Vec<StateId> = vec![self.initial];
    let mut tokens = tokens.iter();
    let mut token = tokens.next().ok_or(ParseError::InputExhausted)?;

    loop {
      let state = top(&states);
      let action = self.lookup(state, token)?;
      log::trace!("state {} token {} => {:?}", state, token, action);

      match action {
        Action::Shift(to_state) => {
          stack.push(Attr::Token(token.clone()));
          states.push(to_state);
          token = tokens.next().ok_or(ParseError::InputExhausted)?;
        }
        Action::Reduce(rule) => {
          let rule = &self.rules[rule];
          reduce(rule, &mut stack, &mut states);

          let prev = top(&states);
          let to_state = self.goto[prev].get(rule.lhs.as_str())
            .copied()
            .ok_or_else(|| ParseError::MissingGoto(MissingGotoError {
              state: prev,
              state_items: self.state_items(prev),
              nonterminal: rule.lhs.clone(),
            }))?;
          states.push(to_state);
        }
        Action::Accept(rule) => {
          let rule = &self.rules[rule];
          reduce(rule, &mut stack, &mut states);

          let result = stack.pop().expect("corrupted symbol stack");
          if !stack.is_empty() {
            return Err(ParseError::Unfinished(UnfinishedError {
              state,
              state_items: self.state_items(state),
              residual: stack.len(),
              token: token.clone(),
            }));
          }
          return Ok(result);
        }
      }
    }
  }

  /// Action for `token` at `state`, falling back to the identifier wildcard
  /// for identifiers without a literal action.
  fn lookup(&self, state: StateId, token: &Token) -> Result<Action, ParseError> {
    let actions = &self.action[state];
    let (t, fallback) = Terminal::classify(token);

    let action = match actions.get(&t) {
      Some(action) => Some(action),
      None if fallback => actions.get(&Terminal::Identifier),
      None => None,
    };

    action.copied().ok_or_else(|| ParseError::Syntax(SyntaxError {
      state,
      state_items: self.state_items(state),
      terminal: t.to_string(),
      token: token.clone(),
    }))
  }
}

fn top(states: &[StateId]) -> StateId {
  *states.last().expect("corrupted state stack")
}

/// Replaces the right-hand side of `rule` on top of the stacks with the
/// attribute its builder makes of them.
fn reduce<T>(rule: &Rule<T>, stack: &mut Vec<Attr<T>>, states: &mut Vec<StateId>) {
  let len = rule.rhs.len();
  assert!(stack.len() >= len && states.len() > len, "corrupted symbol stack");

  let args = stack.split_off(stack.len() - len);
  states.truncate(states.len() - len);
  stack.push(rule.build(args));
}
