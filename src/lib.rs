//! Attribute-grammar LR parsing.
//!
//! A grammar is a list of [`Rule`]s, each with a builder that synthesizes the
//! attribute of its left-hand side from the attributes of its right-hand
//! side. [`lr::build`] turns the rules into an immutable [`Automaton`] that
//! parses token sequences into the attribute of the top-level rule.
//!
//! ```
//! use attrlr::{Attr, Rule, Symbol};
//!
//! let automaton = attrlr::build(vec![
//!   Rule::pass("0", vec![Symbol::nt("E")]),
//!   Rule::new("E", vec![Symbol::nt("E"), Symbol::lit("+"), Symbol::nt("E")], |args| {
//!     Attr::Value(args[0].value().unwrap() + args[2].value().unwrap())
//!   }),
//!   Rule::new("E", vec![Symbol::ident()], |args| {
//!     Attr::Value(args[0].text().unwrap().len())
//!   }),
//! ]).unwrap();
//!
//! let result = attrlr::parse_str(&automaton, "ab + cde").unwrap();
//! assert_eq!(result.into_value(), Some(5));
//! ```

use thiserror::Error;

pub mod report;

pub use grammar::{
  Attr, Rule, RuleId, Symbol, Terminal, NonTerminal, Token, TokenKind,
  Position, LexError, Lexer, START,
};
pub use grammar::lex::tokenize;
pub use lr::{
  build, Automaton, Action, Builder, Config, ConflictPolicy, Item, State,
  StateId, ParseError, SyntaxError, MissingGotoError, UnfinishedError,
  ReduceReduceConflictError, ShiftShiftConflictError,
  ShiftReduceConflictError,
};
pub use lr::Error as BuildError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Lex(#[from] LexError),
  #[error(transparent)]
  Parse(#[from] ParseError),
}

/// Tokenizes `input` and parses it.
pub fn parse_str<T>(automaton: &Automaton<T>, input: &str) -> Result<Attr<T>, Error> {
  let tokens = tokenize(input)?;
  let result = automaton.parse(&tokens)?;
  Ok(result)
}
