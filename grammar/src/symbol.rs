use std::borrow::Borrow;
use std::fmt;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
  Nonterminal(NonTerminal),
  Terminal(Terminal),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub String);

/// Terminals are ordered by variant first, then by literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
  /// Matches only the end-of-input token.
  EndOfInput,
  /// Matches any identifier token that has no literal action of its own.
  Identifier,
  /// Matches a token whose text is exactly this string.
  Literal(String),
}

impl Symbol {
  pub fn nt(name: impl Into<String>) -> Self {
    Symbol::Nonterminal(NonTerminal(name.into()))
  }

  pub fn lit(text: impl Into<String>) -> Self {
    Symbol::Terminal(Terminal::Literal(text.into()))
  }

  pub fn ident() -> Self {
    Symbol::Terminal(Terminal::Identifier)
  }

  pub fn eof() -> Self {
    Symbol::Terminal(Terminal::EndOfInput)
  }

  pub fn as_nonterminal(&self) -> Option<&NonTerminal> {
    match self {
      Symbol::Nonterminal(nt) => Some(nt),
      Symbol::Terminal(_) => None,
    }
  }

  pub fn as_terminal(&self) -> Option<&Terminal> {
    match self {
      Symbol::Terminal(t) => Some(t),
      Symbol::Nonterminal(_) => None,
    }
  }
}

impl NonTerminal {
  pub fn new(name: impl Into<String>) -> Self {
    NonTerminal(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for NonTerminal {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl Terminal {
  /// Maps an input token to the terminal it represents.
  ///
  /// The returned flag tells whether the parser may fall back to
  /// [`Terminal::Identifier`] when the literal itself has no action.
  ///
  /// # Panics
  ///
  /// Panics on numeric and quoted token kinds: grammars have no terminal for
  /// them, so receiving one means the lexer and the grammar disagree.
  pub fn classify(token: &Token) -> (Terminal, bool) {
    match token.kind {
      TokenKind::Ident => (Terminal::Literal(token.text.clone()), true),
      TokenKind::Eof => (Terminal::EndOfInput, false),
      TokenKind::Other => (Terminal::Literal(token.text.clone()), false),
      _ => panic!("couldn't convert token {} to terminal", token),
    }
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Symbol::Nonterminal(nt) => fmt::Display::fmt(nt, f),
      Symbol::Terminal(t) => fmt::Display::fmt(t, f),
    }
  }
}

impl fmt::Display for NonTerminal {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Display for Terminal {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Terminal::EndOfInput => f.write_str("_eof_"),
      Terminal::Identifier => f.write_str("_ident_"),
      Terminal::Literal(text) => write!(f, "\"{}\"", text),
    }
  }
}
