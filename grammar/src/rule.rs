use std::fmt;
use crate::symbol::Symbol;
use crate::token::Token;

/// Index of a rule in the rule list it was supplied in.
pub type RuleId = usize;

pub type BuildFn<T> = dyn Fn(Vec<Attr<T>>) -> Attr<T> + Send + Sync;

/// An attribute value on the parse stack. Shifted tokens are leaves; every
/// rule builder produces a new attribute from the attributes of its
/// right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr<T> {
  Token(Token),
  Value(T),
}

/// A context-free rule with its attribute builder.
pub struct Rule<T> {
  pub lhs: String,
  pub rhs: Vec<Symbol>,
  builder: Box<BuildFn<T>>,
}

impl<T> Attr<T> {
  pub fn token(&self) -> Option<&Token> {
    match self {
      Attr::Token(token) => Some(token),
      Attr::Value(_) => None,
    }
  }

  /// Text of a token attribute.
  pub fn text(&self) -> Option<&str> {
    self.token().map(|token| token.text.as_str())
  }

  pub fn value(&self) -> Option<&T> {
    match self {
      Attr::Value(value) => Some(value),
      Attr::Token(_) => None,
    }
  }

  pub fn into_value(self) -> Option<T> {
    match self {
      Attr::Value(value) => Some(value),
      Attr::Token(_) => None,
    }
  }

  pub fn into_token(self) -> Option<Token> {
    match self {
      Attr::Token(token) => Some(token),
      Attr::Value(_) => None,
    }
  }
}

impl<T> Rule<T> {
  pub fn new<F>(lhs: impl Into<String>, rhs: Vec<Symbol>, builder: F) -> Self
    where F: Fn(Vec<Attr<T>>) -> Attr<T> + Send + Sync + 'static
  {
    Rule {
      lhs: lhs.into(),
      rhs,
      builder: Box::new(builder),
    }
  }

  /// A rule whose attribute is the attribute of its first right-hand side
  /// symbol. Empty rules pass nothing through, so they are not accepted here.
  pub fn pass(lhs: impl Into<String>, rhs: Vec<Symbol>) -> Self {
    assert!(!rhs.is_empty(), "pass-through rule needs a right-hand side");
    Rule::new(lhs, rhs, |mut args| args.swap_remove(0))
  }

  pub fn build(&self, args: Vec<Attr<T>>) -> Attr<T> {
    (self.builder)(args)
  }

  /// Writes the rule with a dot before the symbol at `dot`.
  pub fn fmt_with_dot(
    &self,
    dot: usize,
    f: &mut impl fmt::Write,
  ) -> fmt::Result {
    write!(f, "{} ->", self.lhs)?;

    for (i, sym) in self.rhs.iter().enumerate() {
      if i == dot {
        write!(f, " .")?;
      }
      write!(f, " {}", sym)?;
    }

    if dot == self.rhs.len() {
      write!(f, " .")?;
    }

    Ok(())
  }
}

impl<T> fmt::Display for Rule<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} ->", self.lhs)?;
    for sym in &self.rhs {
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}

impl<T> fmt::Debug for Rule<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Rule")
      .field("lhs", &self.lhs)
      .field("rhs", &self.rhs)
      .finish()
  }
}
