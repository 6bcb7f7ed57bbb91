use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Ident,
  Int,
  Float,
  String,
  RawString,
  Char,
  Eof,
  Other,
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

/// A classified input token. Quoted kinds carry their text without the
/// surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub pos: Position,
}

impl Position {
  pub const fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
    Self {
      kind,
      text: text.into(),
      pos: Position::new(line, column),
    }
  }

  /// An identifier at `1:1`. Handy when tokens are built by hand.
  pub fn ident(text: impl Into<String>) -> Self {
    Self::new(TokenKind::Ident, text, 1, 1)
  }

  pub fn other(text: impl Into<String>) -> Self {
    Self::new(TokenKind::Other, text, 1, 1)
  }

  pub fn eof() -> Self {
    Self::new(TokenKind::Eof, "", 1, 1)
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  pub fn line(&self) -> usize {
    self.pos.line
  }

  pub fn column(&self) -> usize {
    self.pos.column
  }

  pub fn is_ident(&self) -> bool {
    self.kind == TokenKind::Ident
  }

  pub fn is_int(&self) -> bool {
    self.kind == TokenKind::Int
  }

  pub fn is_float(&self) -> bool {
    self.kind == TokenKind::Float
  }

  pub fn is_string(&self) -> bool {
    self.kind == TokenKind::String
  }

  pub fn is_raw_string(&self) -> bool {
    self.kind == TokenKind::RawString
  }

  pub fn is_char(&self) -> bool {
    self.kind == TokenKind::Char
  }

  pub fn is_eof(&self) -> bool {
    self.kind == TokenKind::Eof
  }

  pub fn is_quoted(&self) -> bool {
    self.is_string() || self.is_raw_string() || self.is_char()
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      TokenKind::Ident => "Ident",
      TokenKind::Int => "Int",
      TokenKind::Float => "Float",
      TokenKind::String => "String",
      TokenKind::RawString => "RawString",
      TokenKind::Char => "Char",
      TokenKind::Eof => "EOF",
      TokenKind::Other => "Other",
    };
    f.write_str(name)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}[{}:{}]", self.kind, self.text, self.pos)
  }
}
