//! A small tokenizer producing the token sequence a parser consumes.
//!
//! Whitespace and `//`, `/* */` comments are skipped. The output always ends
//! with a single [`TokenKind::Eof`] token.

use thiserror::Error;
use crate::token::{Token, TokenKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
  #[error("unterminated string literal at {0}")]
  UnterminatedString(Position),
  #[error("unterminated raw string literal at {0}")]
  UnterminatedRawString(Position),
  #[error("unterminated character literal at {0}")]
  UnterminatedChar(Position),
  #[error("unterminated comment at {0}")]
  UnterminatedComment(Position),
  #[error("malformed number literal at {0}")]
  MalformedNumber(Position),
  #[error("empty character literal at {0}")]
  EmptyChar(Position),
}

pub struct Lexer<'a> {
  input: &'a str,
  offset: usize,
  line: usize,
  column: usize,
  done: bool,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
  Lexer::new(input).collect()
}

impl LexError {
  pub fn pos(&self) -> Position {
    match *self {
      LexError::UnterminatedString(pos) |
      LexError::UnterminatedRawString(pos) |
      LexError::UnterminatedChar(pos) |
      LexError::UnterminatedComment(pos) |
      LexError::MalformedNumber(pos) |
      LexError::EmptyChar(pos) => pos,
    }
  }
}

impl<'a> Lexer<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      input,
      offset: 0,
      line: 1,
      column: 1,
      done: false,
    }
  }

  fn pos(&self) -> Position {
    Position::new(self.line, self.column)
  }

  fn peek(&self) -> Option<char> {
    self.input[self.offset..].chars().next()
  }

  fn peek_second(&self) -> Option<char> {
    self.input[self.offset..].chars().nth(1)
  }

  fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.offset += c.len_utf8();
    if c == '\n' {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
    Some(c)
  }

  fn eat_while(&mut self, f: impl Fn(char) -> bool) {
    while let Some(c) = self.peek() {
      if !f(c) {
        break;
      }
      self.bump();
    }
  }

  fn skip_trivia(&mut self) -> Result<(), LexError> {
    loop {
      match (self.peek(), self.peek_second()) {
        (Some(c), _) if c.is_whitespace() => {
          self.bump();
        }
        (Some('/'), Some('/')) => {
          self.eat_while(|c| c != '\n');
        }
        (Some('/'), Some('*')) => {
          let start = self.pos();
          self.bump();
          self.bump();
          loop {
            match self.bump() {
              Some('*') if self.peek() == Some('/') => {
                self.bump();
                break;
              }
              Some(_) => {}
              None => return Err(LexError::UnterminatedComment(start)),
            }
          }
        }
        _ => return Ok(()),
      }
    }
  }

  /// Scans a number. `0x`, `0o` and `0b` prefixes need at least one digit
  /// of their base, and no digit outside it.
  fn number(&mut self, pos: Position) -> Result<TokenKind, LexError> {
    if self.peek() == Some('0') {
      let radix = match self.peek_second() {
        Some('x') | Some('X') => 16,
        Some('o') | Some('O') => 8,
        Some('b') | Some('B') => 2,
        _ => 10,
      };
      if radix != 10 {
        self.bump();
        self.bump();
        let start = self.offset;
        self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
        let mut digits = self.input[start..self.offset].chars().filter(|&c| c != '_');
        let valid = match digits.next() {
          Some(first) => first.is_digit(radix) && digits.all(|c| c.is_digit(radix)),
          None => false,
        };
        if !valid {
          return Err(LexError::MalformedNumber(pos));
        }
        return Ok(TokenKind::Int);
      }
    }

    let mut kind = TokenKind::Int;
    self.eat_while(|c| c.is_ascii_digit());

    if self.peek() == Some('.') {
      self.bump();
      self.eat_while(|c| c.is_ascii_digit());
      kind = TokenKind::Float;
    }

    if matches!(self.peek(), Some('e') | Some('E')) {
      let sign = matches!(self.peek_second(), Some('+') | Some('-'));
      let digit_at = if sign { 2 } else { 1 };
      let has_digit = self.input[self.offset..]
        .chars()
        .nth(digit_at)
        .map_or(false, |c| c.is_ascii_digit());
      if has_digit {
        self.bump();
        if sign {
          self.bump();
        }
        self.eat_while(|c| c.is_ascii_digit());
        kind = TokenKind::Float;
      }
    }

    Ok(kind)
  }

  /// Consumes a quoted literal up to `quote`. The opening quote has already
  /// been consumed.
  fn quoted(&mut self, quote: char, escapes: bool, multiline: bool) -> bool {
    loop {
      match self.peek() {
        None => return false,
        Some('\n') if !multiline => return false,
        Some('\\') if escapes => {
          self.bump();
          if self.bump().is_none() {
            return false;
          }
        }
        Some(c) => {
          self.bump();
          if c == quote {
            return true;
          }
        }
      }
    }
  }

  fn scan(&mut self) -> Result<Token, LexError> {
    self.skip_trivia()?;

    let pos = self.pos();
    let start = self.offset;
    let c = match self.peek() {
      Some(c) => c,
      None => {
        self.done = true;
        return Ok(Token { kind: TokenKind::Eof, text: String::new(), pos });
      }
    };

    let kind = match c {
      _ if c.is_alphabetic() || c == '_' => {
        self.eat_while(|c| c.is_alphanumeric() || c == '_');
        TokenKind::Ident
      }
      _ if c.is_ascii_digit() => self.number(pos)?,
      '.' if self.peek_second().map_or(false, |c| c.is_ascii_digit()) => {
        self.number(pos)?
      }
      '"' => {
        self.bump();
        if !self.quoted('"', true, false) {
          return Err(LexError::UnterminatedString(pos));
        }
        TokenKind::String
      }
      '`' => {
        self.bump();
        if !self.quoted('`', false, true) {
          return Err(LexError::UnterminatedRawString(pos));
        }
        TokenKind::RawString
      }
      '\'' => {
        self.bump();
        if self.peek() == Some('\'') {
          return Err(LexError::EmptyChar(pos));
        }
        if !self.quoted('\'', true, false) {
          return Err(LexError::UnterminatedChar(pos));
        }
        TokenKind::Char
      }
      _ => {
        self.bump();
        TokenKind::Other
      }
    };

    let text = &self.input[start..self.offset];
    let text = match kind {
      TokenKind::String | TokenKind::RawString | TokenKind::Char => {
        &text[1..text.len() - 1]
      }
      _ => text,
    };

    Ok(Token { kind, text: text.to_owned(), pos })
  }
}

impl<'a> Iterator for Lexer<'a> {
  type Item = Result<Token, LexError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }

    let result = self.scan();
    if result.is_err() {
      self.done = true;
    }
    Some(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn kinds(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
      .unwrap()
      .into_iter()
      .map(|t| (t.kind, t.text))
      .collect()
  }

  #[test]
  fn tokens() {
    let result = kinds(r#"foo_1 + 12 3.5 1e9 0x1F .5 "a\"b" `raw
text` 'c' ;"#);

    assert_eq!(result, vec![
      (TokenKind::Ident, "foo_1".to_owned()),
      (TokenKind::Other, "+".to_owned()),
      (TokenKind::Int, "12".to_owned()),
      (TokenKind::Float, "3.5".to_owned()),
      (TokenKind::Float, "1e9".to_owned()),
      (TokenKind::Int, "0x1F".to_owned()),
      (TokenKind::Float, ".5".to_owned()),
      (TokenKind::String, r#"a\"b"#.to_owned()),
      (TokenKind::RawString, "raw\ntext".to_owned()),
      (TokenKind::Char, "c".to_owned()),
      (TokenKind::Other, ";".to_owned()),
      (TokenKind::Eof, "".to_owned()),
    ]);
  }

  #[test]
  fn comments() {
    let result = kinds("a // line comment\n /* block\n comment */ b");

    assert_eq!(result, vec![
      (TokenKind::Ident, "a".to_owned()),
      (TokenKind::Ident, "b".to_owned()),
      (TokenKind::Eof, "".to_owned()),
    ]);
  }

  #[test]
  fn positions() {
    let tokens = tokenize("x\n  (y)").unwrap();
    let positions = tokens.iter().map(|t| (t.line(), t.column())).collect::<Vec<_>>();

    assert_eq!(positions, vec![(1, 1), (2, 3), (2, 4), (2, 5), (2, 6)]);
  }

  #[test]
  fn empty_input() {
    assert_eq!(kinds("   "), vec![(TokenKind::Eof, "".to_owned())]);
  }

  #[test]
  fn unterminated() {
    assert_eq!(
      tokenize("a \"bc"),
      Err(LexError::UnterminatedString(Position::new(1, 3))));
    assert_eq!(
      tokenize("'c\n'"),
      Err(LexError::UnterminatedChar(Position::new(1, 1))));
    assert_eq!(
      tokenize("`abc"),
      Err(LexError::UnterminatedRawString(Position::new(1, 1))));
    assert_eq!(
      tokenize("x /* y"),
      Err(LexError::UnterminatedComment(Position::new(1, 3))));
  }

  #[test]
  fn prefixed_numbers() {
    assert_eq!(kinds("0b101 0o17 0xfF"), vec![
      (TokenKind::Int, "0b101".to_owned()),
      (TokenKind::Int, "0o17".to_owned()),
      (TokenKind::Int, "0xfF".to_owned()),
      (TokenKind::Eof, "".to_owned()),
    ]);
  }

  #[test]
  fn malformed() {
    assert_eq!(tokenize("x 0x"), Err(LexError::MalformedNumber(Position::new(1, 3))));
    assert_eq!(tokenize("0b"), Err(LexError::MalformedNumber(Position::new(1, 1))));
    assert_eq!(tokenize("0b102"), Err(LexError::MalformedNumber(Position::new(1, 1))));
    assert_eq!(tokenize("0o8"), Err(LexError::MalformedNumber(Position::new(1, 1))));
    assert_eq!(tokenize("a ''"), Err(LexError::EmptyChar(Position::new(1, 3))));
  }

  #[test]
  fn stops_after_error() {
    let mut lexer = Lexer::new("\"abc");

    assert!(matches!(lexer.next(), Some(Err(_))));
    assert!(lexer.next().is_none());
  }
}
