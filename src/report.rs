//! Multi-line, human-readable renderings of build and parse failures.

use std::fmt::Write;
use crate::{BuildError, Error, LexError, ParseError};

pub fn report(err: &Error) -> String {
  match err {
    Error::Lex(err) => report_lex_error(err),
    Error::Parse(err) => report_parse_error(err),
  }
}

pub fn report_build_error(err: &BuildError) -> String {
  match err {
    BuildError::MissingStart(start) => {
      format!("no rule has the start symbol {} as its left-hand side\n", start)
    }
    BuildError::ReduceReduceConflict(err) => report_rr_conflict(err),
    BuildError::ShiftShiftConflict(err) => report_ss_conflict(err),
    BuildError::ShiftReduceConflict(err) => report_sr_conflict(err),
  }
}

pub fn report_parse_error(err: &ParseError) -> String {
  match err {
    ParseError::Syntax(err) => report_syntax_error(err),
    ParseError::MissingGoto(err) => report_missing_goto(err),
    ParseError::InputExhausted => {
      "internal error: token sequence ended without an end-of-input token\n".to_owned()
    }
    ParseError::Unfinished(err) => report_unfinished(err),
  }
}

pub fn report_lex_error(err: &LexError) -> String {
  let pos = err.pos();
  format!("lexical error at {}:{}\nmessage: {}\n", pos.line, pos.column, err)
}

fn write_state(buf: &mut String, state_items: &[String]) {
  for item in state_items {
    writeln!(buf,
      "  {}", item,
    ).unwrap();
  }
}

fn report_rr_conflict(
  err: &crate::ReduceReduceConflictError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "reduce-reduce conflict at state {}:\n", err.state
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  writeln!(&mut buf,
    "\nwhich can be reduced by:\n\n  {}\n\nor:\n\n  {}",
    err.reduce1,
    err.reduce2,
  ).unwrap();

  buf
}

fn report_ss_conflict(
  err: &crate::ShiftShiftConflictError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "shift-shift conflict at state {}:\n", err.state
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  writeln!(&mut buf,
    "\nwhich can shift {} to more than one state",
    err.terminal,
  ).unwrap();

  buf
}

fn report_sr_conflict(
  err: &crate::ShiftReduceConflictError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "shift-reduce conflict at state {}:\n", err.state
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  writeln!(&mut buf,
    "\nwhich can shift {}\nor reduce by:\n\n  {}",
    err.shift,
    err.reduce,
  ).unwrap();

  buf
}

fn report_syntax_error(
  err: &crate::SyntaxError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "syntax error at {}:{}",
    err.token.pos.line,
    err.token.pos.column,
  ).unwrap();

  writeln!(&mut buf,
    "unexpected {} in state {}:\n", err.terminal, err.state
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  buf
}

fn report_missing_goto(
  err: &crate::MissingGotoError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "internal error: no goto over {} in state {}:\n", err.nonterminal, err.state
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  buf
}

fn report_unfinished(
  err: &crate::UnfinishedError
) -> String {
  let mut buf = String::new();

  writeln!(&mut buf,
    "unfinished parse at {}:{}",
    err.token.pos.line,
    err.token.pos.column,
  ).unwrap();

  writeln!(&mut buf,
    "accepted in state {} with {} attributes left on the stack:\n",
    err.state,
    err.residual,
  ).unwrap();

  write_state(&mut buf, &err.state_items);

  buf
}
