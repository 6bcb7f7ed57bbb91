use attrlr::{Attr, Automaton, Rule, Symbol, Token, TokenKind};
use pretty_assertions::assert_eq;

fn num(attr: &Attr<f64>) -> f64 {
  match attr {
    Attr::Value(n) => *n,
    Attr::Token(token) => token.text.parse().unwrap(),
  }
}

fn binary(op: fn(f64, f64) -> f64) -> impl Fn(Vec<Attr<f64>>) -> Attr<f64> {
  move |args| Attr::Value(op(num(&args[0]), num(&args[2])))
}

/// 0 -> E
/// E -> E "+" T | E "-" T | T
/// T -> T "*" F | T "/" F | F
/// F -> _ident_ | "(" E ")"
fn calculator() -> Automaton<f64> {
  attrlr::build(vec![
    Rule::pass("0", vec![Symbol::nt("E")]),
    Rule::new("E", vec![Symbol::nt("E"), Symbol::lit("+"), Symbol::nt("T")], binary(|a, b| a + b)),
    Rule::new("E", vec![Symbol::nt("E"), Symbol::lit("-"), Symbol::nt("T")], binary(|a, b| a - b)),
    Rule::pass("E", vec![Symbol::nt("T")]),
    Rule::new("T", vec![Symbol::nt("T"), Symbol::lit("*"), Symbol::nt("F")], binary(|a, b| a * b)),
    Rule::new("T", vec![Symbol::nt("T"), Symbol::lit("/"), Symbol::nt("F")], binary(|a, b| a / b)),
    Rule::pass("T", vec![Symbol::nt("F")]),
    Rule::new("F", vec![Symbol::ident()], |args| Attr::Value(num(&args[0]))),
    Rule::new("F", vec![Symbol::lit("("), Symbol::nt("E"), Symbol::lit(")")], |mut args| {
      args.swap_remove(1)
    }),
  ]).unwrap()
}

/// Numbers have no terminal of their own; they are parsed as identifiers.
fn lex(input: &str) -> Vec<Token> {
  attrlr::tokenize(input)
    .unwrap()
    .into_iter()
    .map(|token| match token.kind {
      TokenKind::Int | TokenKind::Float => Token { kind: TokenKind::Ident, ..token },
      _ => token,
    })
    .collect()
}

fn eval(automaton: &Automaton<f64>, input: &str) -> f64 {
  automaton.parse(&lex(input)).unwrap().into_value().unwrap()
}

#[test]
fn arithmetic() {
  let automaton = calculator();

  assert_eq!(eval(&automaton, "1 + 2"), 3.0);
  assert_eq!(eval(&automaton, "2 * (3 + 4) * 5 + 1"), 71.0);
  assert_eq!(eval(&automaton, "10 - 3 - 2"), 5.0);
  assert_eq!(eval(&automaton, "(3.2 * 50 + 1) / 20"), 8.05);
  assert_eq!(eval(&automaton, "((7))"), 7.0);
}

#[test]
fn errors() {
  let automaton = calculator();

  for input in &["1 +", "(1 + 2", ")", "", "1 + * 2", "2 * ()"] {
    let err = automaton.parse(&lex(input)).unwrap_err();
    assert!(err.is_syntax_error(), "{}: {}", input, err);
  }
}

#[test]
fn reusable() {
  let automaton = calculator();

  let results = (1..=10)
    .map(|n| eval(&automaton, &format!("{} * {}", n, n)))
    .collect::<Vec<_>>();

  assert_eq!(results, vec![1.0, 4.0, 9.0, 16.0, 25.0, 36.0, 49.0, 64.0, 81.0, 100.0]);
}

#[test]
fn lex_error() {
  let automaton = calculator();

  let result = attrlr::parse_str(&automaton, "1 + \"2");

  assert!(matches!(result, Err(attrlr::Error::Lex(_))));
}
