use std::fmt;
use grammar::{Rule, RuleId, Symbol};

/// A rule recognized up to `dot`. Items order by rule, then by dot.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Item {
  pub rule: RuleId,
  pub dot: usize,
}

impl Item {
  pub fn new(rule: RuleId, dot: usize) -> Self {
    Item { rule, dot }
  }

  pub fn advance(&self) -> Self {
    Item {
      rule: self.rule,
      dot: self.dot + 1,
    }
  }

  /// The symbol right after the dot, or `None` if the rule is complete.
  pub fn next_symbol<'a, T>(&self, rules: &'a [Rule<T>]) -> Option<&'a Symbol> {
    rules[self.rule].rhs.get(self.dot)
  }

  pub fn is_complete<T>(&self, rules: &[Rule<T>]) -> bool {
    self.dot == rules[self.rule].rhs.len()
  }

  pub fn fmt<T>(
    &self,
    rules: &[Rule<T>],
    f: &mut impl fmt::Write,
  ) -> fmt::Result {
    rules[self.rule].fmt_with_dot(self.dot, f)
  }

  pub fn to_string<T>(&self, rules: &[Rule<T>]) -> String {
    let mut s = String::new();
    self.fmt(rules, &mut s).unwrap();
    s
  }
}
