use grammar::START;

/// What the builder does when a state could both shift a terminal and
/// reduce a complete rule. The shift is taken in every case except
/// [`ConflictPolicy::Reject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
  /// Shift, silently.
  PreferShift,
  /// Shift, log a warning and record the conflict in the automaton.
  Warn,
  /// Fail the build.
  Reject,
}

/// Configuration for building an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Left-hand side of the top-level rules. Completing one of them accepts
  /// the input.
  pub start: String,
  pub conflicts: ConflictPolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      start: START.to_owned(),
      conflicts: ConflictPolicy::PreferShift,
    }
  }
}

impl Config {
  pub fn with_start(mut self, start: impl Into<String>) -> Self {
    self.start = start.into();
    self
  }

  pub fn with_conflicts(mut self, conflicts: ConflictPolicy) -> Self {
    self.conflicts = conflicts;
    self
  }
}
