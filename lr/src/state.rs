use std::cmp::Ordering;
use grammar::Rule;
use crate::item::Item;

/// Index of an interned state in its automaton.
pub type StateId = usize;

/// A duplicate-free set of items kept in sorted order, so that structurally
/// equal states compare equal whatever order their items were added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct State {
  items: Vec<Item>,
}

impl State {
  pub fn new() -> Self {
    State { items: vec![] }
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Returns `false` if the item was already present.
  pub fn add_item(&mut self, item: Item) -> bool {
    match self.items.binary_search(&item) {
      Ok(_) => false,
      Err(ix) => {
        self.items.insert(ix, item);
        true
      }
    }
  }

  pub fn contains(&self, item: &Item) -> bool {
    self.items.binary_search(item).is_ok()
  }

  pub fn fmt_items<T>(&self, rules: &[Rule<T>]) -> Vec<String> {
    self.items.iter().map(|item| item.to_string(rules)).collect()
  }
}

/// Shorter states first, then item by item.
impl Ord for State {
  fn cmp(&self, other: &Self) -> Ordering {
    self.items.len().cmp(&other.items.len())
      .then_with(|| self.items.cmp(&other.items))
  }
}

impl PartialOrd for State {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Extend<Item> for State {
  fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
    for item in iter {
      self.add_item(item);
    }
  }
}

impl std::iter::FromIterator<Item> for State {
  fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
    let mut state = State::new();
    state.extend(iter);
    state
  }
}
