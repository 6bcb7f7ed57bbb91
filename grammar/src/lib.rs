use fnv::FnvBuildHasher;

mod symbol;
mod token;
mod rule;
pub mod lex;

pub use symbol::*;
pub use token::*;
pub use rule::*;
pub use lex::{LexError, Lexer};

pub type Map<K, V> = indexmap::IndexMap<K, V, FnvBuildHasher>;
pub type Set<K> = indexmap::IndexSet<K, FnvBuildHasher>;

/// Name of the reserved non-terminal whose rules are the grammar's top-level
/// rules. Completing one of them ends a parse.
pub const START: &str = "0";
