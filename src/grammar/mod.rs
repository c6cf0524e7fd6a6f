pub mod definition;
pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod pretty_print;
pub mod symbol;
pub use definition::{GrammarDefinition, RuleDefinition};
pub use error::InvalidGrammarError;
pub use first::FirstSets;
pub use follow::FollowSets;
pub use grammar::Grammar;
pub use symbol::{is_blank, Symbol, SymbolClassifier};

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";

pub const EPSILON_INDEX: usize = 0;
pub const END_MARK_INDEX: usize = 1;
