use std::fmt;

/// Reasons a grammar definition is rejected before any set is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGrammarError {
    NoRules,
    MissingStartSymbol(String),
    EmptyProductions(String),
    UnclassifiableSymbol { non_terminal: String, token: String },
    ReservedName(String),
    InvalidName(String),
    Malformed(String),
}

impl fmt::Display for InvalidGrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidGrammarError::NoRules => write!(f, "grammar has no rules"),
            InvalidGrammarError::MissingStartSymbol(name) => {
                write!(f, "start symbol \"{}\" has no productions", name)
            }
            InvalidGrammarError::EmptyProductions(name) => {
                write!(f, "nonterminal \"{}\" has an empty production list", name)
            }
            InvalidGrammarError::UnclassifiableSymbol {
                non_terminal,
                token,
            } => write!(
                f,
                "production of \"{}\" references unclassifiable symbol \"{}\"",
                non_terminal, token
            ),
            InvalidGrammarError::ReservedName(name) => {
                write!(f, "\"{}\" is a reserved marker", name)
            }
            InvalidGrammarError::InvalidName(name) => {
                write!(f, "\"{}\" is empty or contains whitespace", name)
            }
            InvalidGrammarError::Malformed(message) => {
                write!(f, "malformed grammar definition: {}", message)
            }
        }
    }
}

impl std::error::Error for InvalidGrammarError {}

impl From<serde_json::Error> for InvalidGrammarError {
    fn from(e: serde_json::Error) -> Self {
        InvalidGrammarError::Malformed(e.to_string())
    }
}
