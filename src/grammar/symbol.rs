use std::collections::HashSet;

use super::{InvalidGrammarError, END_MARK};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Epsilon,
    EndMarker,
}

impl Symbol {
    pub fn name<'a>(&'a self, epsilon: &'a str) -> &'a str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
            Symbol::Epsilon => epsilon,
            Symbol::EndMarker => END_MARK,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

/// Empty tokens and tokens with whitespace can name neither a symbol nor
/// the epsilon marker.
pub fn is_blank(token: &str) -> bool {
    token.is_empty() || token.chars().any(|c| c.is_whitespace())
}

/// Classifies raw tokens against the declared nonterminals of a definition.
///
/// Spelling carries no meaning: `expr` is a nonterminal as soon as it has a
/// rule, and `ID` is a terminal as long as it has none.
pub struct SymbolClassifier<'a> {
    epsilon: &'a str,
    non_terminals: HashSet<&'a str>,
}

impl<'a> SymbolClassifier<'a> {
    pub fn new<I>(epsilon: &'a str, non_terminals: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            epsilon,
            non_terminals: non_terminals.into_iter().collect(),
        }
    }

    pub fn epsilon(&self) -> &'a str {
        self.epsilon
    }

    pub fn is_reserved(&self, token: &str) -> bool {
        token == self.epsilon || token == END_MARK
    }

    /// `Err` carries only the offending token; the caller knows which rule
    /// it came from.
    pub fn classify(&self, token: &str) -> Result<Symbol, String> {
        if token == self.epsilon {
            Ok(Symbol::Epsilon)
        } else if token == END_MARK {
            Ok(Symbol::EndMarker)
        } else if self.non_terminals.contains(token) {
            Ok(Symbol::NonTerminal(token.to_string()))
        } else if is_blank(token) {
            Err(token.to_string())
        } else {
            Ok(Symbol::Terminal(token.to_string()))
        }
    }

    pub fn classify_in(
        &self,
        non_terminal: &str,
        token: &str,
    ) -> Result<Symbol, InvalidGrammarError> {
        self.classify(token)
            .map_err(|token| InvalidGrammarError::UnclassifiableSymbol {
                non_terminal: non_terminal.to_string(),
                token,
            })
    }
}
